use std::sync::{Arc,Mutex};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::epoch::window::Window;

/**
 * All windows of one epoch. The order is fixed once at construction and
 * windows are handed out front to back exactly once.
 */
#[derive(Debug,Clone)]
pub struct WindowPool {
    windows: Vec<Window>,
    cursor: usize
}

impl WindowPool {
    pub fn new<R: Rng + ?Sized>(mut windows: Vec<Window>, rng: &mut R) -> WindowPool {
        windows.shuffle(rng);
        WindowPool::from_ordered(windows)
    }

    pub fn from_ordered(windows: Vec<Window>) -> WindowPool {
        WindowPool { windows, cursor: 0 }
    }

    pub fn pop(&mut self) -> Option<Window> {
        let window = self.windows.get(self.cursor).cloned();
        if window.is_some() {
            self.cursor += 1;
        }
        window
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Windows in the pool at construction
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn remaining(&self) -> usize {
        self.windows.len() - self.cursor
    }

    pub fn drawn(&self) -> usize {
        self.cursor
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }
}

/**
 * A pool that several loader threads can draw from. Popping is the only
 * operation that mutates and happens under one lock.
 */
#[derive(Debug,Clone)]
pub struct SharedWindowPool {
    inner: Arc<Mutex<WindowPool>>
}

impl SharedWindowPool {
    pub fn new(pool: WindowPool) -> SharedWindowPool {
        SharedWindowPool { inner: Arc::new(Mutex::new(pool)) }
    }

    pub fn pop(&self) -> Option<Window> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).pop()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).remaining()
    }
}
