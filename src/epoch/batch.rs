extern crate nalgebra as na;

use na::DMatrix;

use crate::Float;
use crate::image::Frame;
use crate::epoch::sample::Sample;

/**
 * Samples stacked along a leading batch axis.
 * x: (batch, window_size) frames, y: batch matrices of window_size x 6
 */
#[derive(Debug,Clone,Default)]
pub struct Batch {
    pub x: Vec<Vec<Frame>>,
    pub y: Vec<DMatrix<Float>>
}

impl Batch {
    pub fn stack(samples: Vec<Sample>) -> Batch {
        let (x, y) = samples.into_iter().map(|s| (s.x, s.y)).unzip();
        Batch { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
