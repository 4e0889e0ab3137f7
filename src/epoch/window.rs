use std::ops::Range;

/**
 * Frames [start, end) of one sequence. The first frame only anchors the
 * rectification, so a full window spans window_size+1 frames.
 */
#[derive(Debug,Clone,PartialEq,Eq,Hash)]
pub struct Window {
    pub sequence_id: String,
    pub start: usize,
    pub end: usize
}

impl Window {
    pub fn new(sequence_id: &str, start: usize, end: usize) -> Window {
        assert!(start < end, "empty window [{},{})", start, end);
        Window { sequence_id: sequence_id.to_string(), start, end }
    }

    pub fn frame_nos(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn frame_count(&self) -> usize {
        self.end - self.start
    }

    /// Number of frame to frame transitions, i.e. rectified poses.
    pub fn transitions(&self) -> usize {
        self.frame_count() - 1
    }
}

/**
 * Sliding windows over a sequence of frame_count frames. Starts run over
 * 1, 1+step_size, ... while start <= frame_count - window_size; frame 0 is never an anchor.
 */
pub fn partition(sequence_id: &str, frame_count: usize, window_size: usize, step_size: usize) -> Vec<Window> {
    assert!(window_size > 0 && step_size > 0);
    let last_start_exclusive = (frame_count + 1).saturating_sub(window_size);
    (1..last_start_exclusive).step_by(step_size).map(|window_start| {
        let window_end = (window_start + window_size + 1).min(frame_count + 1);
        Window::new(sequence_id, window_start, window_end)
    }).collect::<Vec<Window>>()
}
