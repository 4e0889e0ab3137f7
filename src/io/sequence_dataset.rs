extern crate nalgebra as na;

use std::ops::Range;
use std::path::Path;
use color_eyre::eyre::Result;
use na::Matrix4;

use crate::Float;
use crate::image::Frame;

/**
 * Poses and (optionally) stereo images of one frame range of a sequence.
 * poses[i] and rgb[i] belong to the same frame.
 */
#[derive(Debug,Clone)]
pub struct SequenceData {
    pub poses: Vec<Matrix4<Float>>,
    pub rgb: Option<Vec<(Frame,Frame)>>
}

impl SequenceData {
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn left_images(&self) -> Vec<Frame> {
        match &self.rgb {
            Some(pairs) => pairs.iter().map(|(left,_)| left.clone()).collect(),
            None => Vec::new()
        }
    }
}

/**
 * Source of ground truth poses and raw images, addressed by base directory,
 * sequence id and frame range. Implementations have to return poses and images
 * frame aligned and of equal count; callers never re-check this.
 */
pub trait SequenceDataset {
    /// Loads the frames in `frames`, or the whole sequence when `None`.
    fn load(&self, basedir: &Path, sequence_id: &str, frames: Option<Range<usize>>) -> Result<SequenceData>;

    /// Number of frames in the sequence.
    fn frame_count(&self, basedir: &Path, sequence_id: &str) -> Result<usize>;
}
