extern crate nalgebra as na;

use std::path::{Path,PathBuf};
use color_eyre::eyre::{ensure, Result, WrapErr};
use na::DMatrix;

use crate::Float;
use crate::image::Frame;
use crate::epoch::window::Window;
use crate::io::{flow::{read_flow,flow_file_name}, sequence_flow_dir, sequence_dataset::SequenceDataset};
use crate::numerics::pose::{process_poses,PoseVector};

pub const POSE_VECTOR_DIM: usize = 6;

/**
 * One window worth of training data.
 * x: window_size flow fields, y: window_size x 6 rectified pose vectors.
 */
#[derive(Debug,Clone)]
pub struct Sample {
    pub x: Vec<Frame>,
    pub y: DMatrix<Float>
}

impl Sample {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

pub fn stack_pose_vectors(pose_vectors: &[PoseVector]) -> DMatrix<Float> {
    DMatrix::<Float>::from_fn(pose_vectors.len(), POSE_VECTOR_DIM, |r,c| pose_vectors[r][c])
}

pub struct SampleBuilder<D: SequenceDataset> {
    dataset: D,
    datadir: PathBuf,
    flowdir: PathBuf,
    window_size: usize
}

impl<D: SequenceDataset> SampleBuilder<D> {
    pub fn new(dataset: D, datadir: &Path, flowdir: &Path, window_size: usize) -> SampleBuilder<D> {
        assert!(window_size > 0);
        SampleBuilder { dataset, datadir: datadir.to_path_buf(), flowdir: flowdir.to_path_buf(), window_size }
    }

    /**
     * The flow file <n>.flo holds the motion from frame n-1 to frame n. For a window
     * [start, end) those are the files start+1 .. end-1, which line up with the
     * poses of frames start+1 .. end-1 rectified against frame start.
     * Windows cut short by the end of a sequence are filled up with zeros.
     */
    pub fn build(&self, window: &Window) -> Result<Sample> {
        let frame_nos = window.frame_nos();
        let transitions = window.transitions();
        ensure!(transitions > 0, "window {:?} has no frame transitions", window);
        ensure!(transitions <= self.window_size, "window {:?} is longer than window_size {}", window, self.window_size);
        let needed = self.window_size - transitions;

        let seq_path = sequence_flow_dir(&self.flowdir, &window.sequence_id);
        let mut x = frame_nos.clone().skip(1).map(|frame_no| {
            let flow_path = seq_path.join(flow_file_name(frame_no));
            read_flow(&flow_path)
        }).collect::<Result<Vec<Frame>>>()?;

        let raw_poses = self.dataset.load(&self.datadir, &window.sequence_id, Some(frame_nos))
            .wrap_err_with(|| format!("could not load poses for window {:?}", window))?.poses;
        let mut y = process_poses(&raw_poses)?;

        if needed > 0 {
            let padding = x[0].zeros_like();
            x.extend((0..needed).map(|_| padding.clone()));
            y.extend((0..needed).map(|_| PoseVector::zeros()));
        }

        Ok(Sample { x, y: stack_pose_vectors(&y) })
    }
}
