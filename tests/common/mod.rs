#![allow(dead_code)]
extern crate nalgebra as na;

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;
use color_eyre::eyre::{ensure, eyre, Result};
use na::{Matrix3, Matrix4, Vector3, Rotation3, DMatrix};

use odometry_batches::Float;
use odometry_batches::config::EpochConfig;
use odometry_batches::image::{Frame, image_encoding::ImageEncoding};
use odometry_batches::io::flow::{write_flow, flow_file_name};
use odometry_batches::io::sequence_dataset::{SequenceData, SequenceDataset};
use odometry_batches::numerics::pose::se3;

/// Poses held in memory. Frame n is a translation of n along x, rotated by n*0.01 in yaw.
pub struct InMemoryDataset {
    pub sequences: HashMap<String, Vec<Matrix4<Float>>>,
    pub image_shape: Option<(usize, usize)>
}

impl InMemoryDataset {
    pub fn new(sequences: &[(&str, usize)]) -> InMemoryDataset {
        let sequences = sequences.iter().map(|(seq, n)| (seq.to_string(), (0..*n).map(straight_line_pose).collect())).collect();
        InMemoryDataset { sequences, image_shape: None }
    }

    pub fn with_images(mut self, height: usize, width: usize) -> InMemoryDataset {
        self.image_shape = Some((height, width));
        self
    }
}

impl SequenceDataset for InMemoryDataset {
    fn load(&self, _basedir: &Path, sequence_id: &str, frames: Option<Range<usize>>) -> Result<SequenceData> {
        let all_poses = self.sequences.get(sequence_id).ok_or_else(|| eyre!("unknown sequence {}", sequence_id))?;
        let frames = frames.unwrap_or(0..all_poses.len());
        ensure!(frames.end <= all_poses.len(), "frames {:?} out of range", frames);
        let rgb = self.image_shape.map(|(h, w)| {
            frames.clone().map(|n| (constant_frame(h, w, 3, n as Float), constant_frame(h, w, 3, -(n as Float)))).collect()
        });
        Ok(SequenceData { poses: all_poses[frames].to_vec(), rgb })
    }

    fn frame_count(&self, _basedir: &Path, sequence_id: &str) -> Result<usize> {
        self.sequences.get(sequence_id).map(|p| p.len()).ok_or_else(|| eyre!("unknown sequence {}", sequence_id))
    }
}

pub fn straight_line_pose(frame_no: usize) -> Matrix4<Float> {
    let rotation = Rotation3::from_euler_angles(0.0, 0.0, 0.01*(frame_no as Float));
    se3(&Vector3::new(frame_no as Float, 0.0, 0.0), rotation.matrix())
}

pub fn rotation(roll: Float, pitch: Float, yaw: Float) -> Matrix3<Float> {
    Rotation3::from_euler_angles(roll, pitch, yaw).into_inner()
}

pub fn constant_frame(height: usize, width: usize, channels: usize, value: Float) -> Frame {
    Frame::from_channels(vec![DMatrix::<Float>::from_element(height, width, value); channels], ImageEncoding::F64)
}

/// Flow files 1..=count, flow n filled with (n, -n).
pub fn write_flow_sequence(flowdir: &Path, sequence_id: &str, count: usize, height: usize, width: usize) {
    let seq_path = flowdir.join(sequence_id);
    std::fs::create_dir_all(&seq_path).unwrap();
    for n in 1..=count {
        let flow = Frame::from_channels(vec![
            DMatrix::<Float>::from_element(height, width, n as Float),
            DMatrix::<Float>::from_element(height, width, -(n as Float))
        ], ImageEncoding::F32);
        write_flow(&seq_path.join(flow_file_name(n)), &flow).unwrap();
    }
}

pub fn config(datadir: &Path, flowdir: &Path, train_seq_nos: &[&str], window_size: usize, step_size: usize, batch_size: usize) -> EpochConfig {
    EpochConfig {
        datadir: datadir.to_path_buf(),
        flowdir: flowdir.to_path_buf(),
        train_seq_nos: train_seq_nos.iter().map(|s| s.to_string()).collect(),
        window_size,
        step_size,
        batch_size,
        seed: None
    }
}
