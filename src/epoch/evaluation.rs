extern crate nalgebra as na;

use std::path::Path;
use color_eyre::eyre::{ensure, eyre, Result};
use na::DMatrix;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::Float;
use crate::image::Frame;
use crate::io::sequence_dataset::{SequenceData,SequenceDataset};
use crate::epoch::sample::stack_pose_vectors;
use crate::numerics::pose::process_poses;

/**
 * A batch of one consecutive run of frames.
 * x: one entry wrapping the n-1 stacked frame pairs, y: (n-1) x 6
 */
#[derive(Debug,Clone)]
pub struct SequenceBatch {
    pub x: Vec<Vec<Frame>>,
    pub y: DMatrix<Float>
}

/**
 * Subtracts sum(left images)/batch_frames from every left image and stacks each
 * image with its successor along the channel axis.
 */
pub fn stacked_rgb_pairs(data: &SequenceData, batch_frames: usize) -> Result<Vec<Frame>> {
    ensure!(data.rgb.is_some(), "sequence data carries no images");
    let rgbs = data.left_images();
    ensure!(!rgbs.is_empty(), "sequence data carries no images");
    let mean_rgb = Frame::average(&rgbs, batch_frames as Float);
    let centered = rgbs.iter().map(|rgb| rgb.subtract(&mean_rgb)).collect::<Vec<Frame>>();
    Ok(centered.windows(2).map(|pair| Frame::dstack(&pair[0],&pair[1])).collect::<Vec<Frame>>())
}

fn sequence_batch(data: &SequenceData, batch_frames: usize) -> Result<SequenceBatch> {
    let x = vec![stacked_rgb_pairs(data, batch_frames)?];
    let y = stack_pose_vectors(&process_poses(&data.poses)?);
    Ok(SequenceBatch { x, y })
}

/**
 * The whole sequence as one batch, for evaluation.
 */
pub fn test_batch<D: SequenceDataset>(dataset: &D, basedir: &Path, sequence_id: &str) -> Result<SequenceBatch> {
    let data = dataset.load(basedir, sequence_id, None)?;
    let frame_count = data.len();
    sequence_batch(&data, frame_count)
}

/**
 * batch_frames consecutive frames of a randomly chosen training sequence,
 * starting at a uniformly drawn frame.
 */
pub fn random_window_batch<D: SequenceDataset, R: Rng + ?Sized>(dataset: &D, basedir: &Path, batch_frames: usize, train_seqs: &[String], rng: &mut R) -> Result<SequenceBatch> {
    ensure!(batch_frames > 1, "a batch needs at least two frames, got {}", batch_frames);
    let sequence = train_seqs.choose(rng).ok_or_else(|| eyre!("no training sequences to choose from"))?;

    let frame_count = dataset.frame_count(basedir, sequence)?;
    ensure!(frame_count >= batch_frames, "sequence {} has {} frames, fewer than {}", sequence, frame_count, batch_frames);
    let first_frame = rng.gen_range(0..=frame_count - batch_frames);
    let last_frame = first_frame + batch_frames;

    let data = dataset.load(basedir, sequence, Some(first_frame..last_frame))?;
    sequence_batch(&data, batch_frames)
}
