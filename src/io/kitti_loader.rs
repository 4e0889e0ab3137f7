extern crate nalgebra as na;
extern crate image as image_rs;

use std::collections::HashMap;
use std::fs::{self,File};
use std::io::{BufRead,BufReader};
use std::ops::Range;
use std::path::{Path,PathBuf};
use std::sync::{Arc,Mutex};
use color_eyre::eyre::{bail, ensure, eyre, Result, WrapErr};
use na::Matrix4;

use crate::Float;
use crate::image::Frame;
use crate::io::sequence_dataset::{SequenceData,SequenceDataset};

/**
 * KITTI odometry layout:
 *  basedir/poses/<seq>.txt                  one row-major 3x4 pose per line
 *  basedir/sequences/<seq>/image_2/<n>.png    left camera
 *  basedir/sequences/<seq>/image_3/<n>.png    right camera
 */
#[derive(Debug)]
pub struct KittiOdometry {
    pub load_rgb: bool,
    /// Parsed pose files, keyed by pose file path. Loaded once per sequence.
    poses: Mutex<HashMap<PathBuf,Arc<Vec<Matrix4<Float>>>>>
}

impl KittiOdometry {
    pub fn new(load_rgb: bool) -> KittiOdometry {
        KittiOdometry { load_rgb, poses: Mutex::new(HashMap::new()) }
    }

    fn sequence_poses(&self, basedir: &Path, sequence_id: &str) -> Result<Arc<Vec<Matrix4<Float>>>> {
        let poses_path = KittiOdometry::poses_path(basedir, sequence_id);
        let mut cache = self.poses.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(poses) = cache.get(&poses_path) {
            return Ok(poses.clone());
        }
        let poses = Arc::new(load_poses(&poses_path)?);
        cache.insert(poses_path, poses.clone());
        Ok(poses)
    }

    pub fn poses_path(basedir: &Path, sequence_id: &str) -> PathBuf {
        basedir.join("poses").join(format!("{}.txt",sequence_id))
    }

    pub fn image_path(basedir: &Path, sequence_id: &str, camera: &str, frame_no: usize) -> PathBuf {
        basedir.join("sequences").join(sequence_id).join(camera).join(format!("{:06}.png",frame_no))
    }
}

impl SequenceDataset for KittiOdometry {
    fn load(&self, basedir: &Path, sequence_id: &str, frames: Option<Range<usize>>) -> Result<SequenceData> {
        let all_poses = self.sequence_poses(basedir, sequence_id)?;
        let frames = frames.unwrap_or(0..all_poses.len());
        ensure!(frames.start <= frames.end && frames.end <= all_poses.len(), "frames {:?} out of range for sequence {} with {} poses", frames, sequence_id, all_poses.len());

        let poses = all_poses[frames.clone()].to_vec();
        let rgb = match self.load_rgb {
            true => Some(frames.map(|frame_no| -> Result<(Frame,Frame)> {
                let left = load_image_as_rgb(&KittiOdometry::image_path(basedir, sequence_id, "image_2", frame_no))?;
                let right = load_image_as_rgb(&KittiOdometry::image_path(basedir, sequence_id, "image_3", frame_no))?;
                Ok((left,right))
            }).collect::<Result<Vec<(Frame,Frame)>>>()?),
            false => None
        };

        Ok(SequenceData { poses, rgb })
    }

    fn frame_count(&self, basedir: &Path, sequence_id: &str) -> Result<usize> {
        let image_dir = basedir.join("sequences").join(sequence_id).join("image_2");
        let entries = fs::read_dir(&image_dir).wrap_err_with(|| format!("could not list {}", image_dir.display()))?;
        let mut count = 0;
        for entry in entries {
            if entry?.file_type()?.is_file() {
                count += 1;
            }
        }
        Ok(count)
    }
}

pub fn load_poses(file_path: &Path) -> Result<Vec<Matrix4<Float>>> {
    let file = File::open(file_path).wrap_err_with(|| format!("could not open pose file: {}", file_path.display()))?;
    let reader = BufReader::new(file);
    let mut poses = Vec::<Matrix4<Float>>::new();

    for (line_no, line) in reader.lines().enumerate() {
        let contents = line?;
        if contents.trim().is_empty() {
            continue;
        }
        poses.push(parse_pose_line(&contents).wrap_err_with(|| format!("{}:{}", file_path.display(), line_no+1))?);
    }

    Ok(poses)
}

/**
 * 12 values of a row-major 3x4 [R|t], the homogeneous row is appended.
 */
pub fn parse_pose_line(line: &str) -> Result<Matrix4<Float>> {
    let values = line.split_whitespace().map(|x| x.parse::<Float>().map_err(|e| eyre!("could not parse '{}': {}", x, e))).collect::<Result<Vec<Float>>>()?;
    if values.len() != 12 {
        bail!("expected 12 values for a 3x4 pose, got {}", values.len());
    }
    let mut pose = Matrix4::<Float>::identity();
    for (idx, value) in values.iter().enumerate() {
        pose[(idx/4, idx%4)] = *value;
    }
    Ok(pose)
}

pub fn load_image_as_rgb(file_path: &Path) -> Result<Frame> {
    let rgb_image = image_rs::open(file_path).wrap_err_with(|| format!("could not load image: {}", file_path.display()))?.to_rgb8();
    Ok(Frame::from_rgb_image(&rgb_image))
}
