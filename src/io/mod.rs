use std::fs;
use std::path::{Path,PathBuf};
use color_eyre::eyre::{Result, WrapErr};

pub mod flow;
pub mod kitti_loader;
pub mod sequence_dataset;

pub fn sequence_flow_dir(flowdir: &Path, sequence_id: &str) -> PathBuf {
    flowdir.join(sequence_id)
}

/**
 * Number of precomputed flow frames of a sequence, i.e. the number of .flo
 * files in flowdir/<seq>/.
 */
pub fn count_flow_frames(flowdir: &Path, sequence_id: &str) -> Result<usize> {
    let seq_path = sequence_flow_dir(flowdir, sequence_id);
    let entries = fs::read_dir(&seq_path).wrap_err_with(|| format!("could not list flow directory {}", seq_path.display()))?;
    let mut count = 0;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == flow::FLOW_EXTENSION) {
            count += 1;
        }
    }
    Ok(count)
}
