use std::fs::File;
use std::io::BufReader;
use std::path::{Path,PathBuf};
use color_eyre::eyre::{ensure, Result, WrapErr};
use serde::{Serialize, Deserialize};

/**
 * Construction time parameters of an epoch.
 */
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct EpochConfig {
    /// Where the kitti `poses` and `sequences` folders are located
    pub datadir: PathBuf,
    /// Where the precomputed flow fields are located, one folder per sequence
    pub flowdir: PathBuf,
    pub train_seq_nos: Vec<String>,
    /// Number of flow frames per window
    pub window_size: usize,
    /// Offset between the starts of consecutive windows
    pub step_size: usize,
    /// Samples per batch. The final batch of an epoch may be smaller.
    pub batch_size: usize,
    #[serde(default)]
    pub seed: Option<u64>
}

impl EpochConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.window_size > 0, "window_size has to be positive");
        ensure!(self.step_size > 0, "step_size has to be positive");
        ensure!(self.batch_size > 0, "batch_size has to be positive");
        ensure!(!self.train_seq_nos.is_empty(), "train_seq_nos is empty");
        Ok(())
    }

    pub fn leaves_coverage_gap(&self) -> bool {
        self.step_size > self.window_size
    }
}

pub fn load_epoch_config(file_path: &Path) -> Result<EpochConfig> {
    let file = File::open(file_path).wrap_err_with(|| format!("could not open config: {}", file_path.display()))?;
    let config: EpochConfig = serde_yaml::from_reader(BufReader::new(file)).wrap_err_with(|| format!("could not parse config: {}", file_path.display()))?;
    config.validate()?;
    Ok(config)
}
