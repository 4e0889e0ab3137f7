extern crate color_eyre;
extern crate odometry_batches;

use std::env;
use std::path::Path;
use color_eyre::eyre::{eyre, Result};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;
use odometry_batches::{Epoch,load_epoch_config};
use odometry_batches::io::kitti_loader::KittiOdometry;


fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config_path = env::args().nth(1).ok_or_else(|| eyre!("usage: train_epoch <config.yaml>"))?;
    let config = load_epoch_config(Path::new(&config_path))?;
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy()
    };

    let mut epoch = Epoch::new(config, KittiOdometry::new(false), &mut rng)?;
    println!("{} windows in {} batches", epoch.len(), epoch.num_batches());

    let mut batch_count = 0;
    while !epoch.is_complete() {
        let batch = epoch.next_batch()?;
        let frame_shape = batch.x[0][0].shape();
        println!("batch {}: {} samples, frames {:?}, poses {}x{}", batch_count, batch.len(), frame_shape, batch.y[0].nrows(), batch.y[0].ncols());
        batch_count += 1;
    }

    println!("epoch complete after {} batches", batch_count);
    Ok(())
}
