extern crate color_eyre;
extern crate odometry_batches;

use std::env;
use std::path::Path;
use color_eyre::eyre::{ensure, eyre, Result};
use tracing_subscriber::EnvFilter;
use odometry_batches::epoch::evaluation::test_batch;
use odometry_batches::io::kitti_loader::KittiOdometry;


fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut args = env::args().skip(1);
    let basedir = args.next().ok_or_else(|| eyre!("usage: evaluate_sequence <kitti dir> <sequence>"))?;
    let sequence = args.next().ok_or_else(|| eyre!("usage: evaluate_sequence <kitti dir> <sequence>"))?;

    let batch = test_batch(&KittiOdometry::new(true), Path::new(&basedir), &sequence)?;
    ensure!(!batch.x[0].is_empty() && batch.y.nrows() > 0, "sequence {} needs at least two frames", sequence);
    println!("x: {} x {} frames of {:?}", batch.x.len(), batch.x[0].len(), batch.x[0][0].shape());
    println!("y: {} x {}", batch.y.nrows(), batch.y.ncols());
    println!("final relative pose: {}", batch.y.row(batch.y.nrows()-1));
    Ok(())
}
