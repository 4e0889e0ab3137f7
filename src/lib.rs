pub mod config;
pub mod epoch;
pub mod image;
pub mod io;
pub mod numerics;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

pub use config::{EpochConfig,load_epoch_config};
pub use epoch::{Epoch,batch::Batch,sample::Sample,window::Window};
