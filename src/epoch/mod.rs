use color_eyre::eyre::{Result, WrapErr};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::EpochConfig;
use crate::io::{count_flow_frames, sequence_dataset::SequenceDataset};
use self::batch::Batch;
use self::pool::{SharedWindowPool,WindowPool};
use self::sample::{Sample,SampleBuilder};
use self::window::{partition,Window};

pub mod batch;
pub mod evaluation;
pub mod pool;
pub mod sample;
pub mod window;

/**
 * Windows of all sequences, in sequence order. Warns once if step_size > window_size
 * since frames between windows are then never seen.
 */
pub fn partition_sequences(frame_counts: &[(String,usize)], window_size: usize, step_size: usize) -> Vec<Window> {
    if step_size > window_size {
        warn!("step_size {} greater than window_size {}. This will result in unseen sequence frames.", step_size, window_size);
    }

    frame_counts.iter().flat_map(|(seq_no, frame_count)| partition(seq_no, *frame_count, window_size, step_size)).collect::<Vec<Window>>()
}

/**
 * Serves batches of windows of all training sequences, each window exactly once.
 */
pub struct Epoch<D: SequenceDataset> {
    config: EpochConfig,
    pool: WindowPool,
    builder: SampleBuilder<D>
}

impl<D: SequenceDataset> Epoch<D> {

    /// Frame counts are taken from the number of flow files per sequence.
    pub fn new<R: Rng + ?Sized>(config: EpochConfig, dataset: D, rng: &mut R) -> Result<Epoch<D>> {
        config.validate()?;
        let frame_counts = config.train_seq_nos.iter().map(|seq_no| {
            count_flow_frames(&config.flowdir, seq_no).map(|count| (seq_no.clone(), count))
        }).collect::<Result<Vec<(String,usize)>>>().wrap_err("could not count flow frames of the training sequences")?;
        Epoch::from_frame_counts(config, dataset, &frame_counts, rng)
    }

    pub fn from_frame_counts<R: Rng + ?Sized>(config: EpochConfig, dataset: D, frame_counts: &[(String,usize)], rng: &mut R) -> Result<Epoch<D>> {
        config.validate()?;
        let windows = partition_sequences(frame_counts, config.window_size, config.step_size);
        info!("partitioned {} sequences into {} windows", frame_counts.len(), windows.len());
        let pool = WindowPool::new(windows, rng);
        let builder = SampleBuilder::new(dataset, &config.datadir, &config.flowdir, config.window_size);
        Ok(Epoch { config, pool, builder })
    }

    pub fn config(&self) -> &EpochConfig {
        &self.config
    }

    pub fn is_complete(&self) -> bool {
        self.pool.is_empty()
    }

    /// Windows in this epoch
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.len() == 0
    }

    pub fn remaining(&self) -> usize {
        self.pool.remaining()
    }

    pub fn windows_drawn(&self) -> usize {
        self.pool.drawn()
    }

    pub fn num_batches(&self) -> usize {
        (self.pool.len() + self.config.batch_size - 1)/self.config.batch_size
    }

    pub fn next_batch(&mut self) -> Result<Batch> {
        let batch_size = self.config.batch_size;
        self.next_batch_sized(batch_size)
    }

    /**
     * Up to batch_size samples. The last batch of an epoch may be short and once the
     * epoch is complete the batch is empty.
     */
    pub fn next_batch_sized(&mut self, batch_size: usize) -> Result<Batch> {
        let mut samples = Vec::<Sample>::with_capacity(batch_size);
        for _ in 0..batch_size {
            let window = match self.pool.pop() {
                Some(window) => window,
                None => break
            };
            debug!("drawing window {:?}", window);
            samples.push(self.builder.build(&window)?);
        }
        Ok(Batch::stack(samples))
    }

    /**
     * Hands the remaining windows to a pool that loader threads can share, together
     * with the sample builder to load them.
     */
    pub fn into_shared(self) -> (SharedWindowPool, SampleBuilder<D>) {
        (SharedWindowPool::new(self.pool), self.builder)
    }
}

impl<D: SequenceDataset> Iterator for Epoch<D> {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.is_complete() {
            true => None,
            false => Some(self.next_batch())
        }
    }
}
