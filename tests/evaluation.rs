mod common;

use std::path::Path;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use odometry_batches::io::sequence_dataset::{SequenceData, SequenceDataset};
use odometry_batches::epoch::evaluation::{stacked_rgb_pairs, test_batch, random_window_batch};
use common::{InMemoryDataset, constant_frame};

#[test]
fn test_stacked_pairs_are_mean_centered_neighbours() {
    let rgb = (1..=3).map(|v| (constant_frame(2, 2, 3, v as f64), constant_frame(2, 2, 3, 0.0))).collect();
    let data = SequenceData { poses: Vec::new(), rgb: Some(rgb) };

    let pairs = stacked_rgb_pairs(&data, 3).unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].shape(), (2, 2, 6));
    assert!((0..3).all(|c| pairs[0].get(1, 1, c) == -1.0 && pairs[0].get(1, 1, c+3) == 0.0));
    assert!((0..3).all(|c| pairs[1].get(0, 1, c) == 0.0 && pairs[1].get(0, 1, c+3) == 1.0));
}

#[test]
fn test_stacked_pairs_need_images() {
    let data = SequenceData { poses: Vec::new(), rgb: None };
    assert!(stacked_rgb_pairs(&data, 3).is_err());
}

#[test]
fn test_batch_covers_whole_sequence() {
    let dataset = InMemoryDataset::new(&[("03", 6)]).with_images(4, 5);
    let batch = test_batch(&dataset, Path::new("/kitti"), "03").unwrap();

    assert_eq!(batch.x.len(), 1);
    assert_eq!(batch.x[0].len(), 5);
    assert!(batch.x[0].iter().all(|f| f.shape() == (4, 5, 6)));
    assert_eq!(batch.y.shape(), (5, 6));
    assert!((batch.y[(4, 3)].hypot(batch.y[(4, 4)]) - 5.0).abs() < 1e-12);
}

#[test]
fn test_batch_without_images_fails() {
    let dataset = InMemoryDataset::new(&[("03", 6)]);
    assert!(test_batch(&dataset, Path::new("/kitti"), "03").is_err());
}

#[test]
fn test_random_window_batch_is_relative_to_its_first_frame() {
    let dataset = InMemoryDataset::new(&[("00", 10), ("01", 12)]).with_images(2, 2);
    let train_seqs = vec!["00".to_string(), "01".to_string()];
    let mut rng = SmallRng::seed_from_u64(21);

    for _ in 0..20 {
        let batch = random_window_batch(&dataset, Path::new("/kitti"), 4, &train_seqs, &mut rng).unwrap();
        assert_eq!(batch.x[0].len(), 3);
        assert_eq!(batch.y.shape(), (3, 6));
        for k in 0..3 {
            let steps = (k + 1) as f64;
            assert!((batch.y[(k, 2)] - 0.01*steps).abs() < 1e-12);
            assert!((batch.y[(k, 3)].hypot(batch.y[(k, 4)]) - steps).abs() < 1e-12);
        }
    }
}

#[test]
fn test_random_window_batch_rejects_short_sequences() {
    let dataset = InMemoryDataset::new(&[("00", 3)]).with_images(2, 2);
    let mut rng = SmallRng::seed_from_u64(21);
    assert!(random_window_batch(&dataset, Path::new("/kitti"), 4, &["00".to_string()], &mut rng).is_err());
    assert!(random_window_batch(&dataset, Path::new("/kitti"), 4, &[], &mut rng).is_err());
    assert_eq!(dataset.frame_count(Path::new("/kitti"), "00").unwrap(), 3);
}
