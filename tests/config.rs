use std::fs;
use std::path::PathBuf;

use odometry_batches::load_epoch_config;

#[test]
fn test_load_epoch_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("epoch.yaml");
    fs::write(&path, "datadir: /data/kitti\nflowdir: /data/flow\ntrain_seq_nos: [\"00\", \"02\"]\nwindow_size: 10\nstep_size: 5\nbatch_size: 8\n").unwrap();

    let config = load_epoch_config(&path).unwrap();
    assert_eq!(config.datadir, PathBuf::from("/data/kitti"));
    assert_eq!(config.flowdir, PathBuf::from("/data/flow"));
    assert_eq!(config.train_seq_nos, vec!["00".to_string(), "02".to_string()]);
    assert_eq!((config.window_size, config.step_size, config.batch_size), (10, 5, 8));
    assert_eq!(config.seed, None);
    assert!(!config.leaves_coverage_gap());
}

#[test]
fn test_config_round_trips_through_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("epoch.yaml");
    fs::write(&path, "datadir: a\nflowdir: b\ntrain_seq_nos: [\"01\"]\nwindow_size: 3\nstep_size: 4\nbatch_size: 2\nseed: 17\n").unwrap();
    let config = load_epoch_config(&path).unwrap();
    assert_eq!(config.seed, Some(17));
    assert!(config.leaves_coverage_gap());

    let serialized = serde_yaml::to_string(&config).unwrap();
    fs::write(&path, serialized).unwrap();
    assert_eq!(load_epoch_config(&path).unwrap(), config);
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("epoch.yaml");

    fs::write(&path, "datadir: a\nflowdir: b\ntrain_seq_nos: [\"01\"]\nwindow_size: 3\nstep_size: 0\nbatch_size: 2\n").unwrap();
    assert!(load_epoch_config(&path).is_err());

    fs::write(&path, "datadir: a\nflowdir: b\nwindow_size: 3\nstep_size: 1\nbatch_size: 2\n").unwrap();
    assert!(load_epoch_config(&path).is_err());

    assert!(load_epoch_config(&dir.path().join("missing.yaml")).is_err());
}
