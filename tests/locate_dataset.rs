use std::fs;
use std::path::Path;

use contract_sampler::locate::{locate, locate_from_cwd, LocateError, DEFAULT_TARGET};
use tempfile::tempdir;

#[test]
fn dataset_two_levels_above_is_found() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("project");
    fs::create_dir_all(project.join("Datasets/contracts/2019")).unwrap();
    let start = project.join("code/notebooks");
    fs::create_dir_all(&start).unwrap();

    let found = locate(DEFAULT_TARGET, &start).unwrap();
    assert_eq!(found, fs::canonicalize(project.join("Datasets")).unwrap());
}

#[test]
fn closest_dataset_wins() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Datasets")).unwrap();
    let inner = dir.path().join("a");
    fs::create_dir_all(inner.join("Datasets")).unwrap();
    let start = inner.join("b");
    fs::create_dir_all(&start).unwrap();

    assert_eq!(
        locate(DEFAULT_TARGET, &start).unwrap(),
        fs::canonicalize(inner.join("Datasets")).unwrap()
    );
}

#[test]
fn dataset_five_levels_above_is_not_found() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Datasets")).unwrap();
    let start = dir.path().join("1/2/3/4/5");
    fs::create_dir_all(&start).unwrap();

    match locate(DEFAULT_TARGET, &start) {
        Err(LocateError::NotFound { start: failed_from, levels, .. }) => {
            assert_eq!(failed_from, fs::canonicalize(&start).unwrap());
            assert_eq!(levels, 4);
        }
        other => panic!("expected a not-found error, got {other:?}"),
    }
}

// The only test of this binary that moves the current directory
#[test]
fn relative_starts_walk_up_real_parents() {
    let dir = tempdir().unwrap();
    let project = fs::canonicalize(dir.path()).unwrap();
    fs::create_dir(project.join("Datasets")).unwrap();
    let nested = project.join("a/b");
    fs::create_dir_all(nested.join("c")).unwrap();
    let expected = project.join("Datasets");

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(&nested).unwrap();
    let from_dot = locate(DEFAULT_TARGET, Path::new("."));
    let from_dotdot = locate(DEFAULT_TARGET, Path::new(".."));
    let from_child_parent = locate(DEFAULT_TARGET, Path::new("c/.."));
    let from_cwd = locate_from_cwd(DEFAULT_TARGET);
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(from_dot.unwrap(), expected);
    assert_eq!(from_dotdot.unwrap(), expected);
    assert_eq!(from_child_parent.unwrap(), expected);
    assert_eq!(from_cwd.unwrap(), expected);
}
