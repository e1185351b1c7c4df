//! Helpers shared by the unit tests.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

fn mentions_train(path: &Path) -> bool {
    path.to_string_lossy().contains("train")
}

/// Scratch directory whose full path does not contain `"train"`, so files
/// created in it load as an evaluation split unless their own name says
/// otherwise.
pub(crate) fn eval_tempdir() -> TempDir {
    let roots = [
        std::env::temp_dir(),
        PathBuf::from(env!("CARGO_MANIFEST_DIR")),
    ];

    for root in roots.iter().filter(|root| !mentions_train(root)) {
        for _ in 0..8 {
            match tempfile::Builder::new().prefix("stance").tempdir_in(root) {
                Ok(dir) if !mentions_train(dir.path()) => return dir,
                Ok(_) => continue,
                Err(_) => break,
            }
        }
    }

    panic!("no writable scratch directory without \"train\" in its path");
}

#[test]
fn eval_tempdir_loads_as_eval_split() {
    use crate::dataset::Split;

    let dir = eval_tempdir();
    assert!(!mentions_train(dir.path()));
    assert_eq!(Split::from_path(&dir.path().join("raw_val_all.csv")), Split::Eval);
    assert_eq!(
        Split::from_path(&dir.path().join("raw_train_all.csv")),
        Split::Train
    );
}
