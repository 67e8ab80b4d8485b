//! Leaf-directory discovery.
//!
//! The input tree is organizational above and flat at the bottom:
//! `<root>/<variable>/<forecast_month>/` directories hold the actual maps.
//! A leaf is any directory with no subdirectories; only leaves are groups.

use std::path::{Path, PathBuf};

use crate::error::CompositeError;

/// Collect every leaf directory under `root`, sorted by path.
///
/// `root` itself counts as a leaf when it has no subdirectories. Sorted
/// output keeps the run order (and therefore the log order) reproducible.
pub fn find_leaf_dirs(root: &Path) -> Result<Vec<PathBuf>, CompositeError> {
    let mut leaves = Vec::new();
    visit(root, &mut leaves)?;
    leaves.sort();
    Ok(leaves)
}

fn visit(dir: &Path, leaves: &mut Vec<PathBuf>) -> Result<(), CompositeError> {
    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }

    if subdirs.is_empty() {
        leaves.push(dir.to_path_buf());
        return Ok(());
    }
    for subdir in subdirs {
        visit(&subdir, leaves)?;
    }
    Ok(())
}
