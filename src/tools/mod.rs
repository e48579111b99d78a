//! Batch helpers used by the `qrtool` binary

use crate::config::IMAGE_EXTENSIONS;
use crate::decoder::decode_file;
use crate::error::Result;
use crate::models::DecodedResult;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Outcome of decoding one file in a batch
#[derive(Debug)]
pub struct DecodeReport {
    /// File that was decoded
    pub path: PathBuf,
    /// Decode outcome
    pub outcome: Result<DecodedResult>,
    /// Wall time spent on load + decode
    pub elapsed: Duration,
}

/// Expand files and directories into a sorted list of image files
///
/// Directories are walked recursively and filtered by extension; explicit
/// files are kept as given so that errors about them can be reported.
pub fn expand_inputs<P: AsRef<Path>>(inputs: &[P]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            files.extend(collect_images(input));
        } else {
            files.push(input.to_path_buf());
        }
    }
    files.sort();
    files.dedup();
    files
}

/// Decode every path on the rayon pool, keeping input order
pub fn decode_paths(paths: &[PathBuf]) -> Vec<DecodeReport> {
    paths
        .par_iter()
        .map(|path| {
            let start = Instant::now();
            let outcome = decode_file(path);
            DecodeReport {
                path: path.clone(),
                outcome,
                elapsed: start.elapsed(),
            }
        })
        .collect()
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Skipping {}: {}", dir.display(), err);
                continue;
            }
        };

        for entry in entries.flatten() {
            // file_type() does not follow symlinks, so linked directories are skipped
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();
            if file_type.is_dir() {
                stack.push(path);
            } else if has_image_extension(&path) {
                images.push(path);
            }
        }
    }

    images
}
