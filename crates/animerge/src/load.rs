// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup loading of addon source files.

use std::path::{Path, PathBuf};

use animerge_core::AnimergeError;
use animerge_engine::AggregationEngine;
use tracing::{info, warn};

/// Outcome of loading the configured addon sources.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub rejected: Vec<PathBuf>,
}

/// Read and register every source in `paths`, in order.
///
/// A rejected source is logged and skipped. With `strict`, the first
/// rejection aborts loading and is returned as an error.
pub async fn load_sources(
    engine: &AggregationEngine,
    paths: &[PathBuf],
    strict: bool,
) -> Result<LoadSummary, AnimergeError> {
    let mut summary = LoadSummary::default();

    for path in paths {
        match load_one(engine, path).await {
            Ok(name) => {
                info!(path = %path.display(), addon = %name, "addon source loaded");
                summary.loaded += 1;
            }
            Err(e) if strict => {
                return Err(AnimergeError::InvalidSource(format!(
                    "{}: {e}",
                    path.display()
                )));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping addon source");
                summary.rejected.push(path.clone());
            }
        }
    }

    Ok(summary)
}

async fn load_one(engine: &AggregationEngine, path: &Path) -> Result<String, AnimergeError> {
    let source = tokio::fs::read_to_string(path).await.map_err(|e| {
        AnimergeError::InvalidSource(format!("cannot read {}: {e}", path.display()))
    })?;
    let manifest = engine.try_load_addon_from_source(&source)?;
    Ok(manifest.name)
}
