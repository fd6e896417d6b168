//! Release builder: sequences per-target compilation and artifact placement.
//!
//! Targets build strictly one at a time, in list order. The first failure of
//! any step aborts the whole run; artifacts already copied for earlier
//! targets are left in place.

use anyhow::{Context, Result, bail};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::runtime::Runtime;
use crate::target::{DEFAULT_TARGETS, TargetSpec};
use crate::toolchain::{PackageMeta, Toolchain};

/// Run a full distribution build: query package metadata, then build and
/// place an artifact for every default target.
#[tracing::instrument(skip(runtime, toolchain))]
pub fn dist<R: Runtime, T: Toolchain>(
    runtime: &R,
    toolchain: &T,
    config: &Config,
) -> Result<Vec<PathBuf>> {
    let meta = toolchain
        .package_meta()
        .context("Failed to query package metadata")?;

    let binary_name = config.resolved_binary_name(&meta);
    let out_dir = config.resolved_out_dir(&meta);
    debug!("Distributing {} into {:?}", binary_name, out_dir);

    build_all(
        runtime,
        toolchain,
        &meta,
        &binary_name,
        &out_dir,
        DEFAULT_TARGETS,
    )
}

/// Build a release binary for each target spec and copy it into `out_dir`
/// under its platform-tagged name. Returns the produced paths in build order.
pub fn build_all<R: Runtime, T: Toolchain>(
    runtime: &R,
    toolchain: &T,
    meta: &PackageMeta,
    binary_name: &str,
    out_dir: &Path,
    targets: &[TargetSpec],
) -> Result<Vec<PathBuf>> {
    ensure_distinct_output_names(binary_name, targets)?;

    runtime
        .create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {:?}", out_dir))?;

    let mut produced = Vec::with_capacity(targets.len());
    for spec in targets {
        toolchain
            .build_release(spec.triple)
            .with_context(|| format!("Build failed for target {}", spec.triple))?;

        let source = meta.artifact_path(binary_name, spec);
        if !runtime.exists(&source) {
            bail!(
                "No artifact at {:?} after building target {}",
                source,
                spec.triple
            );
        }

        let dest = out_dir.join(spec.artifact_file_name(binary_name));
        runtime
            .copy(&source, &dest)
            .with_context(|| format!("Failed to copy artifact for target {}", spec.triple))?;

        info!("Placed {:?}", dest);
        produced.push(dest);
    }

    Ok(produced)
}

/// Distinct output names are what makes the shared output directory safe to
/// write without coordination.
fn ensure_distinct_output_names(binary_name: &str, targets: &[TargetSpec]) -> Result<()> {
    for (i, a) in targets.iter().enumerate() {
        for b in &targets[i + 1..] {
            if a.artifact_file_name(binary_name) == b.artifact_file_name(binary_name) {
                bail!(
                    "targets {} and {} would both produce {}",
                    a.triple,
                    b.triple,
                    a.artifact_file_name(binary_name)
                );
            }
        }
    }
    Ok(())
}
