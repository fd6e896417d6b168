//! Toolchain abstraction.
//!
//! The builder does not compile anything itself; it drives an external
//! toolchain through this trait. Two operations are consumed: querying
//! package metadata and compiling a release build for a target triple.

mod cargo;

use anyhow::Result;
use std::path::PathBuf;

use crate::target::TargetSpec;

pub use cargo::CargoToolchain;

/// Package metadata reported by the toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMeta {
    /// Name of the binary the project builds.
    pub binary_name: String,
    /// Root directory of the project.
    pub workspace_root: PathBuf,
    /// Directory the toolchain places build output under.
    pub target_directory: PathBuf,
}

impl PackageMeta {
    /// Toolchain-defined location of a release artifact for the given target.
    pub fn artifact_path(&self, binary_name: &str, spec: &TargetSpec) -> PathBuf {
        self.target_directory
            .join(spec.triple)
            .join("release")
            .join(spec.built_file_name(binary_name))
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Toolchain: Send + Sync {
    /// Query package metadata for the project in the current directory.
    fn package_meta(&self) -> Result<PackageMeta>;

    /// Compile a release build for the given target triple, blocking until
    /// the toolchain exits. Non-zero exit is an error naming the triple.
    fn build_release(&self, triple: &str) -> Result<()>;
}
