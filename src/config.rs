//! Resolution of the distribution settings from CLI overrides and package
//! metadata. Everything is optional on the command line; defaults come from
//! the toolchain's view of the project.

use std::path::PathBuf;

use crate::toolchain::PackageMeta;

/// Overrides collected from the command line.
#[derive(Debug, Default, Clone)]
pub struct Config {
    /// Output directory; defaults to `dist` under the workspace root.
    pub out_dir: Option<PathBuf>,
    /// Binary name; defaults to the root package's bin target.
    pub bin: Option<String>,
}

impl Config {
    pub fn resolved_out_dir(&self, meta: &PackageMeta) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| meta.workspace_root.join("dist"))
    }

    pub fn resolved_binary_name(&self, meta: &PackageMeta) -> String {
        self.bin.clone().unwrap_or_else(|| meta.binary_name.clone())
    }
}
