//! Cargo-backed toolchain.
//!
//! Metadata comes from `cargo metadata --format-version 1 --no-deps`;
//! compilation runs `cargo build --release --target <triple>` with inherited
//! stdio so the user sees compiler output as it happens.

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use super::{PackageMeta, Toolchain};

pub struct CargoToolchain {
    cargo: OsString,
}

impl CargoToolchain {
    pub fn new(cargo: OsString) -> Self {
        Self { cargo }
    }

    /// Resolve the cargo executable from the environment.
    ///
    /// `DISTBUILD_CARGO` takes precedence (used by the integration tests to
    /// substitute a fake toolchain), then `CARGO` as set by cargo itself when
    /// this tool runs as a subprocess, then plain `cargo` on PATH.
    pub fn from_env() -> Self {
        let cargo = std::env::var_os("DISTBUILD_CARGO")
            .or_else(|| std::env::var_os("CARGO"))
            .unwrap_or_else(|| OsString::from("cargo"));
        debug!("Using cargo executable: {:?}", cargo);
        Self::new(cargo)
    }
}

impl Toolchain for CargoToolchain {
    fn package_meta(&self) -> Result<PackageMeta> {
        let output = Command::new(&self.cargo)
            .args(["metadata", "--format-version", "1", "--no-deps"])
            .output()
            .context("Failed to run cargo metadata")?;

        if !output.status.success() {
            bail!(
                "cargo metadata failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let metadata: Metadata =
            serde_json::from_slice(&output.stdout).context("Failed to parse cargo metadata")?;
        metadata.into_package_meta()
    }

    fn build_release(&self, triple: &str) -> Result<()> {
        info!("Building release for {}", triple);

        let status = Command::new(&self.cargo)
            .args(["build", "--release", "--target", triple])
            .status()
            .with_context(|| format!("Failed to run cargo build for target {}", triple))?;

        if !status.success() {
            bail!("cargo build failed for target {} ({})", triple, status);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
    workspace_root: PathBuf,
    target_directory: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Package {
    manifest_path: PathBuf,
    targets: Vec<Target>,
}

#[derive(Debug, Deserialize)]
struct Target {
    name: String,
    kind: Vec<String>,
}

impl Metadata {
    /// Pick the binary to distribute: the bin target of the package rooted at
    /// the workspace root, or the first bin target in the workspace otherwise.
    fn into_package_meta(self) -> Result<PackageMeta> {
        let root_bin = self
            .packages
            .iter()
            .filter(|p| p.manifest_path.parent() == Some(self.workspace_root.as_path()))
            .chain(self.packages.iter())
            .flat_map(|p| &p.targets)
            .find(|t| t.kind.iter().any(|k| k == "bin"))
            .ok_or_else(|| anyhow!("no bin target found in workspace"))?;
        let binary_name = root_bin.name.clone();

        Ok(PackageMeta {
            binary_name,
            workspace_root: self.workspace_root,
            target_directory: self.target_directory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Metadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_metadata_parsing_picks_bin_target() {
        let meta = parse(
            r#"{
                "packages": [{
                    "name": "demo",
                    "manifest_path": "/project/Cargo.toml",
                    "targets": [
                        { "name": "demo-lib", "kind": ["lib"] },
                        { "name": "demo", "kind": ["bin"] }
                    ]
                }],
                "workspace_root": "/project",
                "target_directory": "/project/target"
            }"#,
        )
        .into_package_meta()
        .unwrap();

        assert_eq!(meta.binary_name, "demo");
        assert_eq!(meta.workspace_root, PathBuf::from("/project"));
        assert_eq!(meta.target_directory, PathBuf::from("/project/target"));
    }

    #[test]
    fn test_metadata_prefers_root_package() {
        let meta = parse(
            r#"{
                "packages": [
                    {
                        "name": "helper",
                        "manifest_path": "/project/helper/Cargo.toml",
                        "targets": [{ "name": "helper", "kind": ["bin"] }]
                    },
                    {
                        "name": "demo",
                        "manifest_path": "/project/Cargo.toml",
                        "targets": [{ "name": "demo", "kind": ["bin"] }]
                    }
                ],
                "workspace_root": "/project",
                "target_directory": "/project/target"
            }"#,
        )
        .into_package_meta()
        .unwrap();

        assert_eq!(meta.binary_name, "demo");
    }

    #[test]
    fn test_metadata_without_bin_target_is_an_error() {
        let result = parse(
            r#"{
                "packages": [{
                    "name": "demo",
                    "manifest_path": "/project/Cargo.toml",
                    "targets": [{ "name": "demo", "kind": ["lib"] }]
                }],
                "workspace_root": "/project",
                "target_directory": "/project/target"
            }"#,
        )
        .into_package_meta();

        assert!(result.is_err());
    }

    #[test]
    fn test_from_env_defaults_to_cargo_on_path() {
        // CARGO is set when running under cargo test, so only check the
        // explicit constructor default here.
        let toolchain = CargoToolchain::new(OsString::from("cargo"));
        assert_eq!(toolchain.cargo, OsString::from("cargo"));
    }
}
