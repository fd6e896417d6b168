//! Target specs: the fixed list of platforms a release run compiles for,
//! plus the naming metadata for each platform's output artifact.

/// A platform the builder compiles for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    /// Rust target triple passed to the toolchain.
    pub triple: &'static str,
    /// Platform tag used to name the output artifact.
    pub suffix: &'static str,
    /// Empty, or ".exe" for Windows targets.
    pub binary_extension: &'static str,
}

impl TargetSpec {
    /// File name of the distributed artifact: `{binary_name}-{suffix}{extension}`.
    pub fn artifact_file_name(&self, binary_name: &str) -> String {
        format!("{}-{}{}", binary_name, self.suffix, self.binary_extension)
    }

    /// File name of the binary as the toolchain produces it.
    pub fn built_file_name(&self, binary_name: &str) -> String {
        format!("{}{}", binary_name, self.binary_extension)
    }
}

/// The platforms a release run builds, in the order they are built.
pub const DEFAULT_TARGETS: &[TargetSpec] = &[
    TargetSpec {
        triple: "aarch64-apple-darwin",
        suffix: "macos-arm64",
        binary_extension: "",
    },
    TargetSpec {
        triple: "x86_64-pc-windows-gnu",
        suffix: "windows-x86_64",
        binary_extension: ".exe",
    },
    TargetSpec {
        triple: "x86_64-unknown-linux-gnu",
        suffix: "linux-x86_64",
        binary_extension: "",
    },
];
