use anyhow::Result;
use clap::Parser;
use distbuild::config::Config;
use std::path::PathBuf;

/// distbuild - multi-target release builder
///
/// Cross-compile the current project's binary for every supported platform
/// in release mode and collect the artifacts into a distribution directory
/// under platform-tagged names.
///
/// Run with no arguments from the project root; the binary name comes from
/// the project's package metadata.
#[derive(Parser, Debug)]
#[command(author, version = env!("DISTBUILD_VERSION"), about)]
struct Cli {
    /// Output directory (defaults to "dist" under the workspace root)
    #[arg(
        long = "out-dir",
        short = 'o',
        env = "DISTBUILD_OUT",
        value_name = "PATH"
    )]
    pub out_dir: Option<PathBuf>,

    /// Binary to build (defaults to the root package's bin target)
    #[arg(long = "bin", value_name = "NAME")]
    pub bin: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let runtime = distbuild::runtime::RealRuntime;
    let toolchain = distbuild::toolchain::CargoToolchain::from_env();
    let config = Config {
        out_dir: cli.out_dir,
        bin: cli.bin,
    };

    let produced = distbuild::builder::dist(&runtime, &toolchain, &config)?;
    for path in produced {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_arguments() {
        let cli = Cli::try_parse_from(["distbuild"]).unwrap();
        assert_eq!(cli.out_dir, None);
        assert_eq!(cli.bin, None);
    }

    #[test]
    fn test_cli_out_dir_parsing() {
        let cli = Cli::try_parse_from(["distbuild", "--out-dir", "/tmp/dist"]).unwrap();
        assert_eq!(cli.out_dir, Some(PathBuf::from("/tmp/dist")));
    }

    #[test]
    fn test_cli_bin_parsing() {
        let cli = Cli::try_parse_from(["distbuild", "--bin", "demo"]).unwrap();
        assert_eq!(cli.bin, Some("demo".to_string()));
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        let result = Cli::try_parse_from(["distbuild", "demo"]);
        assert!(result.is_err());
    }
}
