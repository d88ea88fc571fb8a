//! Command-line interface definitions for `ortho-env-dump`.

use clap::{Parser, ValueEnum};

/// Encodings the tool can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON.
    Json,
    /// TOML document.
    Toml,
}

/// Parsed CLI arguments for `ortho-env-dump`.
#[derive(Debug, Parser)]
#[command(name = "ortho-env-dump")]
#[command(about = "Print the configuration tree built from environment variables")]
#[command(version)]
pub struct Args {
    /// Keep variables starting with this prefix (repeatable).
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefixes: Vec<String>,
    /// Keep variables starting with this prefix and remove it (repeatable).
    #[arg(long = "strip-prefix", value_name = "PREFIX")]
    pub stripped_prefixes: Vec<String>,
    /// Encoding of the printed configuration.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
    /// Sort variables before merging so collisions resolve deterministically.
    #[arg(long = "sort")]
    pub should_sort: bool,
    /// Print change set metadata instead of the payload.
    #[arg(long = "metadata")]
    pub should_print_metadata: bool,
}

#[cfg(test)]
mod tests {
    use super::{Args, OutputFormat};
    use anyhow::{Result, ensure};
    use clap::Parser;

    #[test]
    fn defaults_to_unfiltered_json() -> Result<()> {
        let args = Args::try_parse_from(["ortho-env-dump"])?;
        ensure!(args.prefixes.is_empty() && args.stripped_prefixes.is_empty());
        ensure!(args.format == OutputFormat::Json);
        ensure!(!args.should_sort && !args.should_print_metadata);
        Ok(())
    }

    #[test]
    fn collects_repeated_prefixes() -> Result<()> {
        let args = Args::try_parse_from([
            "ortho-env-dump",
            "--strip-prefix",
            "APP_",
            "--strip-prefix",
            "SVC_",
            "--prefix",
            "COMMON_",
            "--format",
            "toml",
            "--sort",
        ])?;
        ensure!(args.stripped_prefixes == ["APP_", "SVC_"]);
        ensure!(args.prefixes == ["COMMON_"]);
        ensure!(args.format == OutputFormat::Toml);
        ensure!(args.should_sort);
        Ok(())
    }

    #[test]
    fn rejects_unknown_formats() {
        assert!(Args::try_parse_from(["ortho-env-dump", "--format", "yaml"]).is_err());
    }
}
