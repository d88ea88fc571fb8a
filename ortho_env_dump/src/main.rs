//! CLI entrypoint for `ortho-env-dump`.

mod cli;
mod error;

use std::io::{self, Write};

use clap::Parser;
use ortho_env::{ChangeSet, EnvSource, EnvSourceBuilder, JsonEncoder, Source, TomlEncoder};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, OutputFormat};
use crate::error::DumpError;

fn main() -> Result<(), DumpError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    run(Args::parse())
}

fn run(args: Args) -> Result<(), DumpError> {
    let should_print_metadata = args.should_print_metadata;
    let source = configure(args).build();
    tracing::debug!(?source, "reading environment");
    let change_set = source.read()?;
    render(&change_set, should_print_metadata, &mut io::stdout().lock())
}

fn configure(args: Args) -> EnvSourceBuilder {
    let builder = EnvSource::builder()
        .prefixes(args.prefixes)
        .stripped_prefixes(args.stripped_prefixes)
        .sorted(args.should_sort);
    match args.format {
        OutputFormat::Json => builder.encoder(JsonEncoder),
        OutputFormat::Toml => builder.encoder(TomlEncoder),
    }
}

fn render(
    change_set: &ChangeSet,
    should_print_metadata: bool,
    out: &mut impl Write,
) -> Result<(), DumpError> {
    if should_print_metadata {
        serde_json::to_writer_pretty(&mut *out, &change_set.metadata())?;
        writeln!(out)?;
    } else {
        out.write_all(change_set.data())?;
        if !change_set.data().ends_with(b"\n") {
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
