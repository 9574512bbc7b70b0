use anyhow::{Context, Result};
use clap::{crate_version, App, Arg};
use kbgen::build::build_site;
use kbgen::config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let matches = App::new("kbgen")
        .version(crate_version!())
        .about("Generates static HTML pages from a knowledge-base file")
        .arg(
            Arg::with_name("OUTPUT_DIRECTORY")
                .help("The directory to write the pages to (created if missing)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("INPUT_FILE")
                .help("The knowledge-base file to read")
                .required(true)
                .index(2),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Both arguments are required, so clap guarantees they're present.
    let config = Config::new(
        Path::new(matches.value_of("OUTPUT_DIRECTORY").unwrap_or_default()),
        Path::new(matches.value_of("INPUT_FILE").unwrap_or_default()),
    );

    let summary = build_site(&config).with_context(|| {
        format!(
            "Generating knowledge base from '{}'",
            config.input_file.display()
        )
    })?;
    println!("{}", summary);
    Ok(())
}
