// crates/inject_code/src/main.rs

use anyhow::Result;
use clap::{Arg, Command};
use std::path::Path;

/// Derives the output file name when none was given. A name carrying a
/// `_raw` infix maps onto the same name with the infix removed.
fn default_output_file(input: &str) -> String {
    if input.contains("_raw") {
        input.replace("_raw", "")
    } else {
        "index.html".to_string()
    }
}

fn main() -> Result<()> {
    let matches = Command::new("inject_code")
        .version("0.1.0")
        .about("Expands snippet commands in a document into fenced code blocks")
        .arg(
            Arg::new("in")
                .long("in")
                .num_args(1)
                .default_value("index_raw.html")
                .help("Document to process"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .num_args(1)
                .help("Output file (defaults to the input name without `_raw`)"),
        )
        .arg(
            Arg::new("code_root")
                .long("code-root")
                .num_args(1)
                .default_value("")
                .help("Prefix prepended to every source path in a command"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .get_matches();

    let input = matches.get_one::<String>("in").unwrap();
    let code_root = matches.get_one::<String>("code_root").unwrap();
    let output = match matches.get_one::<String>("out") {
        Some(out) => out.clone(),
        None => default_output_file(input),
    };

    let level = if *matches.get_one::<bool>("verbose").unwrap() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    log::info!("processing {input} into {output}");
    document_processing::process_document(Path::new(input), Path::new(&output), code_root)?;
    Ok(())
}
