// crates/find_code_dependencies/src/main.rs

use anyhow::Result;
use clap::{Arg, Command};
use std::path::Path;

fn main() -> Result<()> {
    let matches = Command::new("find_code_dependencies")
        .version("0.1.0")
        .about("Lists the source files a document's snippet commands reference")
        .arg(
            Arg::new("file")
                .long("file")
                .num_args(1)
                .required(true)
                .help("Document to scan"),
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

    let file = matches.get_one::<String>("file").unwrap();
    let code_root = matches.get_one::<String>("code_root").unwrap();

    let level = if *matches.get_one::<bool>("verbose").unwrap() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let dependencies = document_processing::find_dependencies(Path::new(file), code_root)?;
    log::debug!("{} dependency path(s) found in {file}", dependencies.len());
    for dependency in dependencies {
        println!("{}", dependency.display());
    }
    Ok(())
}
