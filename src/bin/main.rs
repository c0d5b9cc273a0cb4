use std::collections::VecDeque;
use std::process;

use clap::Parser;
use anyhow::Result;

#[macro_use]
extern crate log;

use lss_io::{parse_dir, OutputFormat, Presenter};
use sequence::Item;

/// Parse command line arguments and list the requested folder(s).
fn main() {
    // ----------------------------- Run CLI Parser
    let cli = parser::Cli::parse();

    // ----------------------------- Init logger.
    if let Err(e) = logger::Logger::init(cli.verbose + u8::from(!cli.quiet)) {
        eprintln!("{e}");
        process::exit(1);
    }

    // ----------------------------- Run lss.
    if let Err(e) = run(&cli) {
        error!("{e:?}");
        process::exit(1);
    }
}

/// Walk the requested folder (breadth-first when `--recursive`) and print one
/// listing per visited directory.
fn run(cli: &parser::Cli) -> Result<()> {
    let configuration = cli.configuration();
    let format = if cli.json { OutputFormat::Json } else { OutputFormat::Text };
    let mut presenter = Presenter::stdout(format);

    let mut folders = VecDeque::from([cli.folder.clone()]);
    while let Some(folder) = folders.pop_front() {
        info!("Parsing '{}'", folder.display());
        let content = match parse_dir(&configuration, &folder) {
            Ok(content) => content,
            // Keep walking when a sub-folder turns unreadable mid-recursion.
            Err(e) if folder != cli.folder => {
                warn!("{e:#}");
                continue
            },
            Err(e) => return Err(e),
        };
        if cli.recursive {
            for directory in &content.directories {
                if let Item::Single { filename } = directory {
                    folders.push_back(folder.join(filename));
                }
            }
        }
        presenter.write_folder(&content)?;
    }
    Ok(())
}
