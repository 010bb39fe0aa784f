mod cli;
mod config;
mod error;
mod runtime;
mod syntax;

use std::{
    fs,
    io::{self, BufRead, Write},
    process,
};

use clap::Parser;

use cli::Cli;
use runtime::Session;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let mut session = Session::new(cli.config());
    let mut stdout = io::stdout().lock();
    let display = |line: &str| {
        if let Err(why) = writeln!(stdout, "{line}") {
            log::error!("failed to write output: {why}");
        }
    };

    match &cli.file {
        Some(file_path) => {
            let src = match fs::read_to_string(file_path) {
                Ok(src) => src,
                Err(why) => {
                    eprintln!("Failed to read {file_path:?}: {why}");
                    process::exit(1);
                }
            };
            session.run(src.chars(), display);
        }
        None => {
            let chars = io::stdin()
                .lock()
                .lines()
                .map_while(|line| match line {
                    Ok(line) => Some(line),
                    Err(why) => {
                        log::error!("failed to read input: {why}");
                        None
                    }
                })
                .flat_map(|line| line.chars().chain(Some('\n')).collect::<Vec<_>>());
            session.run(chars, display);
        }
    }

    log::info!(
        "session ended with {} variables bound",
        session.store().len()
    );
}
