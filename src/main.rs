use std::io;
use std::process::ExitCode;

use clap::Parser;
use tesls::{cli, logging};

fn main() -> ExitCode {
    let args = cli::Args::parse();

    if args.packages.is_empty() {
        eprint!("{}", cli::usage());
        return ExitCode::SUCCESS;
    }

    logging::init(logging::Verbosity::from_flags(args.verbose, args.quiet));

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    match tesls::run(&config, &args.packages, stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
