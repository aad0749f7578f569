//! mkrun CLI: run a rule-file target and everything it depends on.

use clap::error::ErrorKind;
use clap::Parser;

fn main() {
    let cli = match mkrun::cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
                _ => std::process::exit(1),
            }
        }
    };
    mkrun::cli::init_logging(cli.verbose);
    if let Err(e) = mkrun::cli::dispatch(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
