//! imgfan CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the chosen
//! strategy, and exit with a non-zero status on failure.
//! For programmatic use, prefer the library API (`imgfan::api`).

use clap::Parser;

mod cli;

fn main() {
    let args = cli::CliArgs::parse();
    if let Err(e) = cli::run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
