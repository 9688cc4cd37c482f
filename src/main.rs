//! makedoc CLI entry point.

use clap::Parser;
use makedoc::cli::{self, Cli, EXIT_ERROR};

fn main() {
    let argv0 = std::env::args().next();
    let program = cli::program_name(argv0.as_deref());
    let cli = Cli::parse();
    cli::init_tracing();

    let exit_code = match cli::run(&cli, &program) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", program, e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
