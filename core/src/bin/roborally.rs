//! RoboRally CLI
//!
//! Checks, formats and runs robot control programs against a sandbox arena.

use roborally_core::cli;

fn main() {
    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
