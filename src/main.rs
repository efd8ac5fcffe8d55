//! PawPal - pet care task tracking and scheduling

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = pawpal::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
