//! `civic_board` (cb) - Local civic feedback board
//!
//! Citizens file issues, politicians broadcast, moderators and admins triage.
//! State lives in a single snapshot file in the data directory.

use civic_board::{exit_code, run};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(exit_code(&e));
    }
}
