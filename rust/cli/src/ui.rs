//! UI helper functions for terminal output formatting.
//!
//! Error and warning lines go to the error stream with a fixed prefix so
//! tests and scripts can match on them.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Notice shown when human input arrives during a computer move
pub fn display_blocked(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "The computer is moving, wait for it to finish.")
}
