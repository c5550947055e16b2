//! CLI subcommands.

pub mod content;
pub mod session;

use serde::Serialize;

/// Print a value to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
fn emit<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
