//! Operator management commands.

use std::io::{BufRead, Write};

use secrecy::{ExposeSecret, SecretString};

use tenant_console::models::AccessKeyDigest;

use super::CliError;

/// Read an access key from the first line of `input` and print its digest.
///
/// # Errors
///
/// Returns `CliError::EmptyKey` if the line is empty, or an I/O error.
pub fn digest(mut input: impl BufRead, out: &mut impl Write) -> Result<(), CliError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let key = SecretString::from(line.trim_end_matches(['\r', '\n']).to_string());
    line.clear();

    if key.expose_secret().is_empty() {
        return Err(CliError::EmptyKey);
    }

    writeln!(out, "{}", AccessKeyDigest::of(key.expose_secret()).to_hex())?;
    Ok(())
}
