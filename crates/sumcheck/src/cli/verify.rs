use std::{fs::File, io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use sumcheck_digest::{Digester, Verification};

use super::is_stdin;

#[derive(Debug, clap::Args)]
pub struct VerifyArg {
    /// File to check; `-` reads stdin
    pub file:     PathBuf,
    /// Expected digest in hex
    pub expected: String,
}

impl VerifyArg {
    pub fn run(self, digester: &Digester) -> Result<ExitCode> {
        let expected = digester
            .parse_hex(&self.expected)
            .with_context(|| format!("Invalid {} digest", digester.algorithm()))?;

        let verification = if is_stdin(&self.file) {
            expected.check_reader(io::stdin().lock())
        } else {
            match File::open(&self.file) {
                Ok(file) => expected.check_reader(file),
                Err(e) => Verification::Unreadable(e.to_string()),
            }
        };

        println!("{}: {verification}", self.file.display());
        Ok(if verification.is_match() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
    }
}
