use std::{fs, path::{Path, PathBuf}, process::ExitCode};

use anyhow::{Context, Result};
use sumcheck_digest::{Digester, manifest};

#[derive(Debug, clap::Args)]
pub struct CheckArg {
    /// Manifest of `<hex>  <path>` lines; paths are relative to its directory
    pub manifest: PathBuf,
    /// Only print entries that did not verify
    #[arg(long, short)]
    pub quiet:    bool,
}

impl CheckArg {
    pub fn run(self, digester: &Digester) -> Result<ExitCode> {
        let text = fs::read_to_string(&self.manifest)
            .with_context(|| format!("Failed to read manifest {}", self.manifest.display()))?;
        let entries = manifest::parse(&text, digester)
            .with_context(|| format!("Invalid manifest {}", self.manifest.display()))?;

        let base = self.manifest.parent().unwrap_or(Path::new("."));
        let outcomes = manifest::check(&entries, base);

        let mut failures = 0;
        for outcome in &outcomes {
            let ok = outcome.verification.is_match();
            if !ok {
                failures += 1;
            }
            if !(ok && self.quiet) {
                println!("{}: {}", outcome.path.display(), outcome.verification);
            }
        }

        if failures > 0 {
            eprintln!(
                "sumcheck: WARNING: {failures} of {} listed files did not verify",
                outcomes.len()
            );
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    }
}
