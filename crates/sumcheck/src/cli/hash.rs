use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Result;
use sumcheck_digest::{Digester, manifest::{self, Entry}};

use super::is_stdin;

#[derive(Debug, clap::Args)]
pub struct HashArg {
    /// Files to hash; `-` or no files reads stdin
    pub files:  Vec<PathBuf>,
    /// Mark entries as binary (`*path`)
    #[arg(long, short)]
    pub binary: bool,
}

impl HashArg {
    pub fn run(self, digester: &Digester) -> Result<ExitCode> {
        let files = if self.files.is_empty() { vec![PathBuf::from("-")] } else { self.files };

        let mut entries = Vec::with_capacity(files.len());
        let mut failed = false;

        for path in files {
            let digest = if is_stdin(&path) {
                digester.digest_reader(io::stdin().lock())
            } else {
                digester.digest_file(&path)
            };

            match digest {
                Ok(digest) => entries.push(Entry {
                    digest,
                    path,
                    binary: self.binary,
                }),
                Err(e) => {
                    eprintln!("sumcheck: {}: {e}", path.display());
                    failed = true;
                }
            }
        }

        print!("{}", manifest::render(&entries));
        Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
    }
}
