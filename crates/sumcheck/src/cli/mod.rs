use std::{num::NonZeroUsize, path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use sumcheck_digest::{Algorithm, Digester};

use crate::env;

mod check;
mod hash;
mod verify;

#[derive(Debug, Parser)]
#[command(name = "sumcheck", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(flatten)]
    pub opts: GlobalOpts,
    #[command(subcommand)]
    pub cmd:  Commands,
}

#[derive(Debug, clap::Args)]
pub struct GlobalOpts {
    /// Hash algorithm
    #[arg(long, short, global = true, env = "SUMCHECK_ALGORITHM")]
    pub algorithm:  Option<Algorithm>,
    /// Bytes requested per read when hashing streams
    #[arg(long, global = true, env = "SUMCHECK_CHUNK_SIZE")]
    pub chunk_size: Option<NonZeroUsize>,
    /// TOML config file [default: ~/.sumcheck.toml]
    #[arg(long, global = true, env = "SUMCHECK_CONFIG")]
    pub config:     Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "h", name = "hash", about = "Print a checksum line for each file")]
    Hash(hash::HashArg),
    #[command(alias = "v", name = "verify", about = "Check one file against an expected digest")]
    Verify(verify::VerifyArg),
    #[command(alias = "c", name = "check", about = "Check every file listed in a manifest")]
    Check(check::CheckArg),
}

impl App {
    pub fn run(self) -> Result<ExitCode> {
        let config = env::resolve(&self.opts)?;
        tracing::debug!(?config, "resolved configuration");
        let digester = Digester::new(config);

        match self.cmd {
            Commands::Hash(arg) => arg.run(&digester),
            Commands::Verify(arg) => arg.run(&digester),
            Commands::Check(arg) => arg.run(&digester),
        }
    }
}

fn is_stdin(path: &std::path::Path) -> bool { path.as_os_str() == "-" }
