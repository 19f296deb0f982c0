//! Content digests over buffers and unbounded byte streams.
//!
//! A [`Digester`] holds one fixed [`DigestConfig`] and produces immutable
//! [`Digest`] values. Streams are hashed incrementally in bounded chunks, so
//! memory use depends on the chunk size, never on the stream length.
//!
//! # Key Features
//!
//! - **Chunk-size independent**: buffer and stream digests of the same bytes always agree
//! - **Uniform verification**: unreadable streams verify as a mismatch, or as a distinct
//!   [`Verification::Unreadable`] outcome when the caller asks for it
//! - **Single pass**: [`HashingReader`] hashes data while it is being copied elsewhere
//!
//! # Example
//!
//! ```
//! use sumcheck_digest::Digester;
//!
//! let digester = Digester::default();
//! let digest = digester.digest(b"Hello, world.");
//!
//! let streamed = digester.digest_reader(&b"Hello, world."[..]).unwrap();
//! assert_eq!(digest, streamed);
//! assert!(digest.verify_reader(&b"Hello, world."[..]));
//! assert_eq!(digest.to_hex().len(), 64);
//! ```

pub use self::config::{DEFAULT_CHUNK_SIZE, DigestConfig};
pub use self::digest::{Digest, Digester, Verification};
pub use self::error::{DigestError, Result};
pub use self::hasher::{Algorithm, AlgorithmHasher, Hasher, Sha256Hasher, Sha512Hasher};
pub use self::reader::HashingReader;

#[cfg(feature = "blake3")]
pub use self::hasher::Blake3Hasher;

pub mod manifest;

mod config;
mod digest;
mod error;
mod hasher;
mod reader;
