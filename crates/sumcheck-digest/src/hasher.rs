use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sha2::Digest as _;

use crate::DigestError;

/// Incremental hash state. `finalize` consumes the hasher, so a finished
/// state can never be fed again.
pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

pub struct Sha256Hasher(sha2::Sha256);

impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) { self.0.update(data); }
    fn finalize(self) -> Vec<u8> { self.0.finalize().to_vec() }
}

impl Default for Sha256Hasher {
    fn default() -> Self { Self::new() }
}

impl Sha256Hasher {
    pub fn new() -> Self { Self(sha2::Sha256::new()) }
}

pub struct Sha512Hasher(sha2::Sha512);

impl Hasher for Sha512Hasher {
    fn update(&mut self, data: &[u8]) { self.0.update(data); }
    fn finalize(self) -> Vec<u8> { self.0.finalize().to_vec() }
}

impl Default for Sha512Hasher {
    fn default() -> Self { Self::new() }
}

impl Sha512Hasher {
    pub fn new() -> Self { Self(sha2::Sha512::new()) }
}

#[cfg(feature = "blake3")]
pub struct Blake3Hasher(blake3::Hasher);

#[cfg(feature = "blake3")]
impl Hasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) { self.0.update(data); }
    fn finalize(self) -> Vec<u8> { self.0.finalize().as_bytes().to_vec() }
}

#[cfg(feature = "blake3")]
impl Default for Blake3Hasher {
    fn default() -> Self { Self::new() }
}

#[cfg(feature = "blake3")]
impl Blake3Hasher {
    pub fn new() -> Self { Self(blake3::Hasher::new()) }
}

/// Hash function selected by a [`DigestConfig`](crate::DigestConfig).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Sha256,
    Sha512,
    #[cfg(feature = "blake3")]
    Blake3,
}

impl Algorithm {
    /// Every algorithm compiled into this build.
    pub fn all() -> impl Iterator<Item = Algorithm> {
        [
            Algorithm::Sha256,
            Algorithm::Sha512,
            #[cfg(feature = "blake3")]
            Algorithm::Blake3,
        ]
        .into_iter()
    }

    /// Length in bytes of every digest this algorithm produces.
    pub fn output_len(self) -> usize {
        match self {
            Algorithm::Sha256 => 32,
            Algorithm::Sha512 => 64,
            #[cfg(feature = "blake3")]
            Algorithm::Blake3 => 32,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
            #[cfg(feature = "blake3")]
            Algorithm::Blake3 => "blake3",
        }
    }

    /// Fresh hash state for this algorithm.
    pub fn hasher(self) -> AlgorithmHasher {
        match self {
            Algorithm::Sha256 => AlgorithmHasher::Sha256(Sha256Hasher::new()),
            Algorithm::Sha512 => AlgorithmHasher::Sha512(Sha512Hasher::new()),
            #[cfg(feature = "blake3")]
            Algorithm::Blake3 => AlgorithmHasher::Blake3(Blake3Hasher::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Algorithm {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "");
        Algorithm::all()
            .find(|alg| alg.name() == wanted)
            .ok_or_else(|| DigestError::UnknownAlgorithm(s.to_string()))
    }
}

/// Hash state for whichever [`Algorithm`] was chosen at runtime.
pub enum AlgorithmHasher {
    Sha256(Sha256Hasher),
    Sha512(Sha512Hasher),
    #[cfg(feature = "blake3")]
    Blake3(Blake3Hasher),
}

impl Hasher for AlgorithmHasher {
    fn update(&mut self, data: &[u8]) {
        match self {
            AlgorithmHasher::Sha256(h) => h.update(data),
            AlgorithmHasher::Sha512(h) => h.update(data),
            #[cfg(feature = "blake3")]
            AlgorithmHasher::Blake3(h) => h.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            AlgorithmHasher::Sha256(h) => h.finalize(),
            AlgorithmHasher::Sha512(h) => h.finalize(),
            #[cfg(feature = "blake3")]
            AlgorithmHasher::Blake3(h) => h.finalize(),
        }
    }
}
