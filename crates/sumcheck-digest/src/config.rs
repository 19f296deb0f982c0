use std::num::NonZeroUsize;

use crate::Algorithm;

pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(size) => size,
    None => unreachable!(),
};

/// Algorithm and read granularity used by a [`Digester`](crate::Digester).
///
/// Digests are only comparable when they were produced under the same
/// algorithm; the chunk size never affects the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigestConfig {
    algorithm:  Algorithm,
    chunk_size: NonZeroUsize,
}

impl Default for DigestConfig {
    fn default() -> Self { Self::new() }
}

impl DigestConfig {
    pub fn new() -> Self {
        Self {
            algorithm:  Algorithm::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn get_algorithm(&self) -> Algorithm { self.algorithm }

    pub fn get_chunk_size(&self) -> usize { self.chunk_size.get() }
}
