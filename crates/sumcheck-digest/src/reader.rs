use std::io::{self, Read};

use crate::{AlgorithmHasher, Digest, DigestError, Digester, Hasher, Result};

/// Streaming reader that hashes data as it passes through.
/// Wraps any `Read` source so content can be verified while it is copied.
pub struct HashingReader<R> {
    reader:   R,
    hasher:   AlgorithmHasher,
    digester: Digester,
    bytes:    u64,
    chunks:   u64,
}

impl<R> HashingReader<R> {
    /// Create a hashing reader using the algorithm of `digester`.
    pub fn new(reader: R, digester: Digester) -> Self {
        Self {
            reader,
            hasher: digester.config().get_algorithm().hasher(),
            digester,
            bytes: 0,
            chunks: 0,
        }
    }

    /// Bytes hashed so far.
    pub fn bytes_read(&self) -> u64 { self.bytes }

    /// Non-empty reads hashed so far.
    pub fn chunks_read(&self) -> u64 { self.chunks }

    pub fn get_ref(&self) -> &R { &self.reader }

    /// Finalize the hash over everything read so far.
    pub fn finish(self) -> Digest { Digest::from_parts(self.digester, self.hasher.finalize()) }

    /// Finalize and compare against `expected`.
    /// Returns error on mismatch.
    pub fn finish_expecting(self, expected: &Digest) -> Result<Digest> {
        let actual = self.finish();
        if actual == *expected {
            Ok(actual)
        } else {
            Err(DigestError::Mismatch {
                expected: expected.to_hex(),
                actual:   actual.to_hex(),
            })
        }
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
            self.bytes += n as u64;
            self.chunks += 1;
            tracing::trace!(len = n, total = self.bytes, "hashed chunk");
        }
        Ok(n)
    }
}
