use std::{
    fmt,
    fs::File,
    io::{ErrorKind, Read},
    path::Path,
};

use crate::{Algorithm, DigestConfig, DigestError, HashingReader, Hasher, Result};

/// Produces [`Digest`]s under one fixed [`DigestConfig`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Digester {
    config: DigestConfig,
}

impl Digester {
    pub fn new(config: DigestConfig) -> Self { Self { config } }

    pub fn config(&self) -> DigestConfig { self.config }

    pub fn algorithm(&self) -> Algorithm { self.config.get_algorithm() }

    /// Digest an in-memory buffer. Never fails; the empty buffer yields the
    /// algorithm's empty-message digest.
    pub fn digest(&self, data: &[u8]) -> Digest {
        let mut hasher = self.algorithm().hasher();
        hasher.update(data);
        Digest::from_parts(*self, hasher.finalize())
    }

    /// Digest a stream, reading at most `chunk_size` bytes at a time until
    /// end-of-input. Memory use is bounded by the chunk size.
    ///
    /// Any read fault other than `Interrupted` aborts with
    /// [`DigestError::Read`]; no partial digest is produced.
    pub fn digest_reader<R: Read>(&self, reader: R) -> Result<Digest> {
        let mut reader = HashingReader::new(reader, *self);
        let mut chunk = vec![0u8; self.config.get_chunk_size()];

        loop {
            match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(DigestError::Read(e)),
            }
        }

        tracing::debug!(
            algorithm = %self.algorithm(),
            bytes = reader.bytes_read(),
            chunks = reader.chunks_read(),
            "stream digest complete"
        );
        Ok(reader.finish())
    }

    /// Digest the file at `path`. The file is closed before returning.
    pub fn digest_file(&self, path: impl AsRef<Path>) -> Result<Digest> {
        let file = File::open(path.as_ref())?;
        self.digest_reader(file)
    }

    /// Parse a hex digest produced elsewhere under this configuration.
    pub fn parse_hex(&self, s: &str) -> Result<Digest> {
        let bytes = hex::decode(s.trim())?;
        let expected = self.algorithm().output_len();
        if bytes.len() != expected {
            return Err(DigestError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Digest::from_parts(*self, bytes))
    }
}

/// Immutable hash output, bound to the configuration that produced it.
///
/// Two digests are equal when they use the same algorithm and their bytes
/// are identical.
#[derive(Clone, Debug)]
pub struct Digest {
    bytes:    Box<[u8]>,
    digester: Digester,
}

impl Digest {
    pub(crate) fn from_parts(digester: Digester, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), digester.algorithm().output_len());
        Self {
            bytes: bytes.into_boxed_slice(),
            digester,
        }
    }

    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    /// Lowercase hex, two characters per byte, no prefix.
    pub fn to_hex(&self) -> String { hex::encode(&self.bytes) }

    pub fn algorithm(&self) -> Algorithm { self.digester.algorithm() }

    pub fn digester(&self) -> Digester { self.digester }

    /// Recompute over `data` and compare.
    pub fn verify(&self, data: &[u8]) -> bool { self.digester.digest(data) == *self }

    /// Recompute over a stream and compare. A stream that cannot be read to
    /// the end counts as a mismatch.
    pub fn verify_reader<R: Read>(&self, reader: R) -> bool { self.check_reader(reader).is_match() }

    /// Like [`verify_reader`](Self::verify_reader) but keeps unreadable input
    /// distinguishable from a mismatch.
    pub fn check_reader<R: Read>(&self, reader: R) -> Verification {
        match self.digester.digest_reader(reader) {
            Ok(actual) if actual == *self => Verification::Match,
            Ok(_) => Verification::Mismatch,
            Err(e) => {
                tracing::warn!(error = %e, expected = %self, "stream unreadable during verification");
                Verification::Unreadable(e.to_string())
            }
        }
    }

    /// Like [`verify`](Self::verify) but reports a mismatch as an error.
    pub fn ensure_matches(&self, data: &[u8]) -> Result<()> {
        let actual = self.digester.digest(data);
        if actual == *self {
            Ok(())
        } else {
            Err(DigestError::Mismatch {
                expected: self.to_hex(),
                actual:   actual.to_hex(),
            })
        }
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm() == other.algorithm() && self.bytes == other.bytes
    }
}

impl Eq for Digest {}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] { &self.bytes }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_hex()) }
}

/// Outcome of checking a stream against an expected digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch,
    Unreadable(String),
}

impl Verification {
    pub fn is_match(&self) -> bool { matches!(self, Verification::Match) }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Match => f.write_str("OK"),
            Verification::Mismatch => f.write_str("FAILED"),
            Verification::Unreadable(reason) => write!(f, "UNREADABLE ({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{self, Cursor},
        num::NonZeroUsize,
    };

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    /// Yields its data, then fails instead of signalling end-of-input.
    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(ErrorKind::BrokenPipe, "connection reset")),
                n => Ok(n),
            }
        }
    }

    /// Returns `Interrupted` before every successful read.
    struct InterruptingReader {
        data:        Cursor<Vec<u8>>,
        interrupted: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupted = !self.interrupted;
            if self.interrupted {
                return Err(ErrorKind::Interrupted.into());
            }
            self.data.read(buf)
        }
    }

    fn chunked(size: usize) -> Digester {
        Digester::new(DigestConfig::new().chunk_size(NonZeroUsize::new(size).unwrap()))
    }

    #[test]
    fn test_empty_buffer() {
        let digest = Digester::default().digest(b"");
        assert_eq!(digest.to_hex(), EMPTY_SHA256);
        assert!(digest.verify(b""));
    }

    #[test]
    fn test_empty_stream() {
        let digest = Digester::default().digest_reader(io::empty()).unwrap();
        assert_eq!(digest.to_hex(), EMPTY_SHA256);
    }

    #[test]
    fn test_hex_is_lowercase_binary() {
        let digest = Digester::default().digest(b"hello world");
        assert_eq!(digest.as_bytes().len(), 32);
        assert_eq!(digest.to_hex().len(), 64);
        assert_eq!(digest.to_hex(), hex::encode(digest.as_bytes()));
        assert_eq!(
            digest.to_string(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_verify_rejects_other_input() {
        let digest = Digester::default().digest(b"Hello, world.");
        assert!(digest.verify(b"Hello, world."));
        assert!(!digest.verify(b"Hello, world!"));
        assert!(!digest.verify(b""));
    }

    #[test]
    fn test_chunk_size_independence() {
        let msg = b"Hello, world.";
        let whole = Digester::default().digest(msg);
        let streamed = chunked(5).digest_reader(&msg[..]).unwrap();

        assert_eq!(whole, streamed);
        assert!(streamed.verify_reader(&msg[..]));
    }

    #[test]
    fn test_chunk_boundaries() {
        let data: Vec<u8> = (0..=255u8).cycle().take(3 * 4096 + 17).collect();
        let expected = Digester::default().digest(&data);

        for size in [1, 7, 4095, 4096, 4097, data.len(), data.len() + 1] {
            let digest = chunked(size).digest_reader(Cursor::new(&data)).unwrap();
            assert_eq!(digest, expected, "chunk size {size}");
        }
    }

    #[test]
    fn test_read_fault_aborts() {
        let reader = FailingReader {
            data: Cursor::new(vec![7u8; 10_000]),
        };
        let result = chunked(16).digest_reader(reader);
        assert!(matches!(result, Err(DigestError::Read(e)) if e.kind() == ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_verify_reader_read_fault_is_false() {
        let data = vec![7u8; 10_000];
        let digest = Digester::default().digest(&data);

        let reader = FailingReader {
            data: Cursor::new(data.clone()),
        };
        assert!(!digest.verify_reader(reader));

        let reader = FailingReader {
            data: Cursor::new(data),
        };
        assert!(matches!(digest.check_reader(reader), Verification::Unreadable(_)));
    }

    #[test]
    fn test_interrupted_is_retried() {
        let data = b"interrupted but complete".to_vec();
        let reader = InterruptingReader {
            data:        Cursor::new(data.clone()),
            interrupted: false,
        };
        let digest = chunked(4).digest_reader(reader).unwrap();
        assert!(digest.verify(&data));
    }

    #[test]
    fn test_check_reader_outcomes() {
        let digest = Digester::default().digest(b"abc");
        assert_eq!(digest.check_reader(&b"abc"[..]), Verification::Match);
        assert_eq!(digest.check_reader(&b"abd"[..]), Verification::Mismatch);
    }

    #[test]
    fn test_parse_hex() {
        let digester = Digester::default();
        let digest = digester.parse_hex(&format!("  {}\n", EMPTY_SHA256.to_uppercase())).unwrap();
        assert!(digest.verify(b""));
        assert_eq!(digest.to_hex(), EMPTY_SHA256);

        assert!(matches!(
            digester.parse_hex("abcd"),
            Err(DigestError::LengthMismatch {
                expected: 32,
                actual:   2,
            })
        ));
        assert!(matches!(digester.parse_hex("zz"), Err(DigestError::InvalidHex(_))));
    }

    #[test]
    fn test_ensure_matches() {
        let digest = Digester::default().digest(b"payload");
        digest.ensure_matches(b"payload").unwrap();
        assert!(matches!(digest.ensure_matches(b"tampered"), Err(DigestError::Mismatch { .. })));
    }

    #[test]
    fn test_algorithm_is_part_of_identity() {
        let sha512 = Digester::new(DigestConfig::new().algorithm(Algorithm::Sha512));
        let digest = sha512.digest(b"data");

        assert_eq!(digest.as_bytes().len(), 64);
        assert!(digest.verify(b"data"));
        assert_ne!(digest, Digester::default().digest(b"data"));
    }

    #[test]
    fn test_digest_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Digest>();
        assert_send_sync::<Digester>();
    }
}
