//! Streaming file hasher with a selectable digest algorithm.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing a content
//! [`Digest`] of a file by streaming its bytes through the chosen
//! [`Algorithm`] in fixed-size chunks. MD5 is the default; SHA-256,
//! SHA-512 and BLAKE3 can be selected by name.
//!
//! The chunk size only affects memory use. Any chunk size yields the same
//! final digest.
//!
//! # Example
//!
//! ```no_run
//! use dejavu::scanner::Hasher;
//! use std::path::Path;
//!
//! let hasher = Hasher::from_name("md5").unwrap();
//! let digest = hasher.hash_file(Path::new("photo.jpg")).unwrap();
//! println!("{}", digest);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use sha2::Digest as _;

use super::HashError;

/// Default chunk size for streaming reads (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Digest algorithms supported by the hasher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// MD5 (128-bit). The default.
    #[default]
    Md5,
    /// SHA-256 (256-bit).
    Sha256,
    /// SHA-512 (512-bit).
    Sha512,
    /// BLAKE3 (256-bit).
    Blake3,
}

impl Algorithm {
    /// Canonical lower-case name of the algorithm.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
        }
    }

    /// Length in bytes of digests produced by this algorithm.
    #[must_use]
    pub fn digest_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha256 | Self::Blake3 => 32,
            Self::Sha512 => 64,
        }
    }

    fn state(self) -> State {
        match self {
            Self::Md5 => State::Md5(md5::Context::new()),
            Self::Sha256 => State::Sha256(sha2::Sha256::new()),
            Self::Sha512 => State::Sha512(sha2::Sha512::new()),
            Self::Blake3 => State::Blake3(Box::new(blake3::Hasher::new())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = HashError;

    /// Parse an algorithm name, ignoring case and `-`/`_` separators.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::AlgorithmUnavailable`] for unknown names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            "blake3" => Ok(Self::Blake3),
            _ => Err(HashError::AlgorithmUnavailable(s.to_string())),
        }
    }
}

/// Running digest computation for one file.
enum State {
    Md5(md5::Context),
    Sha256(sha2::Sha256),
    Sha512(sha2::Sha512),
    Blake3(Box<blake3::Hasher>),
}

impl State {
    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(ctx) => ctx.consume(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
            Self::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize(self) -> Digest {
        match self {
            Self::Md5(ctx) => Digest::from(ctx.compute().0.as_slice()),
            Self::Sha256(h) => Digest::from(h.finalize().as_slice()),
            Self::Sha512(h) => Digest::from(h.finalize().as_slice()),
            Self::Blake3(h) => Digest::from(h.finalize().as_bytes().as_slice()),
        }
    }
}

/// Content digest of a file.
///
/// Equality and ordering are defined on the raw bytes (byte-lexicographic).
/// The hex rendering from [`fmt::Display`] is for humans only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest(Box<[u8]>);

impl Digest {
    /// Raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the digest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the digest has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lower-case hexadecimal rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Parse a hexadecimal string back into a digest.
    ///
    /// Returns `None` if the string has odd length or non-hex characters.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() % 2 != 0 {
            return None;
        }
        let bytes = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
            .collect::<Option<Vec<u8>>>()?;
        Some(Self(bytes.into_boxed_slice()))
    }
}

impl From<&[u8]> for Digest {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// File hasher bound to one digest algorithm.
///
/// Files are read sequentially in chunks of `buffer_size` bytes. Each call
/// owns its file handle and releases it before returning, on success and
/// on error alike.
#[derive(Debug, Clone)]
pub struct Hasher {
    algorithm: Algorithm,
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create an MD5 hasher with the default chunk size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_algorithm(Algorithm::default())
    }

    /// Create a hasher for the given algorithm.
    #[must_use]
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Create a hasher from an algorithm name such as `"MD5"` or `"sha-256"`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::AlgorithmUnavailable`] if the name is not supported.
    pub fn from_name(name: &str) -> Result<Self, HashError> {
        Ok(Self::with_algorithm(name.parse()?))
    }

    /// Set the read chunk size (minimum 1 byte).
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// The algorithm this hasher uses.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The read chunk size in bytes.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Digest everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Propagates any read error other than `Interrupted`.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<Digest> {
        let mut state = self.algorithm.state();
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            state.update(&buffer[..n]);
        }

        Ok(state.finalize())
    }

    /// Digest the full content of the file at `path`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the file doesn't exist
    /// - `PermissionDenied` if the file can't be opened for reading
    /// - `Io` for any other open or read failure
    pub fn hash_file(&self, path: &Path) -> Result<Digest, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let digest = self
            .hash_reader(file)
            .map_err(|e| HashError::from_io(path, e))?;

        log::trace!("{} {}: {}", self.algorithm, path.display(), digest);
        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    /// Yields `good` bytes, then fails every read with `kind`.
    struct FailingReader {
        good: usize,
        kind: io::ErrorKind,
        reads: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            if self.good == 0 {
                return Err(io::Error::new(self.kind, "read failed"));
            }
            let n = buf.len().min(self.good);
            buf[..n].fill(b'x');
            self.good -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_read_error_partway_returns_error() {
        let mut reader = FailingReader {
            good: 100,
            kind: io::ErrorKind::Other,
            reads: 0,
        };
        let result = Hasher::new().with_buffer_size(32).hash_reader(&mut reader);

        let err = result.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        // Four 32-byte chunks cover the 100 good bytes; the fifth read fails
        assert_eq!(reader.reads, 5);
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        struct InterruptOnce {
            interrupted: bool,
            data: Cursor<&'static [u8]>,
        }

        impl Read for InterruptOnce {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::Error::from(io::ErrorKind::Interrupted));
                }
                self.data.read(buf)
            }
        }

        let reader = InterruptOnce {
            interrupted: false,
            data: Cursor::new(&b"hello"[..]),
        };
        let digest = Hasher::new().hash_reader(reader).unwrap();
        assert_eq!(digest.to_hex(), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_md5_known_vector() {
        let hasher = Hasher::new();
        let digest = hasher.hash_reader(Cursor::new(b"hello")).unwrap();
        assert_eq!(digest.to_hex(), "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(digest.len(), 16);
    }

    #[test]
    fn test_md5_empty_input() {
        let digest = Hasher::new().hash_reader(Cursor::new(b"")).unwrap();
        assert_eq!(digest.to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_sha256_known_vector() {
        let hasher = Hasher::with_algorithm(Algorithm::Sha256);
        let digest = hasher.hash_reader(Cursor::new(b"abc")).unwrap();
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_lengths_match_algorithm() {
        for algorithm in [
            Algorithm::Md5,
            Algorithm::Sha256,
            Algorithm::Sha512,
            Algorithm::Blake3,
        ] {
            let digest = Hasher::with_algorithm(algorithm)
                .hash_reader(Cursor::new(b"content"))
                .unwrap();
            assert_eq!(digest.len(), algorithm.digest_len(), "{}", algorithm);
        }
    }

    #[test]
    fn test_chunk_size_does_not_change_digest() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let reference = Hasher::new().hash_reader(Cursor::new(&data)).unwrap();

        for size in [1, 7, 16, 4096, 1 << 20] {
            let digest = Hasher::new()
                .with_buffer_size(size)
                .hash_reader(Cursor::new(&data))
                .unwrap();
            assert_eq!(digest, reference, "chunk size {}", size);
        }
    }

    #[test]
    fn test_buffer_size_clamped() {
        assert_eq!(Hasher::new().with_buffer_size(0).buffer_size(), 1);
    }

    #[test]
    fn test_algorithm_from_name() {
        assert_eq!("MD5".parse::<Algorithm>().unwrap(), Algorithm::Md5);
        assert_eq!("SHA-256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
        assert_eq!("sha_512".parse::<Algorithm>().unwrap(), Algorithm::Sha512);
        assert_eq!("Blake3".parse::<Algorithm>().unwrap(), Algorithm::Blake3);
    }

    #[test]
    fn test_algorithm_unavailable() {
        let err = Hasher::from_name("whirlpool").unwrap_err();
        assert!(matches!(err, HashError::AlgorithmUnavailable(ref n) if n == "whirlpool"));
        assert_eq!(err.to_string(), "Digest algorithm not available: whirlpool");
    }

    #[test]
    fn test_hash_file_matches_reader() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"hello").unwrap();

        let hasher = Hasher::new();
        assert_eq!(
            hasher.hash_file(&path).unwrap(),
            hasher.hash_reader(Cursor::new(b"hello")).unwrap()
        );
    }

    #[test]
    fn test_hash_file_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.bin");

        let err = Hasher::new().hash_file(&path).unwrap_err();
        assert!(matches!(err, HashError::NotFound(p) if p == path));
    }

    #[test]
    fn test_digest_ordering_is_bytewise() {
        let low = Digest::from([0x0a_u8, 0xff].as_slice());
        let high = Digest::from([0x0b_u8, 0x00].as_slice());
        assert!(low < high);
    }

    #[test]
    fn test_digest_hex_roundtrip() {
        let digest = Digest::from([0xde_u8, 0xad, 0xbe, 0xef].as_slice());
        assert_eq!(digest.to_string(), "deadbeef");
        assert_eq!(Digest::from_hex("deadbeef"), Some(digest));
        assert_eq!(Digest::from_hex("abc"), None);
        assert_eq!(Digest::from_hex("zz"), None);
    }
}
