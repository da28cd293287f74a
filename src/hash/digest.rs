//! Cryptographic digests rendered as lowercase hex
//!
//! Each algorithm resolves once to a plain function pointer that fills a
//! caller-provided output buffer, so a column pass does no per-row
//! algorithm matching and reuses one digest buffer per chunk.

use crate::dispatch::Dispatcher;
use crate::error::{ColHashError, Result};

/// Upper bound on SHAKE output length in bytes
pub const MAX_XOF_OUTPUT: usize = 1024 * 1024;

/// Fills `out` with the digest of `data`; `out` has the configured length
type DigestFn = fn(&[u8], &mut [u8]);

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// MD5 (16 bytes)
    Md5,
    /// SHA-1 (20 bytes)
    Sha1,
    /// SHA-224 (28 bytes)
    Sha2_224,
    /// SHA-256 (32 bytes)
    Sha2_256,
    /// SHA-384 (48 bytes)
    Sha2_384,
    /// SHA-512 (64 bytes)
    Sha2_512,
    /// SHA3-224 (28 bytes)
    Sha3_224,
    /// SHA3-256 (32 bytes)
    Sha3_256,
    /// SHA3-384 (48 bytes)
    Sha3_384,
    /// SHA3-512 (64 bytes)
    Sha3_512,
    /// SHAKE128, caller-sized output
    Shake128,
    /// SHAKE256, caller-sized output
    Shake256,
    /// BLAKE3 (32 bytes)
    Blake3,
}

impl DigestAlgorithm {
    /// Every supported algorithm
    pub const ALL: [Self; 13] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha2_224,
        Self::Sha2_256,
        Self::Sha2_384,
        Self::Sha2_512,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Shake128,
        Self::Shake256,
        Self::Blake3,
    ];

    /// Fixed output size in bytes; `None` for extendable-output functions
    pub fn output_size(&self) -> Option<usize> {
        match self {
            Self::Md5 => Some(16),
            Self::Sha1 => Some(20),
            Self::Sha2_224 | Self::Sha3_224 => Some(28),
            Self::Sha2_256 | Self::Sha3_256 | Self::Blake3 => Some(32),
            Self::Sha2_384 | Self::Sha3_384 => Some(48),
            Self::Sha2_512 | Self::Sha3_512 => Some(64),
            Self::Shake128 | Self::Shake256 => None,
        }
    }

    /// Whether the caller chooses the output length
    pub fn is_xof(&self) -> bool {
        self.output_size().is_none()
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha2_224 => "SHA-224",
            Self::Sha2_256 => "SHA-256",
            Self::Sha2_384 => "SHA-384",
            Self::Sha2_512 => "SHA-512",
            Self::Sha3_224 => "SHA3-224",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Shake128 => "SHAKE128",
            Self::Shake256 => "SHAKE256",
            Self::Blake3 => "BLAKE3",
        }
    }

    fn kernel(&self) -> DigestFn {
        match self {
            Self::Md5 => fixed::<md5::Md5>,
            Self::Sha1 => fixed::<sha1::Sha1>,
            Self::Sha2_224 => fixed::<sha2::Sha224>,
            Self::Sha2_256 => fixed::<sha2::Sha256>,
            Self::Sha2_384 => fixed::<sha2::Sha384>,
            Self::Sha2_512 => fixed::<sha2::Sha512>,
            Self::Sha3_224 => fixed::<sha3::Sha3_224>,
            Self::Sha3_256 => fixed::<sha3::Sha3_256>,
            Self::Sha3_384 => fixed::<sha3::Sha3_384>,
            Self::Sha3_512 => fixed::<sha3::Sha3_512>,
            Self::Shake128 => xof::<sha3::Shake128>,
            Self::Shake256 => xof::<sha3::Shake256>,
            Self::Blake3 => blake3_kernel,
        }
    }
}

fn fixed<D: sha2::Digest>(data: &[u8], out: &mut [u8]) {
    out.copy_from_slice(&D::digest(data));
}

fn xof<X>(data: &[u8], out: &mut [u8])
where
    X: Default + sha3::digest::Update + sha3::digest::ExtendableOutput,
{
    let mut hasher = X::default();
    hasher.update(data);
    hasher.finalize_xof_into(out);
}

fn blake3_kernel(data: &[u8], out: &mut [u8]) {
    out.copy_from_slice(blake3::hash(data).as_bytes());
}

/// A digest algorithm bound to its output length
#[derive(Debug, Clone, Copy)]
pub struct Digester {
    algorithm: DigestAlgorithm,
    output_len: usize,
    kernel: DigestFn,
}

impl Digester {
    /// Bind an algorithm to an output length.
    ///
    /// SHAKE variants require a positive `output_len`; fixed-size
    /// algorithms accept only their own size.
    pub fn new(algorithm: DigestAlgorithm, output_len: Option<usize>) -> Result<Self> {
        let output_len = match (algorithm.output_size(), output_len) {
            (Some(size), None) => size,
            (Some(size), Some(len)) if len == size => size,
            (Some(size), Some(len)) => {
                return Err(ColHashError::config(format!(
                    "{} has a fixed output of {} bytes, got length {}",
                    algorithm.name(),
                    size,
                    len
                )))
            }
            (None, None) => {
                return Err(ColHashError::config(format!(
                    "{} requires an output length",
                    algorithm.name()
                )))
            }
            (None, Some(0)) => {
                return Err(ColHashError::config(format!(
                    "{} output length must be positive",
                    algorithm.name()
                )))
            }
            (None, Some(len)) if len > MAX_XOF_OUTPUT => {
                return Err(ColHashError::config(format!(
                    "{} output length {} exceeds limit of {} bytes",
                    algorithm.name(),
                    len,
                    MAX_XOF_OUTPUT
                )))
            }
            (None, Some(len)) => len,
        };

        Ok(Self {
            algorithm,
            output_len,
            kernel: algorithm.kernel(),
        })
    }

    /// Get the algorithm this digester uses
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Output length in bytes
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Compute the raw digest
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; self.output_len];
        (self.kernel)(data, &mut out);
        out
    }

    /// Compute the digest as lowercase hex, reusing `scratch` for the raw bytes
    pub fn hex_digest(&self, data: &[u8], scratch: &mut Vec<u8>) -> String {
        scratch.resize(self.output_len, 0);
        (self.kernel)(data, scratch);
        hex::encode(&scratch[..])
    }
}

/// Hex-digest every non-null row of a text or byte column
pub fn hex_column<T>(
    dispatcher: &Dispatcher,
    digester: &Digester,
    input: &[Option<T>],
) -> Result<Vec<Option<String>>>
where
    T: AsRef<[u8]> + Sync,
{
    dispatcher.map_with(input, |value, scratch: &mut Vec<u8>| {
        digester.hex_digest(value.as_ref(), scratch)
    })
}
