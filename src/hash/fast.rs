//! Fast non-cryptographic hashes
//!
//! wyhash, MurmurHash3 (x86_32 and x64_128), xxHash32/64 and XXH3-64/128.
//! These are for partitioning and deduplication, not security. 128-bit
//! results are rendered little-endian so they are identical on every host.

use crate::column::{Column, DataType};
use crate::dispatch::{Broadcast, Dispatcher};
use crate::error::{ColHashError, Result};
use std::borrow::Cow;

/// Seed used when the caller does not supply one
pub const DEFAULT_SEED: u64 = 0;

/// Supported non-cryptographic hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FastHashAlgorithm {
    /// wyhash, 64-bit
    WyHash,
    /// MurmurHash3 x86_32
    Murmur32,
    /// MurmurHash3 x64_128
    Murmur128,
    /// xxHash32
    XxHash32,
    /// xxHash64
    XxHash64,
    /// XXH3 64-bit
    Xxh3_64,
    /// XXH3 128-bit
    Xxh3_128,
}

/// Width of an algorithm's seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedWidth {
    /// 32-bit seed
    U32,
    /// 64-bit seed
    U64,
}

impl SeedWidth {
    fn type_name(&self) -> &'static str {
        match self {
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }
}

impl FastHashAlgorithm {
    /// Every supported algorithm
    pub const ALL: [Self; 7] = [
        Self::WyHash,
        Self::Murmur32,
        Self::Murmur128,
        Self::XxHash32,
        Self::XxHash64,
        Self::Xxh3_64,
        Self::Xxh3_128,
    ];

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::WyHash => "wyhash",
            Self::Murmur32 => "MurmurHash3-32",
            Self::Murmur128 => "MurmurHash3-128",
            Self::XxHash32 => "xxHash32",
            Self::XxHash64 => "xxHash64",
            Self::Xxh3_64 => "XXH3-64",
            Self::Xxh3_128 => "XXH3-128",
        }
    }

    /// Output column type
    pub fn output_type(&self) -> DataType {
        match self {
            Self::Murmur32 | Self::XxHash32 => DataType::UInt32,
            Self::WyHash | Self::XxHash64 | Self::Xxh3_64 => DataType::UInt64,
            Self::Murmur128 | Self::Xxh3_128 => DataType::Binary128,
        }
    }

    /// Seed width
    pub fn seed_width(&self) -> SeedWidth {
        match self {
            Self::Murmur32 | Self::Murmur128 | Self::XxHash32 => SeedWidth::U32,
            Self::WyHash | Self::XxHash64 | Self::Xxh3_64 | Self::Xxh3_128 => SeedWidth::U64,
        }
    }

    /// Whether a seed slot that is present must hold a value
    pub fn requires_seed(&self) -> bool {
        matches!(self, Self::XxHash32 | Self::XxHash64)
    }
}

/// wyhash of `data`
#[inline]
pub fn wyhash(data: &[u8], seed: u64) -> u64 {
    wyhash::wyhash(data, seed)
}

/// MurmurHash3 x86_32 of `data`
#[inline]
pub fn murmur32(data: &[u8], seed: u32) -> u32 {
    mur3::murmurhash3_x86_32(data, seed)
}

/// MurmurHash3 x64_128 of `data` as `h1 ‖ h2`, each little-endian
#[inline]
pub fn murmur128(data: &[u8], seed: u32) -> [u8; 16] {
    let (h1, h2) = mur3::murmurhash3_x64_128(data, seed);
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&h1.to_le_bytes());
    out[8..].copy_from_slice(&h2.to_le_bytes());
    out
}

/// xxHash32 of `data`
#[inline]
pub fn xxhash32(data: &[u8], seed: u32) -> u32 {
    xxhash_rust::xxh32::xxh32(data, seed)
}

/// xxHash64 of `data`
#[inline]
pub fn xxhash64(data: &[u8], seed: u64) -> u64 {
    xxhash_rust::xxh64::xxh64(data, seed)
}

/// XXH3 64-bit of `data`
#[inline]
pub fn xxh3_64(data: &[u8], seed: u64) -> u64 {
    xxhash_rust::xxh3::xxh3_64_with_seed(data, seed)
}

/// XXH3 128-bit of `data`, little-endian
#[inline]
pub fn xxh3_128(data: &[u8], seed: u64) -> [u8; 16] {
    xxhash_rust::xxh3::xxh3_128_with_seed(data, seed).to_le_bytes()
}

/// Seed exactly as handed over by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSlot {
    /// No seed parameter given
    #[default]
    Absent,
    /// Seed parameter given, value null
    Null,
    /// Seed parameter given with a value
    Value(u64),
}

impl From<Option<Option<u64>>> for SeedSlot {
    fn from(slot: Option<Option<u64>>) -> Self {
        match slot {
            None => Self::Absent,
            Some(None) => Self::Null,
            Some(Some(seed)) => Self::Value(seed),
        }
    }
}

fn narrow_seed(seed: u64, width: SeedWidth) -> Result<u64> {
    match width {
        SeedWidth::U32 if seed > u64::from(u32::MAX) => Err(ColHashError::evaluation(format!(
            "expected u32 seed, got {}",
            seed
        ))),
        _ => Ok(seed),
    }
}

/// A fast hash algorithm bound to its scalar seed
#[derive(Debug, Clone, Copy)]
pub struct FastHasher {
    algorithm: FastHashAlgorithm,
    seed: SeedSlot,
}

impl FastHasher {
    /// Create a hasher
    pub fn new(algorithm: FastHashAlgorithm, seed: SeedSlot) -> Self {
        Self { algorithm, seed }
    }

    /// Get the algorithm this hasher uses
    pub fn algorithm(&self) -> FastHashAlgorithm {
        self.algorithm
    }

    /// Resolve the scalar seed.
    ///
    /// An absent slot uses [`DEFAULT_SEED`]. A null slot is an error for
    /// algorithms that require a seed and the default otherwise.
    pub fn resolve_seed(&self) -> Result<u64> {
        let width = self.algorithm.seed_width();
        match self.seed {
            SeedSlot::Absent => Ok(DEFAULT_SEED),
            SeedSlot::Null if self.algorithm.requires_seed() => {
                Err(ColHashError::evaluation(format!(
                    "expected {}, got null for seed of {}",
                    width.type_name(),
                    self.algorithm.name()
                )))
            }
            SeedSlot::Null => Ok(DEFAULT_SEED),
            SeedSlot::Value(seed) => narrow_seed(seed, width),
        }
    }

    /// Hash every non-null row of a text or byte column.
    ///
    /// `seeds`, when given, supplies one seed per row (or one for all rows)
    /// and overrides the scalar seed; a null seed nulls its row.
    pub fn hash_column<T>(
        &self,
        dispatcher: &Dispatcher,
        input: &[Option<T>],
        seeds: Option<&Column>,
    ) -> Result<Column>
    where
        T: AsRef<[u8]> + Sync,
    {
        let per_row = seeds.map(seed_values).transpose()?;
        let seeds = match &per_row {
            Some(values) => Broadcast::for_rows(&values[..], input.len())?,
            None => Broadcast::Scalar(Some(self.resolve_seed()?)),
        };

        let column = match self.algorithm {
            FastHashAlgorithm::WyHash => {
                Column::UInt64(apply(dispatcher, input, seeds, |d, s| Ok(wyhash(d, s)))?)
            }
            FastHashAlgorithm::Murmur32 => Column::UInt32(apply(dispatcher, input, seeds, |d, s| {
                Ok(murmur32(d, narrow_seed(s, SeedWidth::U32)? as u32))
            })?),
            FastHashAlgorithm::Murmur128 => {
                Column::Binary128(apply(dispatcher, input, seeds, |d, s| {
                    Ok(murmur128(d, narrow_seed(s, SeedWidth::U32)? as u32))
                })?)
            }
            FastHashAlgorithm::XxHash32 => Column::UInt32(apply(dispatcher, input, seeds, |d, s| {
                Ok(xxhash32(d, narrow_seed(s, SeedWidth::U32)? as u32))
            })?),
            FastHashAlgorithm::XxHash64 => {
                Column::UInt64(apply(dispatcher, input, seeds, |d, s| Ok(xxhash64(d, s)))?)
            }
            FastHashAlgorithm::Xxh3_64 => {
                Column::UInt64(apply(dispatcher, input, seeds, |d, s| Ok(xxh3_64(d, s)))?)
            }
            FastHashAlgorithm::Xxh3_128 => {
                Column::Binary128(apply(dispatcher, input, seeds, |d, s| Ok(xxh3_128(d, s)))?)
            }
        };

        Ok(column)
    }
}

fn apply<T, O, F>(
    dispatcher: &Dispatcher,
    input: &[Option<T>],
    seeds: Broadcast<'_, u64>,
    f: F,
) -> Result<Vec<Option<O>>>
where
    T: AsRef<[u8]> + Sync,
    O: Send,
    F: Fn(&[u8], u64) -> Result<O> + Sync,
{
    dispatcher.try_map_with_param(input, seeds, |value, seed| f(value.as_ref(), seed))
}

/// Widen a per-row seed column to u64 seeds
fn seed_values(column: &Column) -> Result<Cow<'_, [Option<u64>]>> {
    match column {
        Column::UInt64(values) => Ok(Cow::Borrowed(values.as_slice())),
        Column::UInt32(values) => Ok(Cow::Owned(
            values.iter().map(|v| v.map(u64::from)).collect(),
        )),
        Column::Int64(values) => values
            .iter()
            .map(|v| {
                v.map(|s| {
                    u64::try_from(s).map_err(|_| {
                        ColHashError::evaluation(format!("expected unsigned seed, got {}", s))
                    })
                })
                .transpose()
            })
            .collect::<Result<Vec<_>>>()
            .map(Cow::Owned),
        other => Err(ColHashError::input_type(
            "seed",
            "UInt32, UInt64 or Int64",
            other.data_type(),
        )),
    }
}
