//! Operation registry and execution plans
//!
//! The registry maps operation names to engine algorithms. Planning an
//! operation validates its static parameters once and yields a [`Plan`]
//! whose output type is known up front; executing the plan runs the bound
//! algorithm over a column through the shared [`Dispatcher`].

use crate::column::{Column, Coord, DataType};
use crate::config::EngineConfig;
use crate::dispatch::{Broadcast, Dispatcher};
use crate::error::{ColHashError, Result};
use crate::geo::{geohash, h3};
use crate::hash::{
    hex_column, uuid5_column, DigestAlgorithm, Digester, FastHashAlgorithm, FastHasher,
    SeedSlot, UuidNamespace,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// A registered operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Hex digest
    Digest(DigestAlgorithm),
    /// Non-cryptographic hash
    Fast(FastHashAlgorithm),
    /// UUIDv5 in a namespace
    Uuid5(UuidNamespace),
    /// Coordinate to geohash
    GeohashEncode,
    /// Geohash to cell center
    GeohashDecode,
    /// Geohash to its eight neighbors
    GeohashNeighbors,
    /// Coordinate to H3 cell
    H3Encode,
}

impl Operation {
    /// Column types accepted as primary input
    pub fn input_types(&self) -> &'static [DataType] {
        match self {
            Self::Digest(_) | Self::Fast(_) | Self::Uuid5(_) => &[DataType::Utf8, DataType::Binary],
            Self::GeohashEncode | Self::H3Encode => &[DataType::Coord],
            Self::GeohashDecode | Self::GeohashNeighbors => &[DataType::Utf8],
        }
    }

    /// Output column type
    pub fn output_type(&self) -> DataType {
        match self {
            Self::Digest(_) | Self::Uuid5(_) => DataType::Utf8,
            Self::Fast(algorithm) => algorithm.output_type(),
            Self::GeohashEncode | Self::H3Encode => DataType::Utf8,
            Self::GeohashDecode => DataType::Coord,
            Self::GeohashNeighbors => DataType::Neighbors,
        }
    }

    /// Whether the operation takes a seed
    pub fn takes_seed(&self) -> bool {
        matches!(self, Self::Fast(_))
    }

    /// Whether the operation takes a length, precision or resolution
    pub fn takes_length(&self) -> bool {
        match self {
            Self::Digest(algorithm) => algorithm.is_xof(),
            Self::GeohashEncode | Self::H3Encode => true,
            _ => false,
        }
    }
}

const OPERATIONS: [(&str, Operation); 28] = [
    ("sha1", Operation::Digest(DigestAlgorithm::Sha1)),
    ("md5", Operation::Digest(DigestAlgorithm::Md5)),
    ("blake3", Operation::Digest(DigestAlgorithm::Blake3)),
    ("sha2_224", Operation::Digest(DigestAlgorithm::Sha2_224)),
    ("sha2_256", Operation::Digest(DigestAlgorithm::Sha2_256)),
    ("sha2_384", Operation::Digest(DigestAlgorithm::Sha2_384)),
    ("sha2_512", Operation::Digest(DigestAlgorithm::Sha2_512)),
    ("sha3_224", Operation::Digest(DigestAlgorithm::Sha3_224)),
    ("sha3_256", Operation::Digest(DigestAlgorithm::Sha3_256)),
    ("sha3_384", Operation::Digest(DigestAlgorithm::Sha3_384)),
    ("sha3_512", Operation::Digest(DigestAlgorithm::Sha3_512)),
    ("sha3_shake128", Operation::Digest(DigestAlgorithm::Shake128)),
    ("sha3_shake256", Operation::Digest(DigestAlgorithm::Shake256)),
    ("wyhash", Operation::Fast(FastHashAlgorithm::WyHash)),
    ("murmur32", Operation::Fast(FastHashAlgorithm::Murmur32)),
    ("murmur128", Operation::Fast(FastHashAlgorithm::Murmur128)),
    ("xxhash32", Operation::Fast(FastHashAlgorithm::XxHash32)),
    ("xxhash64", Operation::Fast(FastHashAlgorithm::XxHash64)),
    ("xxh3_64", Operation::Fast(FastHashAlgorithm::Xxh3_64)),
    ("xxh3_128", Operation::Fast(FastHashAlgorithm::Xxh3_128)),
    ("uuid5_dns", Operation::Uuid5(UuidNamespace::Dns)),
    ("uuid5_url", Operation::Uuid5(UuidNamespace::Url)),
    ("uuid5_oid", Operation::Uuid5(UuidNamespace::Oid)),
    ("uuid5_x500", Operation::Uuid5(UuidNamespace::X500)),
    ("ghash_encode", Operation::GeohashEncode),
    ("ghash_decode", Operation::GeohashDecode),
    ("ghash_neighbors", Operation::GeohashNeighbors),
    ("h3_encode", Operation::H3Encode),
];

/// Deprecated names and the operations they stand for
const DEPRECATED_ALIASES: [(&str, &str); 1] = [("sha256", "sha2_256")];

/// Keyword arguments of an operation.
///
/// Each slot is `None` when the keyword is absent and `Some(None)` when it
/// is present but null; the two are handled differently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Kwargs {
    /// Seed for seeded hashes
    #[serde(default, deserialize_with = "present")]
    pub seed: Option<Option<u64>>,
    /// SHAKE output length, geohash precision or H3 resolution
    #[serde(default, deserialize_with = "present")]
    pub length: Option<Option<i64>>,
}

fn present<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Kwargs {
    /// Parse keyword arguments from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(Some(seed));
        self
    }

    /// Pass the seed slot as null
    pub fn with_null_seed(mut self) -> Self {
        self.seed = Some(None);
        self
    }

    /// Set the length
    pub fn with_length(mut self, length: i64) -> Self {
        self.length = Some(Some(length));
        self
    }
}

/// Name table of every operation, built once
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    operations: BTreeMap<&'static str, Operation>,
    dispatcher: Dispatcher,
}

impl OperationRegistry {
    /// Build the registry and its dispatcher
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let dispatcher = Dispatcher::new(config)?;
        let operations: BTreeMap<_, _> = OPERATIONS.into_iter().collect();

        tracing::info!(
            operations = operations.len(),
            threads = config.effective_threads(),
            chunk_size = dispatcher.chunk_size(),
            "operation registry ready"
        );

        Ok(Self {
            operations,
            dispatcher,
        })
    }

    /// Registered operation names in sorted order, aliases excluded
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.keys().copied()
    }

    /// Registered operations in name order
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, Operation)> + '_ {
        self.operations.iter().map(|(name, op)| (*name, *op))
    }

    /// Dispatcher shared by every plan
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Look up an operation by name, resolving deprecated aliases
    pub fn get(&self, name: &str) -> Result<Operation> {
        let canonical = match DEPRECATED_ALIASES.iter().find(|(alias, _)| *alias == name) {
            Some((alias, target)) => {
                tracing::warn!("'{}' is deprecated, use '{}' instead", alias, target);
                *target
            }
            None => name,
        };

        self.operations
            .get(canonical)
            .copied()
            .ok_or_else(|| ColHashError::UnknownOperation(name.to_string()))
    }

    /// Validate static parameters and bind an operation for execution
    pub fn plan(&self, name: &str, kwargs: &Kwargs) -> Result<Plan> {
        let operation = self.get(name)?;

        if kwargs.seed.is_some() && !operation.takes_seed() {
            return Err(ColHashError::config(format!("'{}' does not take a seed", name)));
        }
        if kwargs.length.is_some() && !operation.takes_length() {
            return Err(ColHashError::config(format!("'{}' does not take a length", name)));
        }

        let bound = match operation {
            Operation::Digest(algorithm) => {
                let length = match kwargs.length.flatten() {
                    Some(len) if len < 0 => {
                        return Err(ColHashError::config(format!(
                            "output length must be positive, got {}",
                            len
                        )))
                    }
                    Some(len) => Some(len as usize),
                    None => None,
                };
                Bound::Digest(Digester::new(algorithm, length)?)
            }
            Operation::Fast(algorithm) => {
                Bound::Fast(FastHasher::new(algorithm, SeedSlot::from(kwargs.seed)))
            }
            Operation::Uuid5(namespace) => Bound::Uuid5(namespace),
            Operation::GeohashEncode => Bound::GeohashEncode {
                precision: geohash::scalar_precision(kwargs.length)?,
            },
            Operation::GeohashDecode => Bound::GeohashDecode,
            Operation::GeohashNeighbors => Bound::GeohashNeighbors,
            Operation::H3Encode => Bound::H3Encode {
                resolution: h3::scalar_resolution(kwargs.length)?,
            },
        };

        tracing::debug!(operation = name, ?kwargs, "planned operation");

        Ok(Plan {
            name: name.to_string(),
            operation,
            bound,
            dispatcher: self.dispatcher.clone(),
        })
    }
}

/// Timing of one operation over a synthetic column
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    /// Operation name
    pub operation: &'static str,
    /// Rows processed
    pub rows: usize,
    /// Wall time of one pass
    pub duration: Duration,
    /// Throughput in rows per second
    pub rows_per_sec: f64,
}

impl OperationRegistry {
    /// Time every operation over a synthetic column of `rows` rows.
    ///
    /// Results are sorted fastest first.
    pub fn benchmark(&self, rows: usize) -> Result<Vec<BenchmarkResult>> {
        let text = Column::Utf8((0..rows).map(|i| Some(format!("row-{:08}", i))).collect());
        let coords: Vec<Option<Coord>> = (0..rows)
            .map(|i| {
                let t = i as f64 / rows.max(1) as f64;
                Some(Coord::new(-180.0 + 360.0 * t, -90.0 + 180.0 * t))
            })
            .collect();
        let hashes = Column::Utf8(geohash::encode_column(
            &self.dispatcher,
            &coords,
            Broadcast::Scalar(Some(geohash::DEFAULT_PRECISION as i64)),
        )?);
        let coords = Column::Coord(coords);

        let mut results = Vec::with_capacity(self.operations.len());
        for (name, operation) in self.operations() {
            let kwargs = match operation {
                Operation::Digest(algorithm) if algorithm.is_xof() => Kwargs::default().with_length(32),
                _ => Kwargs::default(),
            };
            let plan = self.plan(name, &kwargs)?;
            let input = match operation {
                Operation::GeohashEncode | Operation::H3Encode => &coords,
                Operation::GeohashDecode | Operation::GeohashNeighbors => &hashes,
                _ => &text,
            };

            let start = Instant::now();
            plan.execute(std::slice::from_ref(input))?;
            let duration = start.elapsed();

            results.push(BenchmarkResult {
                operation: name,
                rows,
                duration,
                rows_per_sec: rows as f64 / duration.as_secs_f64().max(f64::EPSILON),
            });
        }

        results.sort_by(|a, b| a.duration.cmp(&b.duration));
        Ok(results)
    }
}

/// Operation with its static parameters resolved
#[derive(Debug, Clone)]
enum Bound {
    Digest(Digester),
    Fast(FastHasher),
    Uuid5(UuidNamespace),
    GeohashEncode { precision: i64 },
    GeohashDecode,
    GeohashNeighbors,
    H3Encode { resolution: i64 },
}

/// A validated operation ready to run over columns
#[derive(Debug, Clone)]
pub struct Plan {
    name: String,
    operation: Operation,
    bound: Bound,
    dispatcher: Dispatcher,
}

impl Plan {
    /// Name the plan was created from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The planned operation
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Type of the column [`Plan::execute`] returns
    pub fn output_type(&self) -> DataType {
        self.operation.output_type()
    }

    /// Run the operation.
    ///
    /// `inputs[0]` is the primary column; `inputs[1]`, when present, is a
    /// per-row seed or length column.
    pub fn execute(&self, inputs: &[Column]) -> Result<Column> {
        let (primary, param) = match inputs {
            [primary] => (primary, None),
            [primary, param] => (primary, Some(param)),
            _ => {
                return Err(ColHashError::evaluation(format!(
                    "'{}' expects one input column and at most one parameter column, got {} columns",
                    self.name,
                    inputs.len()
                )))
            }
        };

        if param.is_some() && !(self.operation.takes_seed() || self.operation.takes_length()) {
            return Err(ColHashError::evaluation(format!(
                "'{}' does not take a parameter column",
                self.name
            )));
        }

        let d = &self.dispatcher;
        let output = match (&self.bound, primary) {
            (Bound::Digest(digester), Column::Utf8(v)) => {
                if param.is_some() {
                    return Err(self.fixed_length_param());
                }
                Column::Utf8(hex_column(d, digester, v)?)
            }
            (Bound::Digest(digester), Column::Binary(v)) => {
                if param.is_some() {
                    return Err(self.fixed_length_param());
                }
                Column::Utf8(hex_column(d, digester, v)?)
            }
            (Bound::Fast(hasher), Column::Utf8(v)) => hasher.hash_column(d, v, param)?,
            (Bound::Fast(hasher), Column::Binary(v)) => hasher.hash_column(d, v, param)?,
            (Bound::Uuid5(namespace), Column::Utf8(v)) => Column::Utf8(uuid5_column(d, *namespace, v)?),
            (Bound::Uuid5(namespace), Column::Binary(v)) => {
                Column::Utf8(uuid5_column(d, *namespace, v)?)
            }
            (Bound::GeohashEncode { precision }, Column::Coord(v)) => {
                let precision = self.length_param(param, *precision, v.len())?;
                Column::Utf8(geohash::encode_column(d, v, precision)?)
            }
            (Bound::GeohashDecode, Column::Utf8(v)) => Column::Coord(geohash::decode_column(d, v)?),
            (Bound::GeohashNeighbors, Column::Utf8(v)) => {
                Column::Neighbors(geohash::neighbors_column(d, v)?)
            }
            (Bound::H3Encode { resolution }, Column::Coord(v)) => {
                let resolution = self.length_param(param, *resolution, v.len())?;
                Column::Utf8(h3::encode_column(d, v, resolution)?)
            }
            (_, other) => {
                let expected = self
                    .operation
                    .input_types()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" or ");
                return Err(ColHashError::input_type(
                    self.name.as_str(),
                    expected,
                    other.data_type(),
                ));
            }
        };

        Ok(output)
    }

    fn fixed_length_param(&self) -> ColHashError {
        ColHashError::evaluation(format!(
            "'{}' takes its output length only as a static parameter",
            self.name
        ))
    }

    fn length_param<'a>(
        &self,
        param: Option<&'a Column>,
        scalar: i64,
        rows: usize,
    ) -> Result<Broadcast<'a, i64>> {
        match param {
            None => Ok(Broadcast::Scalar(Some(scalar))),
            Some(Column::Int64(values)) => Broadcast::for_rows(values, rows),
            Some(other) => Err(ColHashError::input_type(
                format!("{} length", self.name),
                DataType::Int64.to_string(),
                other.data_type(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> OperationRegistry {
        OperationRegistry::new(&EngineConfig::default()).unwrap()
    }

    fn kwargs_for(name: &str) -> Kwargs {
        if name.starts_with("sha3_shake") {
            Kwargs::default().with_length(16)
        } else {
            Kwargs::default()
        }
    }

    /// Eight rows of valid input with a null at `k`
    fn input_for(operation: Operation, k: usize) -> Column {
        let rows = 0..8usize;
        match operation.input_types()[0] {
            DataType::Coord => Column::Coord(
                rows.map(|i| {
                    (i != k).then(|| Coord::new(-120.6623 + i as f64, 35.3003 - i as f64))
                })
                .collect(),
            ),
            _ if matches!(operation, Operation::GeohashDecode | Operation::GeohashNeighbors) => {
                Column::Utf8(
                    rows.map(|i| (i != k).then(|| format!("9q60y{}", i)))
                        .collect(),
                )
            }
            _ => Column::Utf8(rows.map(|i| (i != k).then(|| format!("value-{}", i))).collect()),
        }
    }

    #[test]
    fn test_every_name_plans() {
        let registry = registry();
        assert_eq!(registry.names().count(), OPERATIONS.len());
        for name in registry.names() {
            let plan = registry.plan(name, &kwargs_for(name)).unwrap();
            assert_eq!(plan.name(), name);
        }
    }

    #[test]
    fn test_unknown_operation() {
        let err = registry().plan("sha4", &Kwargs::default()).unwrap_err();
        assert!(err.is_config_error());
        assert!(matches!(err, ColHashError::UnknownOperation(_)));
    }

    #[test]
    fn test_deprecated_alias_matches() {
        let registry = registry();
        let input = [Column::utf8([Some("hello_world")])];
        let alias = registry.plan("sha256", &Kwargs::default()).unwrap();
        let canonical = registry.plan("sha2_256", &Kwargs::default()).unwrap();
        assert_eq!(alias.execute(&input).unwrap(), canonical.execute(&input).unwrap());
        assert_eq!(alias.operation(), canonical.operation());
    }

    #[test]
    fn test_null_at_k_for_every_operation() {
        let registry = registry();
        for (name, operation) in registry.operations() {
            let plan = registry.plan(name, &kwargs_for(name)).unwrap();
            let reference = plan.execute(&[input_for(operation, usize::MAX)]).unwrap();

            for k in [0, 3, 7] {
                let out = plan.execute(&[input_for(operation, k)]).unwrap();
                assert_eq!(out.data_type(), plan.output_type(), "{}", name);
                assert_eq!(out.len(), 8, "{}", name);
                for i in 0..8 {
                    if i == k {
                        assert!(out.is_null(i), "{} row {}", name, i);
                    } else {
                        assert_eq!(out.render(i), reference.render(i), "{} row {}", name, i);
                    }
                }
            }
        }
    }

    #[test]
    fn test_idempotent_and_parallel_equivalent() {
        let sequential = registry();
        let parallel = OperationRegistry::new(&EngineConfig {
            threads: 2,
            chunk_size: 3,
            parallel_threshold: 0,
        })
        .unwrap();

        for (name, operation) in sequential.operations() {
            let input = [input_for(operation, 5)];
            let plan = sequential.plan(name, &kwargs_for(name)).unwrap();
            let first = plan.execute(&input).unwrap();
            assert_eq!(first, plan.execute(&input).unwrap(), "{}", name);

            let parallel_plan = parallel.plan(name, &kwargs_for(name)).unwrap();
            assert_eq!(first, parallel_plan.execute(&input).unwrap(), "{}", name);
        }
    }

    #[test]
    fn test_kwargs_json_slots() {
        assert_eq!(Kwargs::from_json("{}").unwrap(), Kwargs::default());
        assert_eq!(Kwargs::from_json(r#"{"seed": null}"#).unwrap().seed, Some(None));
        assert_eq!(Kwargs::from_json(r#"{"seed": 42}"#).unwrap().seed, Some(Some(42)));
        assert_eq!(Kwargs::from_json(r#"{"length": 10}"#).unwrap().length, Some(Some(10)));
        assert!(Kwargs::from_json(r#"{"salt": 1}"#).is_err());
    }

    #[test]
    fn test_xxhash32_null_seed() {
        let registry = registry();
        let kwargs = Kwargs::from_json(r#"{"seed": null}"#).unwrap();
        let plan = registry.plan("xxhash32", &kwargs).unwrap();
        let err = plan.execute(&[Column::utf8([Some("hello_world")])]).unwrap_err();
        assert!(err.is_evaluation_error());
        assert!(err.to_string().contains("expected u32"));

        let plan = registry.plan("xxhash32", &Kwargs::default()).unwrap();
        let out = plan.execute(&[Column::utf8([Some("hello_world"), Some(""), None])]).unwrap();
        assert_eq!(out, Column::UInt32(vec![Some(1605956417), Some(46947589), None]));
    }

    #[test]
    fn test_bytes_vectors() {
        let registry = registry();
        let input = [Column::binary([Some(&b"my_bytes"[..])])];

        let md5 = registry.plan("md5", &Kwargs::default()).unwrap().execute(&input).unwrap();
        assert_eq!(md5.render(0).unwrap(), "4445d78d11baa258c5f4ac1b8d33b8ba");

        let blake3 = registry.plan("blake3", &Kwargs::default()).unwrap().execute(&input).unwrap();
        assert_eq!(
            blake3.render(0).unwrap(),
            "4656d42e3468733c9316ef5d4e4488682fc41ad441644ca63cde6aced8378605"
        );

        let wy = registry.plan("wyhash", &Kwargs::default()).unwrap().execute(&input).unwrap();
        assert_eq!(wy, Column::UInt64(vec![Some(5112362246832359110)]));
    }

    #[test]
    fn test_geo_operations() {
        let registry = registry();
        let coords = [Column::Coord(vec![Some(Coord::new(-120.6623, 35.3003)), None])];

        let five = Kwargs::default().with_length(5);
        let out = registry.plan("ghash_encode", &five).unwrap().execute(&coords).unwrap();
        assert_eq!(out, Column::utf8([Some("9q60y"), None]));

        let out = registry.plan("h3_encode", &five).unwrap().execute(&coords).unwrap();
        assert_eq!(out, Column::utf8([Some("8529adc7fffffff"), None]));

        let hashes = [Column::utf8([Some("sp1xk2m6194y")])];
        let out = registry
            .plan("ghash_neighbors", &Kwargs::default())
            .unwrap()
            .execute(&hashes)
            .unwrap();
        match out {
            Column::Neighbors(rows) => assert_eq!(rows[0].as_ref().unwrap().ne, "sp1xk2m6195p"),
            other => panic!("unexpected column {:?}", other),
        }
    }

    #[test]
    fn test_per_row_length_column() {
        let registry = registry();
        let plan = registry.plan("ghash_encode", &Kwargs::default()).unwrap();
        let coords = Column::Coord(vec![Some(Coord::new(-120.6623, 35.3003)); 2]);
        let lengths = Column::Int64(vec![Some(5), None]);
        let out = plan.execute(&[coords.clone(), lengths]).unwrap();
        assert_eq!(out, Column::utf8([Some("9q60y"), None]));

        let wrong = Column::UInt32(vec![Some(5), Some(5)]);
        assert!(plan.execute(&[coords, wrong]).unwrap_err().is_evaluation_error());
    }

    #[test]
    fn test_plan_time_errors() {
        let registry = registry();
        assert!(registry
            .plan("sha3_shake128", &Kwargs::default())
            .unwrap_err()
            .is_config_error());
        assert!(registry
            .plan("sha3_shake256", &Kwargs::default().with_length(0))
            .unwrap_err()
            .is_config_error());
        assert!(registry
            .plan("ghash_encode", &Kwargs::default().with_length(13))
            .unwrap_err()
            .is_config_error());
        assert!(registry
            .plan("h3_encode", &Kwargs::default().with_length(16))
            .unwrap_err()
            .is_config_error());
        assert!(registry
            .plan("md5", &Kwargs::default().with_seed(1))
            .unwrap_err()
            .is_config_error());
    }

    #[test]
    fn test_shake_output_length() {
        let registry = registry();
        let plan = registry
            .plan("sha3_shake128", &Kwargs::default().with_length(10))
            .unwrap();
        let out = plan.execute(&[Column::utf8([Some("hello_world")])]).unwrap();
        assert_eq!(out.render(0).unwrap(), "6b57b385e070e3534257");
    }

    #[test]
    fn test_wrong_input_type() {
        let registry = registry();
        let plan = registry.plan("ghash_encode", &Kwargs::default()).unwrap();
        let err = plan.execute(&[Column::utf8([Some("9q60y")])]).unwrap_err();
        assert!(matches!(err, ColHashError::InvalidInputType { .. }));

        let plan = registry.plan("md5", &Kwargs::default()).unwrap();
        let err = plan.execute(&[Column::UInt32(vec![Some(1)])]).unwrap_err();
        assert!(err.to_string().contains("Utf8 or Binary"));
        assert!(plan.execute(&[]).unwrap_err().is_evaluation_error());
    }

    #[test]
    fn test_benchmark_covers_every_operation() {
        let registry = registry();
        let results = registry.benchmark(64).unwrap();
        assert_eq!(results.len(), OPERATIONS.len());
        assert!(results.iter().all(|r| r.rows == 64));
        assert!(results.windows(2).all(|w| w[0].duration <= w[1].duration));
    }
}
