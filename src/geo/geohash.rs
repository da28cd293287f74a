//! Geohash encoding, decoding and neighbor lookup
//!
//! A geohash interleaves longitude and latitude bisection bits, longitude
//! first, and packs them five at a time into base-32 characters. Decoding
//! and neighbor lookup both work on the integer cell grid recovered from
//! those bits, so neighbors are exact cells rather than nudged points.

use crate::column::{Coord, Neighbors};
use crate::dispatch::{Broadcast, Dispatcher};
use crate::error::{ColHashError, Result};

/// Precision used when none is given, or when it is zero or negative
pub const DEFAULT_PRECISION: usize = 12;

/// Longest supported geohash
pub const MAX_PRECISION: usize = 12;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

const INVALID: u8 = 0xFF;

const DECODE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 32 {
        let c = BASE32[i];
        table[c as usize] = i as u8;
        table[c.to_ascii_uppercase() as usize] = i as u8;
        i += 1;
    }
    table
};

/// Integer cell coordinates of a geohash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    lon: u64,
    lon_bits: u32,
    lat: u64,
    lat_bits: u32,
    len: usize,
}

impl Cell {
    fn parse(hash: &str) -> Result<Self> {
        if hash.is_empty() {
            return Err(ColHashError::geohash(hash, "empty hash"));
        }
        if hash.len() > MAX_PRECISION {
            return Err(ColHashError::geohash(
                hash,
                format!("longer than {} characters", MAX_PRECISION),
            ));
        }

        let (mut lon, mut lat) = (0u64, 0u64);
        let mut bit = 0usize;
        for c in hash.bytes() {
            let value = DECODE[c as usize];
            if value == INVALID {
                return Err(ColHashError::geohash(
                    hash,
                    format!("invalid character '{}'", char::from(c)),
                ));
            }
            for shift in (0..5).rev() {
                let b = u64::from((value >> shift) & 1);
                if bit % 2 == 0 {
                    lon = (lon << 1) | b;
                } else {
                    lat = (lat << 1) | b;
                }
                bit += 1;
            }
        }

        let total = (hash.len() * 5) as u32;
        Ok(Self {
            lon,
            lon_bits: total.div_ceil(2),
            lat,
            lat_bits: total / 2,
            len: hash.len(),
        })
    }

    fn lon_width(&self) -> f64 {
        360.0 / (1u64 << self.lon_bits) as f64
    }

    fn lat_height(&self) -> f64 {
        180.0 / (1u64 << self.lat_bits) as f64
    }

    fn center(&self) -> Coord {
        let width = self.lon_width();
        let height = self.lat_height();
        Coord::new(
            -180.0 + (self.lon as f64 + 0.5) * width,
            -90.0 + (self.lat as f64 + 0.5) * height,
        )
    }

    /// Cell `dx` columns east and `dy` rows north.
    ///
    /// Longitude wraps at the antimeridian; latitude stops at the poles.
    fn offset(&self, dx: i64, dy: i64) -> Self {
        let columns = 1i64 << self.lon_bits;
        let rows = 1i64 << self.lat_bits;
        Self {
            lon: (self.lon as i64 + dx).rem_euclid(columns) as u64,
            lat: (self.lat as i64 + dy).clamp(0, rows - 1) as u64,
            ..*self
        }
    }

    fn to_hash(self) -> String {
        let mut out = String::with_capacity(self.len);
        let (mut lon_left, mut lat_left) = (self.lon_bits, self.lat_bits);
        let mut bit = 0usize;
        for _ in 0..self.len {
            let mut value = 0u8;
            for _ in 0..5 {
                let b = if bit % 2 == 0 {
                    lon_left -= 1;
                    (self.lon >> lon_left) & 1
                } else {
                    lat_left -= 1;
                    (self.lat >> lat_left) & 1
                };
                value = (value << 1) | b as u8;
                bit += 1;
            }
            out.push(char::from(BASE32[value as usize]));
        }
        out
    }
}

/// Check that a coordinate is finite and inside the lon/lat ranges
pub fn validate(coord: Coord) -> Result<()> {
    let Coord { longitude, latitude } = coord;
    if !longitude.is_finite() || !latitude.is_finite() {
        return Err(ColHashError::coordinate(longitude, latitude, "not finite"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ColHashError::coordinate(
            longitude,
            latitude,
            "longitude outside [-180, 180]",
        ));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ColHashError::coordinate(
            longitude,
            latitude,
            "latitude outside [-90, 90]",
        ));
    }
    Ok(())
}

/// Encode a coordinate as a geohash of `precision` characters (1..=12)
pub fn encode(coord: Coord, precision: usize) -> Result<String> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(ColHashError::evaluation(format!(
            "geohash precision must be between 1 and {}, got {}",
            MAX_PRECISION, precision
        )));
    }
    validate(coord)?;

    let (mut lon_lo, mut lon_hi) = (-180.0f64, 180.0f64);
    let (mut lat_lo, mut lat_hi) = (-90.0f64, 90.0f64);
    let mut out = String::with_capacity(precision);
    let mut value = 0usize;
    let mut bits = 0;
    let mut lon_turn = true;

    while out.len() < precision {
        let bit = if lon_turn {
            let mid = (lon_lo + lon_hi) / 2.0;
            if coord.longitude >= mid {
                lon_lo = mid;
                1
            } else {
                lon_hi = mid;
                0
            }
        } else {
            let mid = (lat_lo + lat_hi) / 2.0;
            if coord.latitude >= mid {
                lat_lo = mid;
                1
            } else {
                lat_hi = mid;
                0
            }
        };
        value = (value << 1) | bit;
        bits += 1;
        lon_turn = !lon_turn;

        if bits == 5 {
            out.push(char::from(BASE32[value]));
            value = 0;
            bits = 0;
        }
    }

    Ok(out)
}

/// Center of the cell named by `hash`; upper-case input is accepted
pub fn decode(hash: &str) -> Result<Coord> {
    Cell::parse(hash).map(|cell| cell.center())
}

/// Half the cell's width and height in degrees, `(longitude, latitude)`
pub fn cell_error(hash: &str) -> Result<(f64, f64)> {
    let cell = Cell::parse(hash)?;
    Ok((cell.lon_width() / 2.0, cell.lat_height() / 2.0))
}

/// The eight cells around `hash`, each as long as `hash`
pub fn neighbors(hash: &str) -> Result<Neighbors> {
    let cell = Cell::parse(hash)?;
    let at = |dx, dy| cell.offset(dx, dy).to_hash();
    Ok(Neighbors {
        n: at(0, 1),
        ne: at(1, 1),
        e: at(1, 0),
        se: at(1, -1),
        s: at(0, -1),
        sw: at(-1, -1),
        w: at(-1, 0),
        nw: at(-1, 1),
    })
}

/// Resolve a scalar precision slot.
///
/// Absent, null, zero and negative all mean [`DEFAULT_PRECISION`]; anything
/// above [`MAX_PRECISION`] is a configuration error.
pub fn scalar_precision(slot: Option<Option<i64>>) -> Result<i64> {
    match slot.flatten() {
        Some(p) if p > MAX_PRECISION as i64 => Err(ColHashError::config(format!(
            "geohash precision must be at most {}, got {}",
            MAX_PRECISION, p
        ))),
        Some(p) if p > 0 => Ok(p),
        _ => Ok(DEFAULT_PRECISION as i64),
    }
}

fn row_precision(p: i64) -> Result<usize> {
    match p {
        p if p <= 0 => Ok(DEFAULT_PRECISION),
        p if p > MAX_PRECISION as i64 => Err(ColHashError::evaluation(format!(
            "geohash precision must be at most {}, got {}",
            MAX_PRECISION, p
        ))),
        p => Ok(p as usize),
    }
}

/// Geohash every non-null coordinate
pub fn encode_column(
    dispatcher: &Dispatcher,
    input: &[Option<Coord>],
    precision: Broadcast<'_, i64>,
) -> Result<Vec<Option<String>>> {
    dispatcher.try_map_with_param(input, precision, |coord, p| encode(*coord, row_precision(p)?))
}

/// Decode every non-null geohash to its cell center
pub fn decode_column<T>(dispatcher: &Dispatcher, input: &[Option<T>]) -> Result<Vec<Option<Coord>>>
where
    T: AsRef<str> + Sync,
{
    dispatcher.try_map(input, |hash| decode(hash.as_ref()))
}

/// Neighbors of every non-null geohash
pub fn neighbors_column<T>(
    dispatcher: &Dispatcher,
    input: &[Option<T>],
) -> Result<Vec<Option<Neighbors>>>
where
    T: AsRef<str> + Sync,
{
    dispatcher.try_map(input, |hash| neighbors(hash.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn origin() -> Coord {
        Coord::new(-120.6623, 35.3003)
    }

    #[test]
    fn test_encode_vectors() {
        assert_eq!(encode(origin(), 5).unwrap(), "9q60y");
        assert_eq!(encode(origin(), 12).unwrap(), "9q60y60rhsgg");
        assert_eq!(encode(Coord::new(90.6623, 40.3003), 12).unwrap(), "wp0mr06q28qt");
    }

    #[test]
    fn test_decode_within_cell() {
        let decoded = decode("9q60y60rhsgg").unwrap();
        let (lon_err, lat_err) = cell_error("9q60y60rhsgg").unwrap();
        assert!((decoded.longitude - origin().longitude).abs() <= lon_err);
        assert!((decoded.latitude - origin().latitude).abs() <= lat_err);
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(decode("9Q60Y").unwrap(), decode("9q60y").unwrap());
    }

    #[test]
    fn test_decode_rejects_bad_hashes() {
        for hash in ["", "9q6a", "9q60y60rhsggg", "9q 0"] {
            let err = decode(hash).unwrap_err();
            assert!(err.is_evaluation_error(), "{}", hash);
        }
    }

    #[test]
    fn test_neighbors_vector() {
        let n = neighbors("sp1xk2m6194y").unwrap();
        assert_eq!(n.n, "sp1xk2m6194z");
        assert_eq!(n.ne, "sp1xk2m6195p");
        assert_eq!(n.e, "sp1xk2m6195n");
        assert_eq!(n.se, "sp1xk2m6195j");
        assert_eq!(n.s, "sp1xk2m6194v");
        assert_eq!(n.sw, "sp1xk2m6194t");
        assert_eq!(n.w, "sp1xk2m6194w");
        assert_eq!(n.nw, "sp1xk2m6194x");
    }

    #[test]
    fn test_neighbors_wrap_and_clamp() {
        // "b" and "z" touch the north pole; "0" sits at the south-west corner
        let top = neighbors("z").unwrap();
        assert_eq!(top.n, "z");
        assert_eq!(top.e, "b");

        let corner = neighbors("0").unwrap();
        assert_eq!(corner.s, "0");
        assert_eq!(corner.w, "p");
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(encode(Coord::new(181.0, 0.0), 5).is_err());
        assert!(encode(Coord::new(0.0, -90.5), 5).is_err());
        assert!(encode(Coord::new(f64::NAN, 0.0), 5).is_err());
        assert!(encode(Coord::new(180.0, 90.0), 12).is_ok());
    }

    #[test]
    fn test_precision_resolution() {
        assert_eq!(scalar_precision(None).unwrap(), 12);
        assert_eq!(scalar_precision(Some(None)).unwrap(), 12);
        assert_eq!(scalar_precision(Some(Some(0))).unwrap(), 12);
        assert_eq!(scalar_precision(Some(Some(-3))).unwrap(), 12);
        assert_eq!(scalar_precision(Some(Some(5))).unwrap(), 5);
        assert!(scalar_precision(Some(Some(13))).unwrap_err().is_config_error());
    }

    #[test]
    fn test_encode_column_per_row_precision() {
        let input = vec![Some(origin()), Some(origin()), Some(origin()), None];
        let precision = [Some(5i64), None, Some(0), Some(5)];
        let out = encode_column(&Dispatcher::default(), &input, Broadcast::Column(&precision)).unwrap();
        assert_eq!(
            out,
            vec![
                Some("9q60y".to_string()),
                None,
                Some("9q60y60rhsgg".to_string()),
                None
            ]
        );

        let too_long = [Some(13i64)];
        let err = encode_column(&Dispatcher::default(), &input[..1], Broadcast::Column(&too_long))
            .unwrap_err();
        assert!(err.is_evaluation_error());
    }

    #[test]
    fn test_decode_and_neighbors_columns() {
        let input = vec![Some("9q60y"), None];
        let decoded = decode_column(&Dispatcher::default(), &input).unwrap();
        assert!(decoded[0].is_some());
        assert!(decoded[1].is_none());

        let around = neighbors_column(&Dispatcher::default(), &input).unwrap();
        assert_eq!(around[0].as_ref().map(|n| n.n.len()), Some(5));
        assert!(around[1].is_none());
    }

    proptest! {
        #[test]
        fn prop_round_trip_within_half_cell(
            lon in -180.0f64..180.0,
            lat in -90.0f64..90.0,
            precision in 1usize..=12,
        ) {
            let hash = encode(Coord::new(lon, lat), precision).unwrap();
            prop_assert_eq!(hash.len(), precision);

            let center = decode(&hash).unwrap();
            let (lon_err, lat_err) = cell_error(&hash).unwrap();
            prop_assert!((center.longitude - lon).abs() <= lon_err + 1e-9);
            prop_assert!((center.latitude - lat).abs() <= lat_err + 1e-9);
        }

        #[test]
        fn prop_east_then_west_returns(
            lon in -180.0f64..180.0,
            lat in -90.0f64..90.0,
            precision in 1usize..=12,
        ) {
            let hash = encode(Coord::new(lon, lat), precision).unwrap();
            let east = neighbors(&hash).unwrap().e;
            prop_assert_eq!(neighbors(&east).unwrap().w, hash);
        }
    }
}
