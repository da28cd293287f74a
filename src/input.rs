//! Reading CLI values into columns and rendering results
//!
//! Values come from the command line, a file, or stdin, one per line.
//! Coordinates are written `lon,lat`; with `--binary` values are hex.

use crate::column::{Column, Coord, DataType};
use crate::config::OutputFormat;
use crate::error::{ColHashError, Result};
use crate::registry::Operation;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// How raw lines become a column
#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    /// Decode values as hex bytes
    pub binary: bool,
    /// Line that stands for null
    pub null_marker: Option<String>,
}

/// Collect values from arguments, then from `path` (`-` reads stdin)
pub fn read_values(values: &[String], path: Option<&Path>) -> Result<Vec<String>> {
    let mut lines = values.to_vec();

    match path {
        Some(p) if p == Path::new("-") => {
            lines.extend(read_lines(std::io::stdin().lock())?);
        }
        Some(p) => {
            let file = std::fs::File::open(p)
                .map_err(|e| ColHashError::from(e).with_context(format!("reading {}", p.display())))?;
            lines.extend(read_lines(file)?);
        }
        None => {}
    }

    Ok(lines)
}

fn read_lines<R: Read>(reader: R) -> Result<Vec<String>> {
    BufReader::new(reader)
        .lines()
        .map(|line| line.map_err(ColHashError::from))
        .collect()
}

fn parse_coord(line: &str) -> Result<Coord> {
    let parsed = line.split_once(',').and_then(|(lon, lat)| {
        let lon = lon.trim().parse::<f64>().ok()?;
        let lat = lat.trim().parse::<f64>().ok()?;
        Some(Coord::new(lon, lat))
    });
    parsed.ok_or_else(|| {
        ColHashError::evaluation(format!("expected 'lon,lat' coordinate, got '{}'", line))
    })
}

/// Build the primary input column for `operation`
pub fn build_column(operation: Operation, lines: &[String], options: &InputOptions) -> Result<Column> {
    let accepted = operation.input_types();
    let is_null = |line: &str| options.null_marker.as_deref() == Some(line);

    if accepted.contains(&DataType::Coord) {
        let values = lines
            .iter()
            .map(|line| (!is_null(line)).then(|| parse_coord(line)).transpose())
            .collect::<Result<Vec<_>>>()?;
        return Ok(Column::Coord(values));
    }

    if options.binary {
        if !accepted.contains(&DataType::Binary) {
            return Err(ColHashError::config("operation does not accept binary input"));
        }
        let values = lines
            .iter()
            .map(|line| {
                (!is_null(line))
                    .then(|| {
                        hex::decode(line.trim()).map_err(|e| {
                            ColHashError::evaluation(format!("invalid hex '{}': {}", line, e))
                        })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()?;
        return Ok(Column::Binary(values));
    }

    Ok(Column::Utf8(
        lines
            .iter()
            .map(|line| (!is_null(line)).then(|| line.clone()))
            .collect(),
    ))
}

/// Render a result column in the requested format
pub fn render(column: &Column, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&column.to_json())?),
        OutputFormat::Text => Ok((0..column.len())
            .map(|i| column.render(i).unwrap_or_else(|| "null".to_string()))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
