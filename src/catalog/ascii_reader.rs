//! # Whitespace-delimited mock catalog reader
//!
//! Parses the plain-text DR12 QPM mock format: one particle per line, six
//! whitespace-separated numeric fields `x y z vx vy vz`. Lines whose first
//! non-whitespace character is `#` are comments; blank lines are ignored; there is
//! no header row.
//!
//! ## Overview
//! -----------------
//! This module provides:
//! - A crate-internal line parser (`from_record`) that converts a single record into
//!   a position/velocity pair of single-precision 3-vectors.
//! - A file-level routine \[`read_catalog`\] that reads an entire file into a
//!   [`ParticleBatch`], all-or-nothing.
//!
//! Fields are separated by arbitrary runs of whitespace (spaces or tabs). Every
//! record must resolve to exactly [`FIELDS_PER_RECORD`] numbers; anything else
//! aborts the read with a [`ParseCatalogError`] carrying the 1-based line number.
//!
//! ## Error Handling
//! -----------------
//! Failures are wrapped into [`MockboxError::CatalogParsing`](crate::mockbox_errors::MockboxError::CatalogParsing)
//! with a [`ParseCatalogError`] payload for precise diagnostics (file unreadable,
//! wrong field count, invalid number). No partial batch is returned.

use camino::Utf8Path;
use itertools::Itertools;
use nalgebra::Vector3;

use crate::catalog::{ParseCatalogError, ParticleBatch};
use crate::constants::FIELDS_PER_RECORD;
use crate::mockbox_errors::MockboxError;

/// Parse a single catalog record into a `(position, velocity)` pair (crate-private helper).
///
/// Arguments
/// -----------------
/// * `lineno` – 1-based line number, used only for diagnostics.
/// * `line` – The record with leading whitespace already trimmed.
///
/// Return
/// ----------
/// * The parsed single-precision vectors, or a [`ParseCatalogError`] if the record
///   does not resolve to exactly six numeric fields.
fn from_record(
    lineno: usize,
    line: &str,
) -> Result<(Vector3<f32>, Vector3<f32>), ParseCatalogError> {
    let wrong_count = || ParseCatalogError::WrongFieldCount {
        line: lineno,
        expected: FIELDS_PER_RECORD,
        found: line.split_whitespace().count(),
    };

    let mut fields = line.split_whitespace();
    let Some((x, y, z, vx, vy, vz)) = fields.next_tuple() else {
        return Err(wrong_count());
    };
    if fields.next().is_some() {
        return Err(wrong_count());
    }

    let number = |token: &str| {
        token
            .parse::<f32>()
            .map_err(|_| ParseCatalogError::InvalidNumber {
                line: lineno,
                value: token.to_string(),
            })
    };

    Ok((
        Vector3::new(number(x)?, number(y)?, number(z)?),
        Vector3::new(number(vx)?, number(vy)?, number(vz)?),
    ))
}

/// Parse the full catalog text into a [`ParticleBatch`], skipping comments and blanks.
fn parse_catalog(content: &str) -> Result<ParticleBatch, ParseCatalogError> {
    let mut positions = Vec::new();
    let mut velocities = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let record = line.trim_start();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }
        let (position, velocity) = from_record(index + 1, record)?;
        positions.push(position);
        velocities.push(velocity);
    }

    Ok(ParticleBatch {
        positions,
        velocities,
    })
}

/// Read a full mock catalog file, returning all parsed particles.
///
/// Arguments
/// -----------------
/// * `path` – Path to the whitespace-delimited catalog file.
///
/// Return
/// ----------
/// * A [`ParticleBatch`] holding every record in file order, or a
///   [`MockboxError::CatalogParsing`] if the file is unreadable or any record is
///   malformed (all-or-nothing).
pub(crate) fn read_catalog(path: &Utf8Path) -> Result<ParticleBatch, MockboxError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| ParseCatalogError::Unreadable(path.to_string(), err))?;
    Ok(parse_catalog(&content)?)
}
