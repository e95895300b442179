//! # Catalog ingestion: parsing and column projection
//!
//! Facilities to **parse** a periodic-box mock catalog into an in-memory
//! [`ParticleBatch`] and to **project** a transformed batch onto the output columns
//! requested by the grid-painting consumer.
//!
//! Modules
//! -----------------
//! * [`ascii_reader`](crate::catalog::ascii_reader) – Whitespace-delimited text reader
//!   (`x y z vx vy vz` per line, `#` comments). Compiled behind the `ascii-reader`
//!   feature.
//! * [`columns`](crate::catalog::columns) – Named output column selection
//!   (`Position`, `Velocity`, `Weight`).
//!
//! Backend selection
//! -----------------
//! The text reader is a pluggable backend resolved at configuration time. When the
//! crate is built without the `ascii-reader` feature, `require_backend` reports
//! [`MockboxError::ParserUnavailable`] **before any file access**, so a
//! misconfigured deployment fails at setup rather than deep inside a read call.
//!
//! Error semantics
//! -----------------
//! File-level and record-level failures are reported through [`ParseCatalogError`]
//! and abort the whole read. No partial batch is ever produced.

use nalgebra::Vector3;
use thiserror::Error;

use crate::mockbox_errors::MockboxError;

#[cfg(feature = "ascii-reader")]
pub mod ascii_reader;
pub mod columns;

/// File- and line-level parsing errors for mock catalog files.
///
/// Variants
/// -----------------
/// * `Unreadable` – The file is missing or could not be read; payload carries the path
///   and the underlying I/O error.
/// * `WrongFieldCount` – A record does not hold exactly six fields.
/// * `InvalidNumber` – A field does not parse as a number; payload carries the token.
#[derive(Error, Debug)]
pub enum ParseCatalogError {
    #[error("could not read catalog file {0}: {1}")]
    Unreadable(String, std::io::Error),
    #[error("line {line}: expected {expected} numeric fields, found {found}")]
    WrongFieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid numeric field `{value}`")]
    InvalidNumber { line: usize, value: String },
}

impl PartialEq for ParseCatalogError {
    fn eq(&self, other: &Self) -> bool {
        use ParseCatalogError::*;
        match (self, other) {
            // I/O causes are not comparable: equality on the path only
            (Unreadable(a, _), Unreadable(b, _)) => a == b,
            (
                WrongFieldCount {
                    line: l1,
                    expected: e1,
                    found: f1,
                },
                WrongFieldCount {
                    line: l2,
                    expected: e2,
                    found: f2,
                },
            ) => l1 == l2 && e1 == e2 && f1 == f2,
            (
                InvalidNumber {
                    line: l1,
                    value: v1,
                },
                InvalidNumber {
                    line: l2,
                    value: v2,
                },
            ) => l1 == l2 && v1 == v2,
            _ => false,
        }
    }
}

/// Full in-memory particle set produced by one read invocation.
///
/// Positions and velocities are stored single-precision, one 3-vector per particle,
/// with matching lengths. A batch is owned solely by the pipeline invocation that
/// produced it and is discarded once handed to the caller; unit weights are attached
/// at projection time by [`columns::project`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBatch {
    /// Particle positions (Mpc/h), one entry per record.
    pub positions: Vec<Vector3<f32>>,
    /// Particle peculiar velocities, one entry per record.
    pub velocities: Vec<Vector3<f32>>,
}

impl ParticleBatch {
    /// Number of particles in the batch.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Check that a parsing backend was compiled in.
///
/// Called at configuration time so that a build without any reader fails fast with
/// [`MockboxError::ParserUnavailable`], before the first file access.
pub(crate) fn require_backend() -> Result<(), MockboxError> {
    #[cfg(feature = "ascii-reader")]
    {
        Ok(())
    }
    #[cfg(not(feature = "ascii-reader"))]
    {
        Err(missing_backend())
    }
}

/// Read a catalog file with the selected backend.
#[cfg(feature = "ascii-reader")]
pub(crate) fn read_batch(path: &camino::Utf8Path) -> Result<ParticleBatch, MockboxError> {
    ascii_reader::read_catalog(path)
}

/// Unreachable in practice: `configure` rejects the missing backend first.
#[cfg(not(feature = "ascii-reader"))]
pub(crate) fn read_batch(_path: &camino::Utf8Path) -> Result<ParticleBatch, MockboxError> {
    Err(missing_backend())
}

#[cfg(not(feature = "ascii-reader"))]
fn missing_backend() -> MockboxError {
    MockboxError::ParserUnavailable(
        "mockbox was built without the `ascii-reader` feature".to_string(),
    )
}
