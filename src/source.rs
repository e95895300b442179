//! # QPM mock catalog data source
//!
//! The [`QpmMock`] façade wires the three pipeline stages together behind the
//! narrow [`CatalogSource`] interface a host orchestrator drives:
//!
//! 1. **Configure** – resolve the parsing backend, validate the box size, and
//!    freeze the geometry ([`BoxDistortion`]).
//! 2. **Read** – parse the catalog file, distort the batch, and project it onto
//!    the requested output columns.
//!
//! ## Overview
//! -----------------
//! `read` returns [`Batches`], a lazy, finite sequence of column batches. The
//! current implementation performs the whole parse-transform-project pipeline on
//! the first iteration and yields exactly **one** batch covering the full file;
//! the advisory `bunch_size` hint is accepted but unused. Callers that only
//! consume the first batch keep working if a later implementation streams
//! several smaller batches instead.
//!
//! Requested column names are validated **up front** in `read`, so an unknown
//! name fails before any file access.
//!
//! ## Multi-process use
//! -----------------
//! Each process runs the full pipeline independently; there is no sharing or
//! partitioning across ranks. The communicator is only consulted for its rank,
//! which gates a single diagnostic log line, so the interface is reduced to
//! [`CommRank`]. [`SoloComm`] is the single-process stand-in.
//!
//! ## Example
//! -----------------
//! ```rust,no_run
//! use mockbox::{BoxSizeSpec, CatalogConfig, CatalogSource, QpmMock, RsdAxis, SoloComm};
//!
//! # fn run() -> Result<(), mockbox::MockboxError> {
//! let mut source = QpmMock::new();
//!
//! let mut config = CatalogConfig::new("qpm_mock.txt", BoxSizeSpec::Isotropic(2500.0));
//! config.scaled = true;
//! config.rsd = Some(RsdAxis::Z);
//! source.configure(config)?;
//!
//! let mut batches = source.read(&["Position", "Weight"], &SoloComm, None)?;
//! let batch = batches.next().expect("one batch per read")?;
//! # let _ = batch;
//! # Ok(()) }
//! ```
//!
//! ## See also
//! ------------
//! * [`crate::catalog::ascii_reader`] – The file parsing stage.
//! * [`BoxDistortion`] – The geometry stage.
//! * [`crate::catalog::columns`] – The projection stage.

use camino::Utf8PathBuf;

use crate::catalog::{
    self,
    columns::{self, Column, Field},
};
use crate::config::CatalogConfig;
use crate::constants::BoxSize;
use crate::distortion::{ApCalibration, BoxDistortion};
use crate::mockbox_errors::MockboxError;

/// Minimal view of the parallel-process communicator: only the rank matters here.
pub trait CommRank {
    /// Rank of the calling process within the communicator.
    fn rank(&self) -> usize;
}

/// Single-process stand-in used when no real communicator is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoloComm;

impl CommRank for SoloComm {
    fn rank(&self) -> usize {
        0
    }
}

/// Narrow interface between the host orchestrator and a catalog source.
///
/// A source is configured once, then read any number of times; reads are
/// idempotent for a fixed file and configuration.
pub trait CatalogSource {
    /// Validate the configuration and freeze the box geometry.
    fn configure(&mut self, config: CatalogConfig) -> Result<(), MockboxError>;

    /// Produce the lazy batch sequence for the requested columns.
    ///
    /// Arguments
    /// -----------------
    /// * `columns` – Requested output column names, in the order the caller wants
    ///   them back.
    /// * `comm` – Rank-bearing communicator; gates one diagnostic log line.
    /// * `bunch_size` – Advisory batch-size hint, currently unused.
    fn read(
        &self,
        columns: &[&str],
        comm: &dyn CommRank,
        bunch_size: Option<usize>,
    ) -> Result<Batches, MockboxError>;
}

/// Data source for the DR12 BOSS QPM periodic-box mock catalogs.
///
/// Reads a plain-text catalog (`x y z vx vy vz` per line), optionally moves the
/// particles into redshift space along a configured axis, optionally applies the
/// AP rescaling to box and positions, and serves the result as named columns
/// (`Position`, `Velocity`, `Weight`) for painting onto a density grid.
///
/// The AP calibration pair is fixed at construction and defaults to the DR12 QPM
/// values; the box geometry is frozen by [`configure`](CatalogSource::configure).
#[derive(Debug, Clone, Default)]
pub struct QpmMock {
    calibration: ApCalibration,
    state: Option<SourceState>,
}

#[derive(Debug, Clone)]
struct SourceState {
    path: Utf8PathBuf,
    distortion: BoxDistortion,
}

impl QpmMock {
    /// Source with the default DR12 QPM calibration, not yet configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source with a non-default AP calibration pair.
    pub fn with_calibration(calibration: ApCalibration) -> Self {
        Self {
            calibration,
            state: None,
        }
    }

    /// Working box size once configured (the frame the output positions live in).
    pub fn box_size(&self) -> Option<BoxSize> {
        self.state.as_ref().map(|state| state.distortion.box_size())
    }

    /// Box size as configured, before any AP rescaling.
    pub fn original_box_size(&self) -> Option<BoxSize> {
        self.state
            .as_ref()
            .map(|state| state.distortion.original_box_size())
    }
}

impl CatalogSource for QpmMock {
    fn configure(&mut self, config: CatalogConfig) -> Result<(), MockboxError> {
        catalog::require_backend()?;

        let box_size = config.box_size.resolve()?;
        let distortion = BoxDistortion::new(
            box_size,
            config.scaled,
            config.rsd,
            config.velf,
            self.calibration,
        );

        self.state = Some(SourceState {
            path: config.path,
            distortion,
        });
        Ok(())
    }

    fn read(
        &self,
        columns: &[&str],
        comm: &dyn CommRank,
        _bunch_size: Option<usize>,
    ) -> Result<Batches, MockboxError> {
        let state = self.state.as_ref().ok_or(MockboxError::NotConfigured)?;

        let fields = columns
            .iter()
            .map(|name| name.parse::<Field>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Batches {
            plan: Some(ReadPlan {
                path: state.path.clone(),
                distortion: state.distortion.clone(),
                fields,
                is_root: comm.rank() == 0,
            }),
        })
    }
}

/// One output batch: the projected columns in request order.
pub type ColumnBatch = Vec<Column>;

/// Lazy, finite sequence of catalog batches produced by one read call.
///
/// Yields exactly one `Ok` batch holding the whole transformed catalog, or one
/// `Err` if the load fails; the sequence then ends. The pipeline is all-or-nothing
/// per read, so no partial batch is ever yielded.
#[derive(Debug)]
pub struct Batches {
    plan: Option<ReadPlan>,
}

#[derive(Debug)]
struct ReadPlan {
    path: Utf8PathBuf,
    distortion: BoxDistortion,
    fields: Vec<Field>,
    is_root: bool,
}

impl Iterator for Batches {
    type Item = Result<ColumnBatch, MockboxError>;

    fn next(&mut self) -> Option<Self::Item> {
        let plan = self.plan.take()?;
        Some(run_plan(plan))
    }
}

/// Parse, distort, and project the whole catalog as one batch.
fn run_plan(plan: ReadPlan) -> Result<ColumnBatch, MockboxError> {
    let mut batch = catalog::read_batch(&plan.path)?;
    log::info!("total number of objects read is {}", batch.len());

    let distortion = &plan.distortion;
    if distortion.scaled() {
        log::info!(
            "multiplying by qperp = {:.5}",
            distortion.calibration().qperp
        );
        if distortion.rsd().is_some() && plan.is_root {
            log::info!("multiplying by qpar = {:.5}", distortion.calibration().qpar);
        }
    }

    distortion.apply(&mut batch.positions, &mut batch.velocities);
    Ok(columns::project(&batch, &plan.fields))
}
