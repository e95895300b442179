//! # Constants and type definitions for mockbox
//!
//! This module centralizes the **calibration constants**, **format constants**, and **common
//! type definitions** used throughout the `mockbox` library.
//!
//! ## Overview
//!
//! - Alcock–Paczynski calibration factors for the DR12 QPM mocks
//! - Catalog record layout constants
//! - Core type aliases used across the crate
//!
//! These definitions are used by the catalog reader, the distortion stage, and the
//! data-source façade.

use nalgebra::Vector3;

// -------------------------------------------------------------------------------------------------
// Calibration constants
// -------------------------------------------------------------------------------------------------

/// Line-of-sight (parallel) AP factor calibrated for the DR12 QPM periodic-box mocks,
/// converting the fiducial geometry into the true one along the distortion axis.
pub const QPM_QPAR: f64 = 0.9851209643;

/// Transverse (perpendicular) AP factor calibrated for the DR12 QPM periodic-box mocks.
pub const QPM_QPERP: f64 = 0.9925056798;

// -------------------------------------------------------------------------------------------------
// Catalog format
// -------------------------------------------------------------------------------------------------

/// Numeric fields per catalog record: `x y z vx vy vz`
pub const FIELDS_PER_RECORD: usize = 6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Comoving length in Mpc/h
pub type Mpch = f64;

/// Box edge lengths along the three Cartesian axes (Mpc/h)
pub type BoxSize = Vector3<f64>;
