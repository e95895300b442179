//! # Redshift-space and Alcock–Paczynski distortion of periodic-box catalogs
//!
//! This module owns the geometric contract of the pipeline: moving particles into
//! redshift space along a chosen axis and rescaling box and positions between the
//! fiducial and true cosmologies.
//!
//! ## Overview
//! -----------------
//! [`BoxDistortion`] captures the configured box size **once** and derives the
//! working box size from it at construction. Per-batch work happens in
//! [`BoxDistortion::apply`]:
//!
//! 1. every velocity component is multiplied by the configured `velf`;
//! 2. with an RSD axis selected, the (post-`velf`) velocity component along that
//!    axis is added to the position component and the sum is wrapped modulo the
//!    **original** box edge, keeping the particle inside the true box;
//! 3. with scaling enabled, position components are multiplied by the same
//!    per-axis AP factors used for the box edges.
//!
//! The wrap always uses the original (pre-AP) edge length: the redshift-space
//! shift happens in the true box, and the AP rescaling maps the already
//! redshift-space catalog into the fiducial frame afterwards. Box edges and
//! positions go through one shared per-axis factor lookup and stay in the same
//! frame.
//!
//! ## Conventions
//! -----------------
//! - The RSD axis receives `qpar`; the other two axes receive `qperp`.
//! - With scaling enabled but no RSD axis, all three axes receive `qperp`
//!   (isotropic AP).
//! - Velocities are never rescaled by the AP factors, only by `velf`.

use nalgebra::Vector3;

use crate::config::RsdAxis;
use crate::constants::{BoxSize, QPM_QPAR, QPM_QPERP};

/// Fixed AP calibration pair: the line-of-sight factor `qpar` and the transverse
/// factor `qperp`, representing one fiducial-vs-true geometry conversion.
///
/// Immutable configuration for the lifetime of the process. The default pair is
/// the DR12 QPM calibration from [`crate::constants`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApCalibration {
    pub qpar: f64,
    pub qperp: f64,
}

impl Default for ApCalibration {
    fn default() -> Self {
        Self {
            qpar: QPM_QPAR,
            qperp: QPM_QPERP,
        }
    }
}

/// AP factor applied to `axis`: `qpar` along the RSD axis, `qperp` elsewhere.
///
/// Shared by the box-edge rescaling at construction and the position rescaling in
/// [`BoxDistortion::apply`].
fn ap_factor(calibration: ApCalibration, rsd: Option<RsdAxis>, axis: usize) -> f64 {
    match rsd {
        Some(direction) if direction.index() == axis => calibration.qpar,
        _ => calibration.qperp,
    }
}

/// Geometry stage of the catalog pipeline: box bookkeeping plus the per-batch
/// RSD shift and AP rescaling.
///
/// Construction captures the original box size, derives the working box size, and
/// freezes the transform parameters; [`apply`](BoxDistortion::apply) then treats
/// every batch identically, so repeated reads of the same raw data produce
/// bit-identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDistortion {
    calibration: ApCalibration,
    original_box: BoxSize,
    box_size: BoxSize,
    scaled: bool,
    rsd: Option<RsdAxis>,
    velf: f64,
}

impl BoxDistortion {
    /// Build the distortion stage for one configured source.
    ///
    /// Arguments
    /// -----------------
    /// * `box_size` – Resolved per-axis box edge lengths; captured as the immutable
    ///   original size.
    /// * `scaled` – Enable AP rescaling of box edges and positions.
    /// * `rsd` – Axis of the redshift-space distortion, if any.
    /// * `velf` – Multiplier applied to every velocity component.
    /// * `calibration` – The `qpar`/`qperp` pair to rescale with.
    ///
    /// Return
    /// ----------
    /// * The stage with its working box size already rescaled (a no-op when
    ///   `scaled` is false).
    pub fn new(
        box_size: BoxSize,
        scaled: bool,
        rsd: Option<RsdAxis>,
        velf: f64,
        calibration: ApCalibration,
    ) -> Self {
        let mut working = box_size;
        if scaled {
            for axis in 0..3 {
                working[axis] *= ap_factor(calibration, rsd, axis);
            }
        }

        Self {
            calibration,
            original_box: box_size,
            box_size: working,
            scaled,
            rsd,
            velf,
        }
    }

    /// Working box size: the frame the output positions live in.
    pub fn box_size(&self) -> BoxSize {
        self.box_size
    }

    /// Box size as configured, before any AP rescaling.
    pub fn original_box_size(&self) -> BoxSize {
        self.original_box
    }

    /// The calibration pair this stage rescales with.
    pub fn calibration(&self) -> ApCalibration {
        self.calibration
    }

    /// Whether AP rescaling is enabled.
    pub fn scaled(&self) -> bool {
        self.scaled
    }

    /// The configured RSD axis, if any.
    pub fn rsd(&self) -> Option<RsdAxis> {
        self.rsd
    }

    /// Distort one batch in place: velocity scaling, redshift-space shift with
    /// periodic wrap, then AP rescaling of the positions.
    ///
    /// The wrap reduces the shifted component modulo the **original** box edge,
    /// so output positions along the RSD axis lie in `[0, original_edge)` before
    /// the AP factors are applied.
    pub fn apply(&self, positions: &mut [Vector3<f32>], velocities: &mut [Vector3<f32>]) {
        debug_assert_eq!(
            positions.len(),
            velocities.len(),
            "position/velocity length mismatch"
        );

        let velf = self.velf as f32;
        for velocity in velocities.iter_mut() {
            *velocity *= velf;
        }

        if let Some(direction) = self.rsd {
            let axis = direction.index();
            let edge = self.original_box[axis] as f32;
            for (position, velocity) in positions.iter_mut().zip(velocities.iter()) {
                position[axis] = (position[axis] + velocity[axis]).rem_euclid(edge);
            }
        }

        if self.scaled {
            for position in positions.iter_mut() {
                for axis in 0..3 {
                    position[axis] *= ap_factor(self.calibration, self.rsd, axis) as f32;
                }
            }
        }
    }
}
