//! # Catalog configuration surface
//!
//! Configuration handed over by the host orchestrator once argument parsing is
//! done on its side. [`CatalogConfig`] and its field types derive
//! [`serde::Deserialize`] so a host can pass them straight from its own
//! argument/config collaborator; field names follow the host convention
//! (`BoxSize` for the box, lowercase flags otherwise).
//!
//! Validation happens once, at configuration time: the RSD axis is typed (an
//! invalid string never constructs an [`RsdAxis`]), and the box size is checked
//! for positive, finite edge lengths when resolved. A scaled configuration with
//! no RSD axis is legal and means isotropic AP rescaling.

use std::fmt;
use std::str::FromStr;

use camino::Utf8PathBuf;
use serde::Deserialize;

use crate::constants::{BoxSize, Mpch};
use crate::mockbox_errors::MockboxError;

/// Cartesian axis along which the redshift-space distortion is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsdAxis {
    X,
    Y,
    Z,
}

impl RsdAxis {
    /// Index of the axis in a 3-component vector (x → 0, y → 1, z → 2).
    pub fn index(self) -> usize {
        match self {
            RsdAxis::X => 0,
            RsdAxis::Y => 1,
            RsdAxis::Z => 2,
        }
    }
}

impl FromStr for RsdAxis {
    type Err = MockboxError;

    fn from_str(axis: &str) -> Result<Self, Self::Err> {
        match axis {
            "x" => Ok(RsdAxis::X),
            "y" => Ok(RsdAxis::Y),
            "z" => Ok(RsdAxis::Z),
            other => Err(MockboxError::InvalidRsdAxis(other.to_string())),
        }
    }
}

impl fmt::Display for RsdAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RsdAxis::X => "x",
            RsdAxis::Y => "y",
            RsdAxis::Z => "z",
        };
        write!(f, "{name}")
    }
}

/// Box size as given by the host: one scalar broadcast to all three axes, or three
/// explicit edge lengths.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BoxSizeSpec {
    /// A single edge length applied to every axis.
    Isotropic(Mpch),
    /// Explicit edge lengths for the x, y, and z axes.
    PerAxis([Mpch; 3]),
}

impl BoxSizeSpec {
    /// Resolve into a 3-vector of per-axis edge lengths.
    ///
    /// Return
    /// ----------
    /// * The per-axis box size, or [`MockboxError::InvalidBoxSize`] if any edge
    ///   length is non-positive or non-finite.
    pub fn resolve(self) -> Result<BoxSize, MockboxError> {
        let edges = match self {
            BoxSizeSpec::Isotropic(edge) => [edge; 3],
            BoxSizeSpec::PerAxis(edges) => edges,
        };
        for &edge in &edges {
            if !edge.is_finite() || edge <= 0.0 {
                return Err(MockboxError::InvalidBoxSize(format!(
                    "edge length {edge} must be positive and finite"
                )));
            }
        }
        Ok(BoxSize::from(edges))
    }
}

/// Full configuration of one catalog source.
///
/// Fields
/// -----------------
/// * `path` – Location of the whitespace-delimited catalog file (required).
/// * `box_size` – Simulation box size, scalar or per-axis (required, host key `BoxSize`).
/// * `scaled` – Rescale box and positions by the AP factors (default `false`).
/// * `rsd` – Axis of the redshift-space distortion (default none).
/// * `velf` – Multiplier applied to every velocity component (default `1.0`).
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: Utf8PathBuf,
    #[serde(rename = "BoxSize")]
    pub box_size: BoxSizeSpec,
    #[serde(default)]
    pub scaled: bool,
    #[serde(default)]
    pub rsd: Option<RsdAxis>,
    #[serde(default = "default_velf")]
    pub velf: f64,
}

fn default_velf() -> f64 {
    1.0
}

impl CatalogConfig {
    /// Configuration with the given path and box size; optional flags keep their defaults.
    pub fn new(path: impl Into<Utf8PathBuf>, box_size: BoxSizeSpec) -> Self {
        Self {
            path: path.into(),
            box_size,
            scaled: false,
            rsd: None,
            velf: default_velf(),
        }
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_rsd_axis_from_str() {
        assert_eq!("x".parse::<RsdAxis>().unwrap(), RsdAxis::X);
        assert_eq!("y".parse::<RsdAxis>().unwrap(), RsdAxis::Y);
        assert_eq!("z".parse::<RsdAxis>().unwrap(), RsdAxis::Z);
        assert_eq!(RsdAxis::Z.index(), 2);
    }

    #[test]
    fn test_rsd_axis_rejects_unknown_direction() {
        let result = "w".parse::<RsdAxis>();
        assert_eq!(result, Err(MockboxError::InvalidRsdAxis("w".to_string())));
    }

    #[test]
    fn test_box_size_scalar_broadcast() {
        let size = BoxSizeSpec::Isotropic(2500.0).resolve().unwrap();
        assert_eq!(size, BoxSize::new(2500.0, 2500.0, 2500.0));
    }

    #[test]
    fn test_box_size_per_axis() {
        let size = BoxSizeSpec::PerAxis([10.0, 20.0, 30.0]).resolve().unwrap();
        assert_eq!(size, BoxSize::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_box_size_rejects_non_positive_edges() {
        assert!(matches!(
            BoxSizeSpec::Isotropic(0.0).resolve(),
            Err(MockboxError::InvalidBoxSize(_))
        ));
        assert!(matches!(
            BoxSizeSpec::PerAxis([10.0, -1.0, 30.0]).resolve(),
            Err(MockboxError::InvalidBoxSize(_))
        ));
        assert!(matches!(
            BoxSizeSpec::Isotropic(f64::NAN).resolve(),
            Err(MockboxError::InvalidBoxSize(_))
        ));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: CatalogConfig =
            serde_json::from_str(r#"{"path": "mock.txt", "BoxSize": 2500.0}"#).unwrap();

        assert_eq!(config.path, Utf8PathBuf::from("mock.txt"));
        assert_eq!(config.box_size, BoxSizeSpec::Isotropic(2500.0));
        assert!(!config.scaled);
        assert_eq!(config.rsd, None);
        assert_eq!(config.velf, 1.0);
    }

    #[test]
    fn test_deserialize_full_configuration() {
        let config: CatalogConfig = serde_json::from_str(
            r#"{"path": "mock.txt", "BoxSize": [10.0, 20.0, 30.0], "scaled": true, "rsd": "z", "velf": 2.5}"#,
        )
        .unwrap();

        assert_eq!(config.box_size, BoxSizeSpec::PerAxis([10.0, 20.0, 30.0]));
        assert!(config.scaled);
        assert_eq!(config.rsd, Some(RsdAxis::Z));
        assert_eq!(config.velf, 2.5);
    }

    #[test]
    fn test_deserialize_rejects_unknown_rsd_axis() {
        let result =
            serde_json::from_str::<CatalogConfig>(r#"{"path": "m.txt", "BoxSize": 1.0, "rsd": "w"}"#);
        assert!(result.is_err());
    }
}
