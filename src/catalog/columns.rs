//! # Output column selection
//!
//! The grid-painting consumer asks for columns by name; this module maps those
//! names onto the transformed [`ParticleBatch`] and attaches the uniform unit
//! weight every mock particle carries.

use std::str::FromStr;

use nalgebra::Vector3;

use crate::catalog::ParticleBatch;
use crate::mockbox_errors::MockboxError;

/// Output field exposed to the grid-painting consumer.
///
/// The supported set is fixed and small; anything else is a configuration error.
/// Names are case-sensitive and match the catalog plugin convention
/// (`Position`, `Velocity`, `Weight`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Position,
    Velocity,
    Weight,
}

impl FromStr for Field {
    type Err = MockboxError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "Position" => Ok(Field::Position),
            "Velocity" => Ok(Field::Velocity),
            "Weight" => Ok(Field::Weight),
            other => Err(MockboxError::UnsupportedField(other.to_string())),
        }
    }
}

/// One projected output column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// N×3 single-precision data (`Position`, `Velocity`).
    Vector(Vec<Vector3<f32>>),
    /// Per-particle scalar data (`Weight`).
    Scalar(Vec<f32>),
}

/// Project a transformed batch onto the requested fields, in request order.
///
/// Attaches a weight of 1.0 to every particle; the batch itself is read-only
/// input and is never mutated.
pub fn project(batch: &ParticleBatch, fields: &[Field]) -> Vec<Column> {
    fields
        .iter()
        .map(|field| match field {
            Field::Position => Column::Vector(batch.positions.clone()),
            Field::Velocity => Column::Vector(batch.velocities.clone()),
            Field::Weight => Column::Scalar(vec![1.0; batch.len()]),
        })
        .collect()
}

#[cfg(test)]
mod columns_test {
    use super::*;

    fn sample_batch() -> ParticleBatch {
        ParticleBatch {
            positions: vec![Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0)],
            velocities: vec![Vector3::new(0.1, 0.2, 0.3), Vector3::new(0.4, 0.5, 0.6)],
        }
    }

    #[test]
    fn test_field_names() {
        assert_eq!("Position".parse::<Field>().unwrap(), Field::Position);
        assert_eq!("Velocity".parse::<Field>().unwrap(), Field::Velocity);
        assert_eq!("Weight".parse::<Field>().unwrap(), Field::Weight);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = "Mass".parse::<Field>();
        assert_eq!(
            result,
            Err(MockboxError::UnsupportedField("Mass".to_string()))
        );
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        assert!("position".parse::<Field>().is_err());
    }

    #[test]
    fn test_project_keeps_request_order() {
        let batch = sample_batch();
        let columns = project(&batch, &[Field::Weight, Field::Position]);

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0], Column::Scalar(vec![1.0, 1.0]));
        assert_eq!(columns[1], Column::Vector(batch.positions.clone()));
    }

    #[test]
    fn test_project_unit_weights_match_batch_length() {
        let batch = sample_batch();
        let columns = project(&batch, &[Field::Weight]);

        let Column::Scalar(weights) = &columns[0] else {
            panic!("expected a scalar column");
        };
        assert_eq!(weights.len(), batch.len());
        assert!(weights.iter().all(|&w| w == 1.0));
    }
}
