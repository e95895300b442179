#![cfg(feature = "ascii-reader")]

use approx::assert_relative_eq;
use nalgebra::Vector3;

use mockbox::{
    BoxSizeSpec, CatalogConfig, CatalogSource, Column, MockboxError, ParseCatalogError, QpmMock,
    RsdAxis, SoloComm,
};

fn configured_source(configure: impl FnOnce(&mut CatalogConfig)) -> QpmMock {
    let mut config = CatalogConfig::new("tests/data/qpm_mock_two.txt", BoxSizeSpec::Isotropic(10.0));
    configure(&mut config);

    let mut source = QpmMock::new();
    source.configure(config).unwrap();
    source
}

fn single_batch(source: &QpmMock, columns: &[&str]) -> Vec<Column> {
    let mut batches = source.read(columns, &SoloComm, None).unwrap();
    let batch = batches.next().expect("one batch per read").unwrap();
    assert!(batches.next().is_none());
    batch
}

#[test]
fn test_plain_read_passes_data_through() {
    let source = configured_source(|_| {});
    let batch = single_batch(&source, &["Position", "Velocity", "Weight"]);

    let Column::Vector(positions) = &batch[0] else {
        panic!("expected a vector column for Position");
    };
    let Column::Vector(velocities) = &batch[1] else {
        panic!("expected a vector column for Velocity");
    };
    let Column::Scalar(weights) = &batch[2] else {
        panic!("expected a scalar column for Weight");
    };

    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0], Vector3::new(0.0_f32, 0.0, 0.0));
    assert_eq!(positions[1], Vector3::new(5.0_f32, 5.0, 5.0));
    assert_eq!(velocities[0], Vector3::new(1.0_f32, 0.0, 0.0));
    assert_eq!(velocities[1], Vector3::new(0.0_f32, 1.0, 0.0));
    assert_eq!(weights, &vec![1.0, 1.0]);
}

#[test]
fn test_rsd_and_ap_scaling_end_to_end() {
    let source = configured_source(|config| {
        config.scaled = true;
        config.rsd = Some(RsdAxis::X);
        config.velf = 2.0;
    });

    let working = source.box_size().unwrap();
    assert_relative_eq!(working[0], 9.851209643, epsilon = 1e-12);
    assert_relative_eq!(working[1], 9.925056798, epsilon = 1e-12);
    assert_relative_eq!(working[2], 9.925056798, epsilon = 1e-12);
    assert_eq!(
        source.original_box_size().unwrap(),
        Vector3::new(10.0, 10.0, 10.0)
    );

    let batch = single_batch(&source, &["Position", "Velocity", "Weight"]);

    let Column::Vector(positions) = &batch[0] else {
        panic!("expected a vector column for Position");
    };
    let Column::Vector(velocities) = &batch[1] else {
        panic!("expected a vector column for Velocity");
    };
    let Column::Scalar(weights) = &batch[2] else {
        panic!("expected a scalar column for Weight");
    };

    // first record: velocity (2,0,0); x shifts 0 -> 2, wraps mod 10, then AP
    assert_relative_eq!(positions[0][0], 1.9702419286_f32, epsilon = 1e-5);
    assert_eq!(positions[0][1], 0.0);
    assert_eq!(positions[0][2], 0.0);
    assert_eq!(velocities[0], Vector3::new(2.0_f32, 0.0, 0.0));

    // second record: velocity (0,2,0); x stays 5, then AP on every axis
    assert_relative_eq!(positions[1][0], 4.9256048215_f32, epsilon = 1e-5);
    assert_relative_eq!(positions[1][1], 4.962528399_f32, epsilon = 1e-5);
    assert_relative_eq!(positions[1][2], 4.962528399_f32, epsilon = 1e-5);
    assert_eq!(velocities[1], Vector3::new(0.0_f32, 2.0, 0.0));

    assert_eq!(weights, &vec![1.0, 1.0]);
}

#[test]
fn test_repeated_reads_are_identical() {
    let source = configured_source(|config| {
        config.scaled = true;
        config.rsd = Some(RsdAxis::Y);
        config.velf = 0.5;
    });

    let first = single_batch(&source, &["Position", "Velocity"]);
    let second = single_batch(&source, &["Position", "Velocity"]);
    assert_eq!(first, second);
}

#[test]
fn test_malformed_record_aborts_the_read() {
    let mut source = QpmMock::new();
    source
        .configure(CatalogConfig::new(
            "tests/data/qpm_mock_bad_line.txt",
            BoxSizeSpec::Isotropic(10.0),
        ))
        .unwrap();

    let mut batches = source.read(&["Position"], &SoloComm, None).unwrap();
    let result = batches.next().unwrap();
    assert_eq!(
        result,
        Err(MockboxError::CatalogParsing(
            ParseCatalogError::WrongFieldCount {
                line: 3,
                expected: 6,
                found: 5
            }
        ))
    );
    assert!(batches.next().is_none());
}

#[test]
fn test_missing_file_aborts_the_read() {
    let mut source = QpmMock::new();
    source
        .configure(CatalogConfig::new(
            "tests/data/no_such_catalog.txt",
            BoxSizeSpec::Isotropic(10.0),
        ))
        .unwrap();

    let mut batches = source.read(&["Position"], &SoloComm, None).unwrap();
    let result = batches.next().unwrap();
    assert!(matches!(
        result,
        Err(MockboxError::CatalogParsing(
            ParseCatalogError::Unreadable(_, _)
        ))
    ));
}
