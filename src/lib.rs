pub mod catalog;
pub mod config;
pub mod constants;
pub mod distortion;
pub mod mockbox_errors;
pub mod source;

pub use catalog::columns::{Column, Field};
pub use catalog::{ParseCatalogError, ParticleBatch};
pub use config::{BoxSizeSpec, CatalogConfig, RsdAxis};
pub use constants::BoxSize;
pub use distortion::{ApCalibration, BoxDistortion};
pub use mockbox_errors::MockboxError;
pub use source::{Batches, CatalogSource, ColumnBatch, CommRank, QpmMock, SoloComm};
