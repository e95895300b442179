use thiserror::Error;

use crate::catalog::ParseCatalogError;

#[derive(Error, Debug, PartialEq)]
pub enum MockboxError {
    #[error("Catalog parsing backend unavailable: {0}")]
    ParserUnavailable(String),

    #[error("Error during catalog parsing: {0}")]
    CatalogParsing(#[from] ParseCatalogError),

    #[error("Invalid RSD axis: {0} (expected one of x, y, z)")]
    InvalidRsdAxis(String),

    #[error("Invalid box size: {0}")]
    InvalidBoxSize(String),

    #[error("The data source must be configured before reading")]
    NotConfigured,

    #[error("Unsupported output column: {0}")]
    UnsupportedField(String),
}
