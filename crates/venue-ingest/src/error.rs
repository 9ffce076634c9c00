use std::path::PathBuf;

use venue_model::ModelError;

/// Failures reading the spreadsheet export.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV {path} has no header row")]
    MissingHeader { path: PathBuf },
}

/// Failures loading or validating the import profile. Fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML profile {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid field catalog: {0}")]
    Model(#[from] ModelError),

    #[error("invalid profile: {message}")]
    InvalidProfile { message: String },

    #[error("duplicate section in profile: {name}")]
    DuplicateSection { name: String },

    #[error("unknown section '{section}' referenced by {context}")]
    UnknownSection { section: String, context: String },

    #[error("section '{section}' maps columns {columns} to one stable id {stable_id}")]
    AliasedStableId {
        section: String,
        stable_id: String,
        columns: String,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
