//! Ingestion error types

use bibgraph_common::errors::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Cannot access directory {path}: {message}")]
    DirectoryAccess { path: String, message: String },

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction failed for {path}: {message}")]
    ExtractionError { path: String, message: String },

    #[error("Ingestion task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<IngestionError> for AppError {
    fn from(e: IngestionError) -> Self {
        match e {
            IngestionError::DirectoryAccess { path, message } => {
                AppError::DirectoryAccess { path, message }
            }
            IngestionError::ReadError { path, source } => AppError::Extraction {
                file_path: path,
                cause: source.to_string(),
            },
            IngestionError::ExtractionError { path, message } => AppError::Extraction {
                file_path: path,
                cause: message,
            },
            IngestionError::TaskJoin(e) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}
