//! Error types for the ContentDirectory adapter.

use musocatalog::CatalogError;

/// UPnP ContentDirectory "cannot process the request" error code.
///
/// The transport reports every adapter failure under this single code; the
/// enum variants below only feed the diagnostic string.
pub const UPNP_CANNOT_PROCESS: u16 = 720;

/// Error types for browse and lifecycle operations
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Catalog lookup failed (the NotFound class of failures)
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A recognized id marker followed by a non-numeric suffix
    #[error("malformed object id: {0}")]
    MalformedId(String),

    /// Id class the directory does not serve (raw song ids included)
    #[error("unsupported object id: {0}")]
    Unsupported(String),

    #[error("invalid browse flag: {0}")]
    InvalidBrowseFlag(String),

    #[error("search is not supported")]
    SearchNotSupported,

    #[error("service is already running")]
    AlreadyRunning,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl DirectoryError {
    /// Collapses the failure into the generic UPnP fault reported to
    /// control points: code 720 plus a diagnostic string.
    pub fn upnp_fault(&self) -> (u16, String) {
        (UPNP_CANNOT_PROCESS, self.to_string())
    }
}

/// Result type for directory operations
pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_to_cannot_process() {
        let errors = [
            DirectoryError::MalformedId("ar-x".into()),
            DirectoryError::Unsupported("42".into()),
            DirectoryError::Catalog(CatalogError::ArtistNotFound(7)),
            DirectoryError::SearchNotSupported,
        ];
        for err in errors {
            let (code, message) = err.upnp_fault();
            assert_eq!(code, UPNP_CANNOT_PROCESS);
            assert!(!message.is_empty());
        }
    }
}
