use thiserror::Error;

use crate::model::NodeKind;

/// Result type alias using MirrorError
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Coarse error classification, matching the failure taxonomy of a copy pass
///
/// Precondition failures and structural conflicts are both fatal for the
/// whole pass; the distinction matters to callers because a precondition
/// failure guarantees that nothing was mutated, while a structural conflict
/// may leave documents created earlier in the same pass in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Precondition,
    StructuralConflict,
    Store,
    Service,
    Internal,
}

/// Error taxonomy for content mirroring operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MirrorError {
    /// No node resolves at a configured content root path
    #[error("Content root not found at '{path}'")]
    RootNotFound { path: String },

    /// Content root exists but carries no usable translation locale
    #[error("Blank translation locale in the base content at '{path}'")]
    BlankLocale { path: String },

    /// Source and target roots carry the same locale (copying is meaningless)
    #[error("The same translation locale '{locale}' on the source and the target base content. Source='{source_path}'. Target='{target_path}'")]
    SameLocale {
        locale: String,
        source_path: String,
        target_path: String,
    },

    /// An existing target node blocks folder materialization because it is not a folder
    #[error("Cannot copy documents because the target node at '{path}' is not a folder but {kind:?}")]
    NotAFolder { path: String, kind: NodeKind },

    /// An existing target folder is linked to a different logical folder than the source
    #[error("Cannot copy documents because the translation id of the target folder at '{target_path}' doesn't match that of the source folder at '{source_path}': {target_id:?} (target) vs. {source_id:?} (source)")]
    TranslationIdMismatch {
        source_path: String,
        target_path: String,
        source_id: Option<String>,
        target_id: Option<String>,
    },

    /// A source folder named by a candidate reference does not exist
    #[error("Source folder doesn't exist at '{path}'")]
    SourceFolderMissing { path: String },

    /// Content store access failed
    #[error("Content store failure: {message}")]
    Store { message: String },

    /// Document management service call failed
    #[error("Document management service failed during {operation} for '{path}': {message}")]
    Service {
        operation: String,
        path: String,
        message: String,
    },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MirrorError {
    /// Classify this error into the pass-level failure taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            MirrorError::RootNotFound { .. }
            | MirrorError::BlankLocale { .. }
            | MirrorError::SameLocale { .. } => ErrorKind::Precondition,
            MirrorError::NotAFolder { .. }
            | MirrorError::TranslationIdMismatch { .. }
            | MirrorError::SourceFolderMissing { .. } => ErrorKind::StructuralConflict,
            MirrorError::Store { .. } => ErrorKind::Store,
            MirrorError::Service { .. } => ErrorKind::Service,
            MirrorError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            MirrorError::RootNotFound { .. } => "ERR_ROOT_NOT_FOUND",
            MirrorError::BlankLocale { .. } => "ERR_BLANK_LOCALE",
            MirrorError::SameLocale { .. } => "ERR_SAME_LOCALE",
            MirrorError::NotAFolder { .. } => "ERR_NOT_A_FOLDER",
            MirrorError::TranslationIdMismatch { .. } => "ERR_TRANSLATION_ID_MISMATCH",
            MirrorError::SourceFolderMissing { .. } => "ERR_SOURCE_FOLDER_MISSING",
            MirrorError::Store { .. } => "ERR_STORE",
            MirrorError::Service { .. } => "ERR_SERVICE",
            MirrorError::Internal { .. } => "ERR_INTERNAL",
        }
    }

    /// Human-readable reason string surfaced to the triggering event
    ///
    /// The triggering page-copy event is marked failed with this reason; it
    /// is the client-facing counterpart of the full error display.
    pub fn client_reason(&self) -> String {
        match self.kind() {
            ErrorKind::Store | ErrorKind::Service | ErrorKind::Internal => {
                format!("Failed to copy all the linked documents. {}", self)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = MirrorError::BlankLocale {
            path: "/content/en".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(err.code(), "ERR_BLANK_LOCALE");

        let err = MirrorError::TranslationIdMismatch {
            source_path: "/content/en/news".to_string(),
            target_path: "/content/fr/news".to_string(),
            source_id: Some("t1".to_string()),
            target_id: Some("t2".to_string()),
        };
        assert_eq!(err.kind(), ErrorKind::StructuralConflict);
    }

    #[test]
    fn test_client_reason_wraps_remote_failures() {
        let err = MirrorError::Service {
            operation: "translate_document".to_string(),
            path: "/content/en/news/article1".to_string(),
            message: "connection reset".to_string(),
        };
        assert!(err.client_reason().starts_with("Failed to copy all the linked documents."));
    }

    #[test]
    fn test_client_reason_keeps_structural_message() {
        let err = MirrorError::NotAFolder {
            path: "/content/fr/news".to_string(),
            kind: NodeKind::DocumentHandle,
        };
        assert!(err.client_reason().contains("is not a folder"));
    }
}
