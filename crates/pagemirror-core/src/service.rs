//! Mutating boundary to the document management workflow service
//!
//! All node creation and lifecycle operations go through this trait; the
//! core itself only ever calls the two translate operations, but embedders
//! wire one service object for the whole document workflow surface.

use crate::errors::Result;

/// Remote document management operations
///
/// Implementations typically forward to a workflow engine. Calls are
/// blocking; the core issues each mutating call at most once per resolved
/// path per pass and never retries on its own.
pub trait DocumentManagementService: Send + Sync {
    /// Put the document at `document_location` into editable state
    fn obtain_editable_document(&self, document_location: &str) -> Result<bool>;

    /// Discard the editable state of the document at `document_location`
    fn dispose_editable_document(&self, document_location: &str) -> Result<bool>;

    /// Commit the editable state of the document at `document_location`
    fn commit_editable_document(&self, document_location: &str) -> Result<bool>;

    /// Copy a document into a target folder under a new name, returning the created path
    fn copy_document(
        &self,
        source_document_location: &str,
        target_folder_location: &str,
        target_document_name: &str,
    ) -> Result<String>;

    /// Publish the document at `document_location`
    fn publish_document(&self, document_location: &str) -> Result<bool>;

    /// Take the document at `document_location` offline
    fn depublish_document(&self, document_location: &str) -> Result<bool>;

    /// Create the translation of a folder for the given locale, returning the created path
    ///
    /// The created folder carries the source folder's translation identifier
    /// and is placed under the translated counterpart of the source folder's
    /// parent; the parent counterpart must already exist.
    fn translate_folder(
        &self,
        source_folder_location: &str,
        locale: &str,
        name: &str,
    ) -> Result<String>;

    /// Create the translation of a document for the given locale, returning the created path
    fn translate_document(
        &self,
        source_document_location: &str,
        locale: &str,
        name: &str,
    ) -> Result<String>;
}
