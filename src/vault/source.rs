//! Note source capability
//!
//! The traversal engine consumes notes only through this trait: resolve a
//! name to a handle, list outgoing references, read title/mtime/body. Any
//! backing store works - the filesystem vault index in this crate, or an
//! in-memory stub in tests.

use chrono::{DateTime, Utc};

pub trait NoteSource {
    /// Opaque per-note handle. Cheap to clone; valid for the lifetime of the
    /// source it came from.
    type Handle: Clone;

    /// Resolve a reference name to a note, or `None` if it does not name
    /// any note this source knows about.
    fn resolve(&self, name: &str) -> Option<Self::Handle>;

    /// Canonical identifier for a note (vault-relative path). This is the
    /// deduplication key: two handles with equal ids are the same note.
    fn id(&self, handle: &Self::Handle) -> String;

    /// Outgoing reference names in document order. A note with no parseable
    /// link list yields an empty vector, never an error.
    fn outgoing_links(&self, handle: &Self::Handle) -> Vec<String>;

    /// Display title.
    fn title(&self, handle: &Self::Handle) -> String;

    /// Modification time of the underlying note.
    fn last_modified(&self, handle: &Self::Handle) -> DateTime<Utc>;

    /// Full body text. Only called for notes whose content will actually be
    /// included in the export.
    fn read_body(&self, handle: &Self::Handle) -> std::io::Result<String>;
}
