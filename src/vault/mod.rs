//! Vault module - note storage access
//!
//! This module provides:
//! - The NoteSource capability trait the engine consumes
//! - Outgoing-link extraction from note bodies
//! - A filesystem-backed vault index implementing NoteSource

pub mod index;
pub mod source;
pub mod wikilinks;
