//! Core types and traits for the hopgate redirect edge.
//!
//! This crate provides the slug type shared by the redirector and the audit
//! pipeline, and the key-value store seam both of them talk to.

pub mod error;
pub mod slug;
pub mod store;

pub use error::{SlugError, StorageError};
pub use slug::{Slug, SlugCheck};
pub use store::KvStore;
