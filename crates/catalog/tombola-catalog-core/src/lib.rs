//! tombola-catalog-core: the host-glue data sources Tombola nodes read.
//!
//! Everything here is collaborator territory: file persistence and directory
//! scans whose failures must never reach the selection engine. Each loader
//! degrades to empty data with a logged warning instead of propagating I/O
//! errors upward.

pub mod catalog;
pub mod error;
pub mod media;
pub mod roster;

pub use catalog::{Catalog, CatalogEntry};
pub use error::CatalogError;
pub use media::{MediaLibrary, MEDIA_EXTENSIONS};
pub use roster::{BaseStyle, CharacterSheet, ExtraAdapter, Roster};
