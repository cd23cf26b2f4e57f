//! Domain models for Porchlight.
//!
//! # Core Concepts
//!
//! ## Content
//!
//! - [`ContentStore`]: the parsed form of a site's JSON content file. One
//!   canonical shape (`projects` / `classes` / `links`), validated at load
//!   time and never written back to disk.
//! - [`Entry`]: one portfolio item. `title` is required; everything else is
//!   free-form. Entries carry no mandatory unique id, so URL identifiers are
//!   derived (see [`crate::content::ResolveStrategy`]).
//! - [`Course`], [`LinkItem`]: the academics and linktree items.
//!
//! ## View models
//!
//! Handlers return these instead of raw store types so each page carries the
//! derived identifier alongside the content ([`EntrySummary`],
//! [`EntryDetail`]).

mod course;
mod entry;
mod link;
mod pages;
mod store;

pub use course::*;
pub use entry::*;
pub use link::*;
pub use pages::*;
pub use store::*;
