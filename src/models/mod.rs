//! Domain models for the component registry.
//!
//! # Core Concepts
//!
//! - [`Manifest`]: The aggregate, versioned description of every registry item.
//!   Loaded once and never mutated; a reload replaces it wholesale.
//! - [`Item`]: One catalog entry (component, hook, utility...) with its
//!   [`Category`] and declared files.
//! - [`FileRef`]: A file declared by an item, either a bare path or a path with
//!   its own category.
//! - [`NavigationEntry`]: A category tab derived from the manifest on every read.
//! - [`PublicItem`]: The per-item projection written by the build step for
//!   external consumers.

mod category;
mod item;
mod manifest;
mod navigation;

pub use category::*;
pub use item::*;
pub use manifest::*;
pub use navigation::*;
