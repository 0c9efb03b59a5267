//! Documentation server for a UI component registry.
//!
//! Loads the registry manifest, derives the site navigation from it, and serves
//! item pages whose previews and docs come from companion files next to each
//! item's source.

pub mod api;
pub mod config;
pub mod manifest;
pub mod models;
pub mod modules;
pub mod navigation;
pub mod publish;
pub mod render;
pub mod resolver;
