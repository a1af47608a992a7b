//! coursegen: materializes course scaffolding (phases -> modules -> lesson files)
//! from a declarative outline.
//!
//! Layers, inner to outer: `domain` (outline model, pure traversal),
//! `application` (services over the `FileSystem` boundary), `infrastructure`
//! (real I/O, wiring), `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
