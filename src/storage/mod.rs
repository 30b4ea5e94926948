//! Storage Layer
//!
//! JSON config persistence. Analysis results and transcripts are never
//! persisted.

pub mod config;

pub use config::*;
