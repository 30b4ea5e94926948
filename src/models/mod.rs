//! Data Models
//!
//! Application settings. Analysis and chat data types live in
//! `log-insight-core`.

pub mod settings;

pub use settings::*;
