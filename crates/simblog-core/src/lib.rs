//! Simblog Core Library
//!
//! Offline text embedding, similarity scoring and related-content ranking
//! for a small document corpus.

pub mod config;
pub mod content;
pub mod db;
pub mod document;
pub mod embedding;
pub mod error;
pub mod format;
pub mod logging;
pub mod recommend;
pub mod service;
pub mod similarity;
pub mod store;
pub mod text;
