//! Core types for the classifier.

mod classification;
mod config;

pub use classification::Classification;
pub use config::ClassifierConfig;
