//! DASS-21 screening: symptom cue extraction from free text and
//! questionnaire scoring with a depression-increase forecast.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod nlp;
pub mod scoring;

pub use error::{DassError, DassResult};
