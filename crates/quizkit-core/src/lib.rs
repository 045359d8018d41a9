//! quizkit-core: quiz question model, validation, bulk codecs, and scoring.
//!
//! This crate defines the question data model and the pure operations the
//! quizkit tools build on: authoring edits, validation, CSV/JSON import and
//! export, and grading of learner answers.

pub mod config;
pub mod csv_codec;
pub mod editor;
pub mod error;
pub mod export;
pub mod import;
pub mod json_codec;
pub mod model;
pub mod record;
pub mod scoring;
pub mod session;
pub mod statistics;
pub mod traits;
pub mod validator;
