//! Core domain types and logic.

pub mod advice;
pub mod analysis;
pub mod config_validation;
pub mod detector;
pub mod error;
pub mod indicator;
pub mod price;
pub mod series;
pub mod signal;
