//! stocklens: technical-analysis charts for a single ticker, in the terminal.
//!
//! Hexagonal architecture: pure computation in [`domain`], port traits in
//! [`ports`], concrete implementations (Yahoo Finance, CSV files, INI config,
//! terminal charts) in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
