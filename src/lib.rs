//! `loan-predictor` library crate.
//!
//! The binary (`loan`) is a thin wrapper around this library so that:
//!
//! - the submission flow is testable without a terminal or a live service
//! - the console and TUI front-ends share one controller

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod form;
pub mod report;
pub mod tui;
