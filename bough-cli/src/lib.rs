//! # Bough CLI Library
//!
//! Command definitions and text rendering for the bough command-line tool.

pub mod cli;
pub mod render;
