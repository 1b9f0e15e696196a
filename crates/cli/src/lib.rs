//! Terminal helpers for the aspect-ratio analysis tools
//!
//! Provides shared CLI functionality:
//! - Status lines and labelled fields, colored only when the stream supports it
//! - A fetch spinner that stays out of the way when stderr is not a terminal

#![warn(missing_docs)]

pub mod output;
pub mod progress;
