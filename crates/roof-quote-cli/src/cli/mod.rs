//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `measure` - Build labelled roof sections from coordinate rings
//! - `price` - Price measured roofs or a single area
//! - `quote-number` - Mint a year-scoped quote number
//! - `detect` - Select the building footprint under a point

pub mod common;
pub mod detect;
pub mod measure;
pub mod price;
pub mod quote_number;

pub use detect::cmd_detect;
pub use measure::cmd_measure;
pub use price::cmd_price;
pub use quote_number::cmd_quote_number;
