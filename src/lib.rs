//! Fetches today's near-Earth objects from the NASA NeoWs feed and reshapes
//! each one into a flat, rounded [`record::OutputRecord`].

pub mod config;
pub mod date;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod record;
pub mod types;
