//! Command implementations for the jshawk CLI

pub mod mcp;
pub mod rules;
pub mod scan;
