//! CLI command handlers.

pub(crate) mod check;
pub(crate) mod config;
