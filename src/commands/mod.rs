//! UI commands
//!
//! All commands exposed to the frontend shell. Each one is a thin
//! wrapper over a service; request parsing happens here, logic does not.

pub mod files;
pub mod ratios;
pub mod screener;
