//! dnsprobe Application Layer
//!
//! Ports describe the collaborators the resolution core talks to; use cases
//! implement the query engine and the speculative guess pipeline on top of them.
pub mod context;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use context::ResolverContext;
