//! Domains module containing business logic organized by bounded contexts.
//!
//! The server only exposes tools; each subdomain keeps its own errors and
//! tests next to the code.

pub mod tools;
