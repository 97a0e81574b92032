//! Error types carried by streams and reported by the timing collaborator.
mod observable_errors;

pub use observable_errors::*;
