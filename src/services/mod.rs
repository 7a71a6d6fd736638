//! External service boundaries.

mod provider;
pub use provider::*;
