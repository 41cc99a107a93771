//! Generic utility primitives with zero domain knowledge.
//!
//! - `validation` - Input validation helpers

pub mod validation;
