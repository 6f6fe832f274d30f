//! Digit Sequences: Generation and representation
//!
//! # Components
//! - `generator.rs`: Constrained random sequence generation

pub mod generator;

pub use generator::Sequence;
