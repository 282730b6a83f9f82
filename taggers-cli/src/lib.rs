//! Taggers CLI library
//!
//! Reads pre-analyzed sentences from stdin, runs a rule-file pipeline over
//! each one and prints the annotations.

pub mod input;
pub mod output;
