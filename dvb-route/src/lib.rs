//! Dresden public transport route lookup.
//!
//! Answers "how do I get from this stop to that one?" by asking the VVO
//! WebAPI and printing its answer as a bounded structured dump.

pub mod cli;
pub mod domain;
pub mod dump;
pub mod query;
pub mod vvo;
