//! Candidate placement tracking.

pub mod best;
