//! Screening workflows: the upstream classifier boundary and the candidate
//! results management pipeline built on top of it.

pub mod candidates;
pub mod classifier;
