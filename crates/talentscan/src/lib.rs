//! Core library for the TalentScan resume screening service.
//!
//! Screening submits resume text to an external classifier, derives a
//! hire-funnel placement from each returned confidence score, and keeps the
//! accumulated result list durable across sessions. The HTTP surface, the
//! storage backends, and the classifier client all live behind the
//! [`screening`] module; [`config`], [`telemetry`], and [`error`] carry the
//! service plumbing.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
