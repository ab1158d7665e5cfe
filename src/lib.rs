//! Seniority Bid Award Engine for airline pilots
//!
//! This crate awards bid choices (bases, deployments, vacation blocks) to
//! pilots in strict seniority order. Each pilot receives the highest ranked
//! choice on their submitted list that is open to their status and still has
//! a place, and every decision is recorded in a per-pilot trail.
//!
//! The [`engine`] module holds the award algorithm, [`config`] loads bid type
//! options from YAML, and [`api`] exposes the engine over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod telemetry;
