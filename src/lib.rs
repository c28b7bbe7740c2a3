//! Timecard minute-accounting engine
//!
//! This crate converts punched work intervals, which may run past midnight,
//! together with the labor category of each calendar day, into categorized
//! minute totals: regular work, overtime, late-night premium, non-statutory
//! and statutory holiday work, and night-shift minutes.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
