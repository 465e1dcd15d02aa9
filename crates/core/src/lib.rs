//! Domain rules for the Noor practice tracker.
//!
//! This crate has no internal dependencies so the storage and HTTP layers can
//! both share its constants, validators, and the streak calculator.

pub mod account;
pub mod achievements;
pub mod error;
pub mod fasting;
pub mod group;
pub mod prayer;
pub mod quotes;
pub mod quran;
pub mod roles;
pub mod streak;
pub mod sync;
pub mod types;
