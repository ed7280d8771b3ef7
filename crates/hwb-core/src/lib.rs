//! Core logic for the homework status bot.
//!
//! This crate is framework-agnostic. The review API and Telegram live behind
//! ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod homework;
pub mod logging;
pub mod messaging;
pub mod notifier;
pub mod poller;
pub mod ports;
pub mod retry;

pub use errors::{Error, Result};
