//! morsegate - Morse-style unlock sequence recognizer for doorbell buttons
//!
//! This library watches a stream of classified button presses (short or long,
//! with a millisecond tick) and fires an unlock trigger when the most recent
//! presses spell the configured sequence within a time window.

pub mod classify;
pub mod cli;
pub mod config;
pub mod controller;
pub mod history;
pub mod json_output;
pub mod matcher;
pub mod pattern;
pub mod press;
pub mod replay;
pub mod shared;
pub mod trigger;
