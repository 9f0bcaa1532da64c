//! Shared test utilities for the card
//!
//! - Card fixtures (app construction, recording mirror, scene walkers)
//! - TUI terminal testing helpers

#![allow(dead_code)]

pub mod fixtures;
pub mod terminal;
