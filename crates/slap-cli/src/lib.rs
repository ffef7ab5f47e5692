//! Library half of the `slap` command: logging setup, settings and the
//! command implementations, kept out of `main.rs` so they can be tested.

#![deny(unsafe_code)]

pub mod commands;
pub mod logging;
pub mod settings;
