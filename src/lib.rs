//! Pixelcam - retro palette pixelation
//!
//! Settings persistence, palette session glue and the pixelation loop around
//! the `retro-palette` core. This library exposes modules for integration
//! testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
