//! Wavrot - deliberate audio decay
//!
//! Degrades a clean recording to simulate analog and digital rot. Two
//! strictly separated phases:
//! 1. Sample domain - an ordered pipeline of toggleable degradation stages
//!    (low-pass, lo-fi resampling, wow/flutter, skipping, noise bursts,
//!    stereo misalignment, chunk jumbling) followed by a restore to the
//!    original sample rate.
//! 2. Byte domain - random overwrites of the encoded container, sparing
//!    only a short header prefix.
//!
//! Every randomized operation takes an explicit `rand::Rng`, so a seeded
//! generator reproduces a run bit for bit.

pub mod cli;
pub mod config;
pub mod corrupt;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod process;

pub use config::RotConfig;
pub use error::{Result, RotError};
pub use process::{process_file, RotOutput};
