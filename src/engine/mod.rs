//! Audio Engine Module
//!
//! Buffer management and file I/O around the degradation core.

pub mod buffer;
pub mod io;

pub use buffer::{AudioBuffer, ChannelLayout, SAMPLE_MAX, SAMPLE_MIN};
pub use io::{
    export_audio, generate_stereo_test_tone, generate_test_tone, import_audio, output_paths,
};
