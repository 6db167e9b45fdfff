//! Whole-file degradation run
//!
//! Ties the collaborators together for one source file: decode, run the
//! sample-domain pipeline, encode the undamaged intermediate, then corrupt
//! the encoded bytes into the final artifact. The two phases stay strictly
//! separated — corruption only ever sees a successfully written container.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;
use rand::Rng;

use crate::config::RotConfig;
use crate::corrupt::corrupt_bytes;
use crate::dsp::degrade;
use crate::engine::{export_audio, import_audio, output_paths};
use crate::error::Result;

/// Artifacts and stats of a completed run.
#[derive(Debug)]
pub struct RotOutput {
    /// Post-DSP, pre-corruption WAV (kept for diffing against the final).
    pub intermediate: PathBuf,
    /// The corrupted final artifact.
    pub rotted: PathBuf,
    /// Working rate the lo-fi stage chose (original rate if disabled).
    pub working_rate: u32,
    /// Byte write attempts performed by the corruption engine.
    pub bytes_corrupted: usize,
}

/// Degrade one audio file end to end.
///
/// Output names derive from the source base name plus a run timestamp:
/// `<base>_intermediate_<ts>.wav` and `<base>_rotted_<ts>.wav`.
pub fn process_file(input: &Path, config: &RotConfig, rng: &mut impl Rng) -> Result<RotOutput> {
    config.validate()?;

    let buffer = import_audio(input)?;
    info!(
        "Loaded {}: {} frames, {} channel(s), {} Hz",
        input.display(),
        buffer.len(),
        buffer.channels(),
        buffer.sample_rate
    );

    let run = degrade(buffer, config, rng)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let (intermediate, rotted) = output_paths(input, &timestamp);

    info!("Running stage 9: exporting uncorrupted version");
    export_audio(&run.buffer, &intermediate)?;

    info!("Running stage 10: byte-level corruption");
    let mut data = fs::read(&intermediate)?;
    let bytes_corrupted = corrupt_bytes(&mut data, config.corruption.fraction, rng)?;
    fs::write(&rotted, &data)?;

    info!(
        "Full rot complete: {} ({} byte writes)",
        rotted.display(),
        bytes_corrupted
    );

    Ok(RotOutput {
        intermediate,
        rotted,
        working_rate: run.working_rate,
        bytes_corrupted,
    })
}
