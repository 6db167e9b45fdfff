//! DSP degradation stages
//!
//! One module per stage plus the shared filter/resampler primitives and the
//! fixed-order pipeline that sequences them.

mod filter;
mod jumble;
mod lofi;
mod noise;
mod pipeline;
mod resample;
mod skip;
mod stereo;
mod wow;

pub use filter::low_pass;
pub use jumble::chunk_jumble;
pub use lofi::lofi_crush;
pub use noise::noise_bursts;
pub use pipeline::{degrade, PipelineOutput};
pub use resample::resample;
pub use skip::skipping;
pub use stereo::stereo_shift;
pub use wow::wow_flutter;
