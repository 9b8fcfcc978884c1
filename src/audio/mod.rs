pub mod analysis;
pub mod buffer;
pub mod decode;
pub mod features;
pub mod provider;

pub use analysis::{FrameAnalyzer, SPECTRUM_BINS, WINDOW_SIZE};
pub use buffer::PcmBuffer;
pub use features::FrameResult;
pub use provider::{PcmDecoder, SampleProvider, SymphoniaDecoder};
