//! Quarkscope - real-time audio analysis for music visualizers.
//!
//! A [`SampleProvider`](audio::SampleProvider) decodes a track in the
//! background; each tick a [`Pipeline`](pipeline::Pipeline) analyzes the
//! window at the playback position and updates the spectrum, spectrogram,
//! oscilloscope, Lissajous, spectral flux and VU views.

pub mod audio;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod views;

pub use audio::{FrameAnalyzer, FrameResult, PcmBuffer, SampleProvider};
pub use pipeline::{Pipeline, SettingsHandle, TickOutcome};
pub use views::ViewSet;
