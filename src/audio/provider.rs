//! Background sample loading.
//!
//! Decoding runs on its own thread so the periodic analysis tick never waits
//! on file I/O. The decoded buffer is published by swapping a whole `Arc`,
//! so readers see either "no data" or a complete buffer, never a mix.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;

use super::buffer::PcmBuffer;
use super::decode::decode_audio;

/// Source of decoded PCM for a path.
pub trait PcmDecoder: Send + Sync + 'static {
    fn decode(&self, path: &Path) -> Result<PcmBuffer>;
}

/// Decodes files with symphonia.
#[derive(Clone, Copy, Debug, Default)]
pub struct SymphoniaDecoder;

impl PcmDecoder for SymphoniaDecoder {
    fn decode(&self, path: &Path) -> Result<PcmBuffer> {
        decode_audio(path)
    }
}

struct Shared {
    current: ArcSwapOption<PcmBuffer>,
    /// Bumped by every `load`; a decode only publishes if it still matches.
    generation: AtomicU64,
    /// Last generation whose decode finished (success or failure).
    settled: AtomicU64,
    /// Serializes "check generation, then publish" against `load`'s "bump, then clear".
    publish: Mutex<()>,
}

impl Shared {
    fn finish(&self, generation: u64, path: &Path, result: Result<PcmBuffer>) {
        let _guard = self.publish.lock();
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            log::debug!(
                "Discarding stale decode of {} (generation {}, latest {})",
                path.display(),
                generation,
                latest
            );
            return;
        }

        match result {
            Ok(buffer) => self.current.store(Some(Arc::new(buffer))),
            Err(err) => log::error!("Cannot read {}: {:#}", path.display(), err),
        }
        self.settled.store(generation, Ordering::SeqCst);
    }
}

/// Loads one track at a time in the background and exposes the latest result.
pub struct SampleProvider<D: PcmDecoder = SymphoniaDecoder> {
    shared: Arc<Shared>,
    decoder: Arc<D>,
}

impl SampleProvider<SymphoniaDecoder> {
    pub fn new() -> Self {
        Self::with_decoder(SymphoniaDecoder)
    }
}

impl Default for SampleProvider<SymphoniaDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: PcmDecoder> SampleProvider<D> {
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            shared: Arc::new(Shared {
                current: ArcSwapOption::empty(),
                generation: AtomicU64::new(0),
                settled: AtomicU64::new(0),
                publish: Mutex::new(()),
            }),
            decoder: Arc::new(decoder),
        }
    }

    /// Start decoding `path` in the background.
    ///
    /// The current buffer is cleared before this returns. Results from earlier
    /// loads that finish later are dropped.
    pub fn load(&self, path: impl AsRef<Path>) {
        let path: PathBuf = path.as_ref().to_path_buf();

        let generation = {
            let _guard = self.shared.publish.lock();
            self.shared.current.store(None);
            self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        log::info!("Loading samples from {} (generation {})", path.display(), generation);

        let shared = Arc::clone(&self.shared);
        let decoder = Arc::clone(&self.decoder);
        let thread_path = path.clone();
        let spawned = thread::Builder::new()
            .name("sample-loader".to_string())
            .spawn(move || {
                let result = decoder.decode(&thread_path);
                shared.finish(generation, &thread_path, result);
            });

        if let Err(err) = spawned {
            self.shared.finish(
                generation,
                &path,
                Err(anyhow::anyhow!("Failed to spawn loader thread: {}", err)),
            );
        }
    }

    /// The most recently published buffer, if any.
    pub fn current(&self) -> Option<Arc<PcmBuffer>> {
        self.shared.current.load_full()
    }

    /// Sample rate of the current buffer, or 0 when there is none.
    pub fn sample_rate(&self) -> u32 {
        self.current().map_or(0, |buffer| buffer.sample_rate())
    }

    /// True while the decode started by the latest `load` has not finished.
    pub fn is_loading(&self) -> bool {
        self.shared.settled.load(Ordering::SeqCst) != self.shared.generation.load(Ordering::SeqCst)
    }

    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }
}
