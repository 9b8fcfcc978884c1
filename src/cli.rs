use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quarkscope", about = "Analyze an audio file the way a live visualizer would")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: PathBuf,

    /// Config file (defaults to ./quarkscope.toml or ~/.config/quarkscope/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Analysis ticks per second (10-60)
    #[arg(long)]
    pub fps: Option<u32>,

    /// Number of spectrum bars (16-128)
    #[arg(long)]
    pub bars: Option<u32>,

    /// Spectrogram history length in columns (50-1000)
    #[arg(long)]
    pub spectrogram_columns: Option<u32>,

    /// Spectral flux history length in points (100-5000)
    #[arg(long)]
    pub flux_points: Option<u32>,

    /// Pace ticks in real time instead of running as fast as possible
    #[arg(long)]
    pub realtime: bool,

    /// Write a JSON snapshot of the final view states
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
