//! CLI Module
//!
//! Command-line interface for the Starport presentation engine.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Starport - headless portfolio presentation engine
#[derive(Parser, Debug)]
#[command(name = "starport-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every sound cue and ambient voice
    #[command(name = "cues")]
    Cues,

    /// Render one cue or voice to a WAV file
    #[command(name = "render")]
    Render {
        /// Cue or voice name (see `cues`)
        sound: String,

        /// Output WAV file
        #[arg(short, long)]
        out: PathBuf,

        #[arg(long, default_value_t = crate::audio::DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// 16 or 32
        #[arg(long, default_value_t = 16)]
        bit_depth: u16,
    },

    /// Replay a scripted visit and print the final state
    #[command(name = "simulate")]
    Simulate {
        /// Script of UI events and clock steps (JSON array)
        #[arg(short, long)]
        script: PathBuf,

        /// Page layout (JSON); the stock layout if omitted
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// Application config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Preference file; preferences are kept in memory if omitted
        #[arg(long)]
        prefs: Option<PathBuf>,

        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Mix everything played into this WAV file
        #[arg(long)]
        wav: Option<PathBuf>,
    },

    /// Visit every section of the stock page in order
    #[command(name = "tour")]
    Tour {
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Mix everything played into this WAV file
        #[arg(long)]
        wav: Option<PathBuf>,
    },
}
