// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::Settings;
use crate::sketches::SketchKind;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sketchbook")]
#[command(about = "Real-time wgpu sketches: planet, linebois, lighting", long_about = None)]
pub struct Cli {
    /// Sketch to run
    #[arg(long, value_enum, env = "SKETCH", default_value_t = SketchKind::Planet, ignore_case = true)]
    pub sketch: SketchKind,

    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the sketch's random scene layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Run the frame loop without a window or GPU
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Disable periodic FPS output
    #[arg(long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Settings file (if any) with command-line overrides applied
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        Ok(settings)
    }
}
