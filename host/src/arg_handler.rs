use std::path::PathBuf;

use clap::{Args, Parser};

#[derive(Parser, Clone)]
pub struct Opts {
    /// Names of the scripts to run, in order (see --list)
    #[clap(value_name = "SCRIPT")]
    pub scripts: Vec<String>,

    /// List the built-in scripts, then exit
    #[clap(long)]
    pub list: bool,

    /// Grid width in vertices (def: 64)
    #[clap(short, long, value_name = "VERTICES")]
    pub width: Option<usize>,

    /// Grid height in vertices (def: 64)
    #[clap(short, long, value_name = "VERTICES")]
    pub height: Option<usize>,

    /// Build a planet mesh instead of a flat grid
    #[clap(long)]
    pub spherical: bool,

    /// Subdivision steps of the planet mesh
    ///
    /// This value is only relevant if --spherical is given
    #[clap(long, value_name = "STEPS", default_value = "3")]
    pub subdivisions: u32,

    /// Seed for the stochastic scripts (def: from entropy)
    #[clap(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Run the script list this many times
    #[clap(short, long, value_name = "TIMES", default_value = "1")]
    pub repeat: usize,

    /// Peak-to-peak height jitter of the perturb script
    #[clap(long, value_name = "HEIGHT", default_value = "0.02")]
    pub amplitude: f32,

    /// Height below which a vertex shows its submerged colour
    #[clap(long, value_name = "HEIGHT", default_value = "0")]
    pub sea_level: f32,

    /// Normalised height above which the altitude script paints snow
    #[clap(long, value_name = "FRACTION", default_value = "0.8")]
    pub snow_line: f32,

    /// Size of the square render raster in pixels
    #[clap(long, value_name = "PIXELS", default_value = "256")]
    pub raster_size: usize,

    /// The directory to save frame snapshots in
    #[clap(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// The interval at which to save frames, in frames
    ///
    /// This value is only relevant if --save-dir is given
    #[clap(long, value_name = "FRAMES", default_value = "1")]
    pub save_interval: usize,

    #[clap(flatten)]
    pub stat_options: StatsOptions,
}

#[derive(Clone, Debug, Args)]
pub struct StatsOptions {
    /// File to persist stats in across runs
    #[clap(long, value_name = "FILE")]
    pub stats_file: Option<PathBuf>,
}

impl Opts {
    /// Get the grid size, in vertices per axis.
    pub fn size(&self) -> (usize, usize) {
        (self.width.unwrap_or(64), self.height.unwrap_or(64))
    }
}
