use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use number_prefix::NumberPrefix::{self, Prefixed, Standalone};
use serde::{Deserialize, Serialize};

/// A statistics manager, that keeps track of some totals while the host is
/// running.
///
/// This manager tracks how many script runs have completed, how many
/// vertices those runs walked over, and how many frames the display has
/// rendered.
pub struct Stats {
    /// The total number of script runs that completed.
    scripts: AtomicUsize,

    /// The total number of vertices walked over by completed runs.
    vertices: AtomicUsize,

    /// The total number of frames the display rendered.
    frames: AtomicUsize,
}

impl Stats {
    /// Construct a new stats object.
    pub fn new() -> Self {
        Stats {
            scripts: AtomicUsize::new(0),
            vertices: AtomicUsize::new(0),
            frames: AtomicUsize::new(0),
        }
    }

    /// Load data from the given raw stats object.
    pub fn from_raw(raw: &StatsRaw) -> Self {
        let stats = Self::new();
        stats.scripts.store(raw.scripts, Ordering::Relaxed);
        stats.vertices.store(raw.vertices, Ordering::Relaxed);
        stats.frames.store(raw.frames, Ordering::Relaxed);
        stats
    }

    /// Get the total number of script runs that completed.
    pub fn scripts(&self) -> usize {
        self.scripts.load(Ordering::Relaxed)
    }

    /// Get the total number of vertices walked over by completed runs.
    pub fn vertices(&self) -> usize {
        self.vertices.load(Ordering::Relaxed)
    }

    /// Get the total number of vertices walked over, as a string in a
    /// humanly readable format.
    pub fn vertices_human(&self) -> String {
        match NumberPrefix::decimal(self.vertices() as f64) {
            Standalone(vertices) => format!("{:.00} V", vertices.ceil()),
            Prefixed(prefix, vertices) => {
                if vertices < 10f64 {
                    format!("{:.02} {}V", vertices, prefix)
                } else if vertices < 100f64 {
                    format!("{:.01} {}V", vertices, prefix)
                } else {
                    format!("{:.00} {}V", vertices, prefix)
                }
            }
        }
    }

    /// Get the total number of frames the display rendered.
    pub fn frames(&self) -> usize {
        self.frames.load(Ordering::Relaxed)
    }

    /// Increment the number of completed script runs, by one.
    pub fn inc_scripts(&self) {
        self.scripts.fetch_add(1, Ordering::Relaxed);
    }

    /// Increase the total number of walked vertices, by the given amount.
    pub fn inc_vertices_by_n(&self, n: usize) {
        self.vertices.fetch_add(n, Ordering::Relaxed);
    }

    /// Increment the number of rendered frames, by one.
    pub fn inc_frames(&self) {
        self.frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Convert this data in a raw stats object.
    pub fn to_raw(&self) -> StatsRaw {
        StatsRaw {
            scripts: self.scripts(),
            vertices: self.vertices(),
            frames: self.frames(),
        }
    }
}

/// A struct that contains raw stats data.
/// This struct can be used to store and load stats data.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsRaw {
    /// The total number of script runs that completed.
    pub scripts: usize,

    /// The total number of vertices walked over by completed runs.
    pub vertices: usize,

    /// The total number of frames the display rendered.
    pub frames: usize,
}

impl StatsRaw {
    /// Load the raw stats from the file at the given path.
    /// If no stats could be loaded, `None` is returned.
    pub fn load(path: &Path) -> Option<Self> {
        // Make sure the file exists
        if !path.is_file() {
            log::info!("not loading persistent stats, file not found");
            return None;
        }

        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                log::error!("failed to open persistent stats file: {}", err);
                return None;
            }
        };

        let mut data = String::new();
        if let Err(err) = file.read_to_string(&mut data) {
            log::error!("failed to read persistent stats from file: {}", err);
            return None;
        }

        // Load the raw state
        serde_yaml::from_str(&data)
            .map_err(|_| log::warn!("failed to load persistent stats, malformed data"))
            .ok()
    }

    /// Save the raw stats to the file at the given path.
    pub fn save(&self, path: &Path) {
        let data = match serde_yaml::to_string(&self) {
            Ok(data) => data,
            Err(err) => {
                log::error!("failed to serialize persistent stats: {}", err);
                return;
            }
        };

        let result = File::create(path).and_then(|mut file| file.write_all(data.as_bytes()));
        if let Err(err) = result {
            log::error!("failed to save persistent stats to file: {}", err);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn raw_roundtrip_keeps_totals() {
        let stats = Stats::new();
        stats.inc_scripts();
        stats.inc_vertices_by_n(1500);
        stats.inc_frames();
        stats.inc_frames();

        let raw = stats.to_raw();
        let restored = Stats::from_raw(&raw);
        assert_eq!(restored.scripts(), 1);
        assert_eq!(restored.vertices(), 1500);
        assert_eq!(restored.frames(), 2);
    }

    #[test]
    fn vertices_human_uses_decimal_prefixes() {
        let stats = Stats::new();
        stats.inc_vertices_by_n(950);
        assert_eq!(stats.vertices_human(), "950 V");

        stats.inc_vertices_by_n(550);
        assert_eq!(stats.vertices_human(), "1.50 kV");
    }

    #[test]
    fn raw_stats_survive_a_trip_through_the_file() {
        let path =
            std::env::temp_dir().join(format!("terrascript-stats-{}.yml", std::process::id()));

        let stats = Stats::new();
        stats.inc_scripts();
        stats.inc_vertices_by_n(42);
        stats.inc_frames();
        stats.to_raw().save(&path);

        let loaded = StatsRaw::load(&path).unwrap();
        assert_eq!(loaded.scripts, 1);
        assert_eq!(loaded.vertices, 42);
        assert_eq!(loaded.frames, 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn loading_missing_stats_gives_none() {
        let path = std::env::temp_dir().join(format!(
            "terrascript-stats-missing-{}.yml",
            std::process::id()
        ));
        assert!(StatsRaw::load(&path).is_none());
    }
}
