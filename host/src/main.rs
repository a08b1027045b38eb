mod arg_handler;
mod contract;
mod display;
mod runner;
mod script;
mod stats;

use std::process;
use std::sync::Arc;

use clap::Parser;
use terrascript_terrain::{ColourSlot, TriangleMesh};

use arg_handler::Opts;
use display::HeadlessDisplay;
use runner::ScriptRunner;
use script::{ColourByAltitude, PerturbHeights, RandomColours, Script, BUILTINS};
use stats::{Stats, StatsRaw};

fn main() {
    pretty_env_logger::init();

    let opts = Opts::parse();

    if opts.list {
        for (name, description) in BUILTINS {
            println!("{:<10} {}", name, description);
        }
        return;
    }

    if opts.scripts.is_empty() {
        log::error!("no script given, see --list for the built-in scripts");
        process::exit(1);
    }
    let mut scripts = resolve_scripts(&opts);

    // Build a stats manager, load persistent stats
    let stats = opts
        .stat_options
        .stats_file
        .as_ref()
        .map(|f| StatsRaw::load(f.as_path()))
        .flatten()
        .map(|s| Stats::from_raw(&s))
        .unwrap_or(Stats::new());

    let stats = Arc::new(stats);

    let mut mesh = if opts.spherical {
        TriangleMesh::subdivided_icosahedron(opts.subdivisions)
    } else {
        let (width, height) = opts.size();
        TriangleMesh::flat_grid(width, height)
    };
    println!(
        "Mesh size: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangles().len(),
    );

    let mut display = HeadlessDisplay::new(
        opts.raster_size,
        opts.sea_level,
        opts.save_dir.clone(),
        opts.save_interval,
        stats.clone(),
    );
    let runner = ScriptRunner::new(stats.clone());

    for _ in 0..opts.repeat {
        for script in scripts.iter_mut() {
            if let Err(err) = runner.run(script.as_mut(), &mut mesh, &mut display) {
                log::error!("script '{}' failed: {}", script.name(), err);
                save_stats(&opts, &stats);
                process::exit(1);
            }
        }
    }

    save_stats(&opts, &stats);
    println!(
        "Ran {} scripts over {}, rendered {} frames",
        stats.scripts(),
        stats.vertices_human(),
        stats.frames(),
    );
}

/// Turn the script names from the command line into script instances.
fn resolve_scripts(opts: &Opts) -> Vec<Box<dyn Script>> {
    opts.scripts
        .iter()
        .map(|name| match name.as_str() {
            "colours" => {
                Box::new(RandomColours::new(ColourSlot::Surface, opts.seed)) as Box<dyn Script>
            }
            "perturb" => Box::new(PerturbHeights::new(opts.amplitude, opts.seed)),
            "altitude" => Box::new(ColourByAltitude::new(opts.snow_line)),
            _ => {
                log::error!("unknown script '{}', see --list", name);
                process::exit(1);
            }
        })
        .collect()
}

/// Save the persistent stats, if a stats file is configured.
fn save_stats(opts: &Opts, stats: &Stats) {
    if let Some(path) = &opts.stat_options.stats_file {
        stats.to_raw().save(path.as_path());
    }
}
