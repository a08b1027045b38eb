use std::sync::Arc;
use std::time::Instant;

use terrascript_terrain::{MeshError, TriangleMesh};

use crate::contract::ScriptContext;
use crate::display::HeadlessDisplay;
use crate::script::Script;
use crate::stats::Stats;

/// An error while running a script.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    /// The script failed a mesh call.
    #[error(transparent)]
    Script(#[from] MeshError),

    /// The display failed to write a snapshot.
    #[error("failed to save snapshot: {0}")]
    Snapshot(#[from] image::ImageError),
}

/// Runs mutation scripts against a mesh and a display, one at a time.
///
/// The runner is where script failures surface. A failed mesh call inside
/// a script propagates out of [`ScriptRunner::run`] unchanged, and the
/// caller decides how loud to be about it; the runner never retries.
pub struct ScriptRunner {
    stats: Arc<Stats>,
}

impl ScriptRunner {
    /// Construct a new runner.
    pub fn new(stats: Arc<Stats>) -> Self {
        ScriptRunner { stats }
    }

    /// Run one script to completion, then service the display signals it
    /// left behind.
    pub fn run(
        &self,
        script: &mut dyn Script,
        mesh: &mut TriangleMesh,
        display: &mut HeadlessDisplay,
    ) -> Result<(), RunError> {
        let vertices = mesh.vertex_count();
        log::info!(
            "running script '{}' over {} vertices",
            script.name(),
            vertices,
        );

        let start = Instant::now();
        script.run(&mut ScriptContext {
            mesh: &mut *mesh,
            control: &mut *display,
        })?;

        self.stats.inc_scripts();
        self.stats.inc_vertices_by_n(vertices);

        // The script has returned, do the work its signals asked for
        display.service(mesh)?;

        log::info!(
            "script '{}' finished in {:?}",
            script.name(),
            start.elapsed(),
        );
        Ok(())
    }
}
