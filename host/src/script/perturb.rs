use rand::rngs::StdRng;
use rand::Rng;
use terrascript_terrain::MeshResult;

use super::{seeded, Script};
use crate::contract::ScriptContext;

/// Moves every vertex height by a small uniform random offset.
///
/// The offset is drawn from `[-amplitude / 2, amplitude / 2)`, so the
/// amplitude is peak to peak and the expected drift is zero.
pub struct PerturbHeights {
    amplitude: f32,
    rng: StdRng,
}

impl PerturbHeights {
    /// Construct the script with the given peak-to-peak amplitude.
    pub fn new(amplitude: f32, seed: Option<u64>) -> Self {
        PerturbHeights {
            amplitude,
            rng: seeded(seed),
        }
    }
}

impl Script for PerturbHeights {
    fn name(&self) -> &'static str {
        "perturb"
    }

    fn run(&mut self, ctx: &mut ScriptContext<'_>) -> MeshResult<()> {
        let vertices = ctx.mesh.vertex_count();

        for v in 0..vertices {
            let height = ctx.mesh.vertex_height(v)?;
            let offset = self.rng.gen::<f32>() - 0.5;
            ctx.mesh.set_vertex_height(v, height + offset * self.amplitude)?;
        }

        // New heights shift the shading and the altitude bands
        ctx.control.recolour();
        ctx.control.force_redraw();
        Ok(())
    }
}
