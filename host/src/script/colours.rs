use rand::rngs::StdRng;
use rand::Rng;
use terrascript_terrain::{ColourSlot, MeshResult};

use super::{seeded, Script};
use crate::contract::ScriptContext;

/// Overwrites one colour slot of every vertex with a random colour.
pub struct RandomColours {
    slot: ColourSlot,
    rng: StdRng,
}

impl RandomColours {
    /// Construct the script, writing to the given slot.
    ///
    /// With a seed the colour sequence is reproducible, without one the
    /// RNG is seeded from entropy.
    pub fn new(slot: ColourSlot, seed: Option<u64>) -> Self {
        RandomColours {
            slot,
            rng: seeded(seed),
        }
    }
}

impl Script for RandomColours {
    fn name(&self) -> &'static str {
        "colours"
    }

    fn run(&mut self, ctx: &mut ScriptContext<'_>) -> MeshResult<()> {
        let vertices = ctx.mesh.vertex_count();

        for v in 0..vertices {
            let (red, green, blue) = (self.rng.gen(), self.rng.gen(), self.rng.gen());
            ctx.mesh.vertex(v)?.set_colour(self.slot, red, green, blue)?;
        }

        // The display must pick the new colours up
        ctx.control.recolour();
        ctx.control.force_redraw();
        Ok(())
    }
}
