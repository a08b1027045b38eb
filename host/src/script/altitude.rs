use terrascript_terrain::{ColourSlot, MeshResult};

use super::Script;
use crate::contract::ScriptContext;

/// Normalised height below which land counts as shoreline.
const BEACHLINE: f32 = 0.01;

/// Normalised height below which the low-to-high blend applies.
const TREELINE: f32 = 0.25;

pub(crate) const OCEAN: (f32, f32, f32) = (0.0, 0.0, 1.0);
pub(crate) const SHORELINE: (f32, f32, f32) = (1.0, 1.0, 0.0);
pub(crate) const LOW: (f32, f32, f32) = (0.0, 1.0, 0.0);
pub(crate) const HIGH: (f32, f32, f32) = (1.0, 0.5, 0.0);
pub(crate) const SNOW: (f32, f32, f32) = (1.0, 1.0, 1.0);

/// Colours every vertex by its height, relative to the tallest vertex.
///
/// The submerged slot of every vertex gets the ocean colour. The surface
/// slot is banded by normalised height: shoreline below the beachline, a
/// low-to-high blend up to the treeline, plain high ground above it, and
/// snow above the snow line.
pub struct ColourByAltitude {
    snow_line: f32,
}

impl ColourByAltitude {
    /// Construct the script with the given snow line, as a fraction of
    /// the tallest vertex.
    pub fn new(snow_line: f32) -> Self {
        ColourByAltitude { snow_line }
    }
}

impl Script for ColourByAltitude {
    fn name(&self) -> &'static str {
        "altitude"
    }

    fn run(&mut self, ctx: &mut ScriptContext<'_>) -> MeshResult<()> {
        let vertices = ctx.mesh.vertex_count();

        // First pass, the band thresholds scale with the tallest vertex
        let mut max_height = 0.0f32;
        for v in 0..vertices {
            max_height = max_height.max(ctx.mesh.vertex_height(v)?);
        }

        for v in 0..vertices {
            let height = ctx.mesh.vertex_height(v)?;
            let normalised = if max_height > 0.0 {
                height / max_height
            } else {
                0.0
            };

            let (red, green, blue) = if normalised > self.snow_line {
                SNOW
            } else if normalised < BEACHLINE {
                SHORELINE
            } else if normalised < TREELINE {
                // Blend from the low colour up to the high colour
                let blend = normalised / TREELINE;
                (
                    HIGH.0 * blend + LOW.0 * (1.0 - blend),
                    HIGH.1 * blend + LOW.1 * (1.0 - blend),
                    HIGH.2 * blend + LOW.2 * (1.0 - blend),
                )
            } else {
                HIGH
            };

            let mut vertex = ctx.mesh.vertex(v)?;
            vertex.set_colour(ColourSlot::Surface, red, green, blue)?;
            vertex.set_colour(ColourSlot::Submerged, OCEAN.0, OCEAN.1, OCEAN.2)?;
        }

        ctx.control.recolour();
        ctx.control.force_redraw();
        Ok(())
    }
}
