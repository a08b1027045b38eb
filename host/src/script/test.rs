use terrascript_terrain::{ColourSlot, MeshError, MeshResult};

use super::altitude::{OCEAN, SHORELINE, SNOW};
use super::*;
use crate::contract::test::{MockDisplay, MockMesh};
use crate::contract::{MeshScope, ScriptContext};

/// Raises every vertex by a fixed amount, then signals the display.
struct RaiseBy(f32);

impl Script for RaiseBy {
    fn name(&self) -> &'static str {
        "raise"
    }

    fn run(&mut self, ctx: &mut ScriptContext<'_>) -> MeshResult<()> {
        let vertices = ctx.mesh.vertex_count();
        for v in 0..vertices {
            let height = ctx.mesh.vertex_height(v)?;
            ctx.mesh.set_vertex_height(v, height + self.0)?;
        }
        ctx.control.recolour();
        ctx.control.force_redraw();
        Ok(())
    }
}

/// Writes to a single vertex index, whether it exists or not.
struct TouchVertex(usize);

impl Script for TouchVertex {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn run(&mut self, ctx: &mut ScriptContext<'_>) -> MeshResult<()> {
        ctx.mesh.set_vertex_height(self.0, 0.0)?;
        ctx.control.recolour();
        ctx.control.force_redraw();
        Ok(())
    }
}

#[test]
fn raising_three_vertices_by_a_tenth() {
    let mut mesh = MockMesh::with_heights(&[1.0, 2.0, 3.0]);
    let mut display = MockDisplay::default();

    RaiseBy(0.1)
        .run(&mut ScriptContext {
            mesh: &mut mesh,
            control: &mut display,
        })
        .unwrap();

    for (index, expected) in [1.1f32, 2.1, 3.1].iter().enumerate() {
        assert!((mesh.vertex_height(index).unwrap() - expected).abs() < 1e-6);
    }
    assert_eq!(display.recolours, 1);
    assert_eq!(display.redraws, 1);
}

#[test]
fn empty_mesh_still_signals_the_display() {
    let mut mesh = MockMesh::with_heights(&[]);
    let mut display = MockDisplay::default();

    RaiseBy(0.1)
        .run(&mut ScriptContext {
            mesh: &mut mesh,
            control: &mut display,
        })
        .unwrap();

    assert!(mesh.height_writes().is_empty());
    assert_eq!(display.recolours, 1);
    assert_eq!(display.redraws, 1);
}

#[test]
fn out_of_range_aborts_before_any_signal() {
    let mut mesh = MockMesh::with_heights(&[1.0, 2.0, 3.0]);
    let mut display = MockDisplay::default();

    let err = TouchVertex(5)
        .run(&mut ScriptContext {
            mesh: &mut mesh,
            control: &mut display,
        })
        .unwrap_err();

    assert_eq!(
        err,
        MeshError::OutOfRange {
            what: "vertex index",
            index: 5,
            len: 3,
        }
    );
    assert_eq!(display.recolours, 0);
    assert_eq!(display.redraws, 0);
}

#[test]
fn random_colours_cover_every_surface_slot() {
    let mut mesh = MockMesh::with_heights(&[0.0; 4]);
    let mut display = MockDisplay::default();

    RandomColours::new(ColourSlot::Surface, Some(7))
        .run(&mut ScriptContext {
            mesh: &mut mesh,
            control: &mut display,
        })
        .unwrap();

    for index in 0..4 {
        let (red, green, blue) = mesh.raw_colour(index, ColourSlot::Surface).unwrap();
        for channel in [red, green, blue] {
            assert!((0.0..1.0).contains(&channel));
        }
        assert_eq!(mesh.raw_colour(index, ColourSlot::Submerged), None);
    }
    assert_eq!(display.recolours, 1);
    assert_eq!(display.redraws, 1);
}

#[test]
fn seeded_random_colours_are_reproducible() {
    let mut first = MockMesh::with_heights(&[0.0; 3]);
    let mut second = MockMesh::with_heights(&[0.0; 3]);
    let mut display = MockDisplay::default();

    RandomColours::new(ColourSlot::Surface, Some(99))
        .run(&mut ScriptContext {
            mesh: &mut first,
            control: &mut display,
        })
        .unwrap();
    RandomColours::new(ColourSlot::Surface, Some(99))
        .run(&mut ScriptContext {
            mesh: &mut second,
            control: &mut display,
        })
        .unwrap();

    for index in 0..3 {
        assert_eq!(
            first.raw_colour(index, ColourSlot::Surface),
            second.raw_colour(index, ColourSlot::Surface)
        );
    }
}

#[test]
fn perturb_jitter_stays_within_amplitude() {
    let initial = [1.0f32, 2.0, 3.0];
    let mut mesh = MockMesh::with_heights(&initial);
    let mut display = MockDisplay::default();

    PerturbHeights::new(0.02, Some(42))
        .run(&mut ScriptContext {
            mesh: &mut mesh,
            control: &mut display,
        })
        .unwrap();

    for (index, original) in initial.iter().enumerate() {
        let moved = (mesh.vertex_height(index).unwrap() - original).abs();
        assert!(moved <= 0.01 + 1e-6);
    }
    assert_eq!(mesh.height_writes().len(), 3);
    assert_eq!(display.recolours, 1);
    assert_eq!(display.redraws, 1);
}

#[test]
fn altitude_bands_follow_normalised_height() {
    let mut mesh = MockMesh::with_heights(&[0.0, 0.005, 0.1, 0.9, 1.0]);
    let mut display = MockDisplay::default();

    ColourByAltitude::new(0.8)
        .run(&mut ScriptContext {
            mesh: &mut mesh,
            control: &mut display,
        })
        .unwrap();

    // Below the beachline
    assert_eq!(mesh.raw_colour(0, ColourSlot::Surface), Some(SHORELINE));
    assert_eq!(mesh.raw_colour(1, ColourSlot::Surface), Some(SHORELINE));

    // Blended at forty percent of the treeline
    let (red, green, blue) = mesh.raw_colour(2, ColourSlot::Surface).unwrap();
    assert!((red - 0.4).abs() < 1e-6);
    assert!((green - 0.8).abs() < 1e-6);
    assert!(blue.abs() < 1e-6);

    // Above the snow line
    assert_eq!(mesh.raw_colour(3, ColourSlot::Surface), Some(SNOW));
    assert_eq!(mesh.raw_colour(4, ColourSlot::Surface), Some(SNOW));

    // Every submerged slot gets the ocean colour
    for index in 0..5 {
        assert_eq!(mesh.raw_colour(index, ColourSlot::Submerged), Some(OCEAN));
    }
    assert_eq!(display.recolours, 1);
    assert_eq!(display.redraws, 1);
}

#[test]
fn builtin_names_are_unique() {
    for (index, (name, _)) in BUILTINS.iter().enumerate() {
        assert!(BUILTINS[index + 1..].iter().all(|(other, _)| other != name));
    }
}
