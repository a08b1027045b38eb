use terrascript_terrain::{ColourSlot, MeshError, MeshResult, TriangleMesh};

use super::*;

/// A minimal in-memory mesh scope for exercising the contract.
///
/// Heights live in a plain vector. Colour writes are journaled verbatim,
/// so tests can observe exactly the channel values a script handed over,
/// including out-of-domain floats; height writes are journaled by index to
/// make enumeration coverage observable.
pub(crate) struct MockMesh {
    heights: Vec<f32>,
    colours: Vec<[Option<(f32, f32, f32)>; 2]>,
    height_writes: Vec<usize>,
}

impl MockMesh {
    pub(crate) fn with_heights(heights: &[f32]) -> Self {
        MockMesh {
            heights: heights.to_vec(),
            colours: vec![[None; 2]; heights.len()],
            height_writes: Vec::new(),
        }
    }

    /// The raw channel triple last written to a slot, if any.
    pub(crate) fn raw_colour(&self, index: usize, slot: ColourSlot) -> Option<(f32, f32, f32)> {
        self.colours[index][slot.index()]
    }

    /// Indices passed to `set_vertex_height`, in write order.
    pub(crate) fn height_writes(&self) -> &[usize] {
        &self.height_writes
    }

    fn check(&self, index: usize) -> MeshResult<usize> {
        if index >= self.heights.len() {
            return Err(MeshError::OutOfRange {
                what: "vertex index",
                index,
                len: self.heights.len(),
            });
        }
        Ok(index)
    }
}

impl MeshScope for MockMesh {
    fn vertex_count(&self) -> usize {
        self.heights.len()
    }

    fn vertex(&mut self, index: usize) -> MeshResult<VertexHandle<'_>> {
        VertexHandle::new(self, index)
    }

    fn vertex_height(&self, index: usize) -> MeshResult<f32> {
        let index = self.check(index)?;
        Ok(self.heights[index])
    }

    fn set_vertex_height(&mut self, index: usize, height: f32) -> MeshResult<()> {
        let index = self.check(index)?;
        self.heights[index] = height;
        self.height_writes.push(index);
        Ok(())
    }

    fn set_vertex_colour(
        &mut self,
        index: usize,
        slot: ColourSlot,
        red: f32,
        green: f32,
        blue: f32,
    ) -> MeshResult<()> {
        let index = self.check(index)?;
        self.colours[index][slot.index()] = Some((red, green, blue));
        Ok(())
    }
}

/// A display that only counts the signals it receives.
#[derive(Default)]
pub(crate) struct MockDisplay {
    pub(crate) recolours: usize,
    pub(crate) redraws: usize,
}

impl DisplayControl for MockDisplay {
    fn recolour(&mut self) {
        self.recolours += 1;
    }

    fn force_redraw(&mut self) {
        self.redraws += 1;
    }
}

#[test]
fn height_write_then_read() {
    let mut mock = MockMesh::with_heights(&[0.0, 0.0, 0.0]);
    for index in 0..mock.vertex_count() {
        mock.set_vertex_height(index, index as f32 + 0.5).unwrap();
        assert_eq!(mock.vertex_height(index).unwrap(), index as f32 + 0.5);
    }

    // Same property through the reference mesh binding
    let mut mesh = TriangleMesh::flat_grid(3, 1);
    let scope: &mut dyn MeshScope = &mut mesh;
    scope.set_vertex_height(2, 7.25).unwrap();
    assert_eq!(scope.vertex_height(2).unwrap(), 7.25);
}

#[test]
fn out_of_range_fails_every_indexed_operation() {
    let mut mock = MockMesh::with_heights(&[1.0, 2.0, 3.0]);
    for index in [3, 5, usize::MAX] {
        assert!(mock.vertex(index).is_err());
        assert!(mock.vertex_height(index).is_err());
        assert!(mock.set_vertex_height(index, 0.0).is_err());
        assert!(mock
            .set_vertex_colour(index, ColourSlot::Surface, 0.0, 0.0, 0.0)
            .is_err());
    }
    assert!(mock.height_writes().is_empty());

    // Index 5 on a 3-vertex mesh, through the reference binding
    let mut mesh = TriangleMesh::flat_grid(3, 1);
    let scope: &mut dyn MeshScope = &mut mesh;
    let err = scope.vertex_height(5).unwrap_err();
    assert_eq!(
        err,
        MeshError::OutOfRange {
            what: "vertex index",
            index: 5,
            len: 3,
        }
    );
    assert!(scope.vertex(3).is_err());
    assert!(scope.set_vertex_height(3, 1.0).is_err());
}

#[test]
fn enumeration_touches_every_vertex_exactly_once() {
    let mut mock = MockMesh::with_heights(&[0.0; 5]);
    for index in 0..mock.vertex_count() {
        let height = mock.vertex_height(index).unwrap();
        mock.set_vertex_height(index, height + 1.0).unwrap();
    }

    assert_eq!(mock.height_writes().len(), 5);
    let mut writes = mock.height_writes().to_vec();
    writes.sort_unstable();
    assert_eq!(writes, vec![0, 1, 2, 3, 4]);
}

#[test]
fn colour_channels_are_not_validated() {
    let mut mock = MockMesh::with_heights(&[0.0, 0.0]);
    mock.vertex(1)
        .unwrap()
        .set_colour(ColourSlot::Surface, 1.5, -0.25, 42.0)
        .unwrap();
    assert_eq!(
        mock.raw_colour(1, ColourSlot::Surface),
        Some((1.5, -0.25, 42.0))
    );
    assert_eq!(mock.raw_colour(1, ColourSlot::Submerged), None);
    assert_eq!(mock.raw_colour(0, ColourSlot::Surface), None);

    // The reference mesh accepts the same triple and saturates per channel
    let mut mesh = TriangleMesh::flat_grid(2, 1);
    {
        let scope: &mut dyn MeshScope = &mut mesh;
        scope
            .vertex(1)
            .unwrap()
            .set_colour(ColourSlot::Surface, 1.5, -0.25, 42.0)
            .unwrap();
    }
    let stored = mesh.vertex_colour(1, ColourSlot::Surface).unwrap();
    assert_eq!(
        (stored.red(), stored.green(), stored.blue()),
        (0xFF, 0x00, 0xFF)
    );
}

#[test]
fn handle_points_at_its_vertex() {
    let mut mock = MockMesh::with_heights(&[1.0, 2.0, 3.0]);
    let mut handle = mock.vertex(1).unwrap();
    assert_eq!(handle.index(), 1);
    assert_eq!(handle.height().unwrap(), 2.0);
    handle.set_height(2.5).unwrap();

    assert_eq!(mock.vertex_height(1).unwrap(), 2.5);
    assert_eq!(mock.vertex_height(0).unwrap(), 1.0);
    assert_eq!(mock.vertex_height(2).unwrap(), 3.0);
}
