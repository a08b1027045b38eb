use terrascript_terrain::{ColourSlot, MeshError, MeshResult, Rgba, TriangleMesh};

#[cfg(test)]
pub mod test;

/// The mesh-like object a mutation script runs against.
///
/// This is the mesh half of the script contract: a vertex count query plus
/// indexed access to per-vertex height and colour. Implementations own the
/// vertex storage; a script only holds the exclusive borrow inside a
/// [`ScriptContext`] for the duration of one run, which also keeps the
/// vertex count stable while it iterates.
///
/// Every indexed operation fails loudly with [`MeshError::OutOfRange`]
/// when the index is not in `0..vertex_count()`. Implementations must not
/// clamp a bad index or turn the access into a no-op; an out-of-range
/// index is a script logic error and has to surface immediately.
pub trait MeshScope {
    /// Get the current number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get a handle to the vertex at the given index.
    fn vertex(&mut self, index: usize) -> MeshResult<VertexHandle<'_>>;

    /// Get the height of the vertex at the given index.
    fn vertex_height(&self, index: usize) -> MeshResult<f32>;

    /// Set the height of the vertex at the given index.
    fn set_vertex_height(&mut self, index: usize, height: f32) -> MeshResult<()>;

    /// Write a colour into one slot of the vertex at the given index.
    ///
    /// This is the primitive behind [`VertexHandle::set_colour`]; scripts
    /// normally go through the handle. Channel values are not validated,
    /// each implementation decides how out-of-domain floats are stored.
    fn set_vertex_colour(
        &mut self,
        index: usize,
        slot: ColourSlot,
        red: f32,
        green: f32,
        blue: f32,
    ) -> MeshResult<()>;
}

/// A handle granting access to one vertex of a [`MeshScope`].
///
/// Constructing the handle performs the bounds check, so a handle always
/// points at a vertex that existed at construction time.
pub struct VertexHandle<'m> {
    mesh: &'m mut dyn MeshScope,
    index: usize,
}

impl<'m> VertexHandle<'m> {
    /// Construct a handle for the vertex at the given index.
    pub fn new(mesh: &'m mut dyn MeshScope, index: usize) -> MeshResult<Self> {
        // Check vertex bounds
        let len = mesh.vertex_count();
        if index >= len {
            return Err(MeshError::OutOfRange {
                what: "vertex index",
                index,
                len,
            });
        }

        Ok(VertexHandle { mesh, index })
    }

    /// The index of the vertex this handle points at.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the height of the vertex.
    pub fn height(&self) -> MeshResult<f32> {
        self.mesh.vertex_height(self.index)
    }

    /// Set the height of the vertex.
    pub fn set_height(&mut self, height: f32) -> MeshResult<()> {
        self.mesh.set_vertex_height(self.index, height)
    }

    /// Write a colour into the given slot of the vertex.
    ///
    /// The leading slot parameter selects which of the vertex's two
    /// colours is written; see [`ColourSlot`]. The channel values are
    /// passed through unvalidated.
    pub fn set_colour(
        &mut self,
        slot: ColourSlot,
        red: f32,
        green: f32,
        blue: f32,
    ) -> MeshResult<()> {
        self.mesh
            .set_vertex_colour(self.index, slot, red, green, blue)
    }
}

/// The display-control object a mutation script signals once it is done
/// mutating.
///
/// Both operations are fire-and-forget from the script's perspective and
/// have no failure mode; the host performs the actual recompute and
/// repaint work on its own terms. Scripts conventionally signal
/// `recolour` before `force_redraw`, but no ordering is enforced.
pub trait DisplayControl {
    /// Signal that derived visual state (colour slot choice, shading) must
    /// be recomputed from the current per-vertex colours.
    fn recolour(&mut self);

    /// Signal that the display must re-render.
    fn force_redraw(&mut self);
}

/// Everything one script invocation gets to touch, injected explicitly by
/// the host.
///
/// The exclusive borrows give exactly one script at a time access to
/// exactly one mesh and one display; running two scripts against the same
/// mesh concurrently is not representable through this type. A host that
/// wants concurrent scripts must serialize them per mesh instance itself.
pub struct ScriptContext<'a> {
    /// The mesh under mutation.
    pub mesh: &'a mut dyn MeshScope,

    /// The display showing the mesh.
    pub control: &'a mut dyn DisplayControl,
}

impl MeshScope for TriangleMesh {
    fn vertex_count(&self) -> usize {
        TriangleMesh::vertex_count(self)
    }

    fn vertex(&mut self, index: usize) -> MeshResult<VertexHandle<'_>> {
        VertexHandle::new(self, index)
    }

    fn vertex_height(&self, index: usize) -> MeshResult<f32> {
        TriangleMesh::vertex_height(self, index)
    }

    fn set_vertex_height(&mut self, index: usize, height: f32) -> MeshResult<()> {
        TriangleMesh::set_vertex_height(self, index, height)
    }

    fn set_vertex_colour(
        &mut self,
        index: usize,
        slot: ColourSlot,
        red: f32,
        green: f32,
        blue: f32,
    ) -> MeshResult<()> {
        // Channel floats saturate into the mesh's 8-bit colour storage
        TriangleMesh::set_vertex_colour(self, index, slot, Rgba::from_floats(red, green, blue))
    }
}
