use std::collections::HashMap;

use glam::Vec3;

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Geometry, GeometryFlat, GeometrySpherical};
use crate::rgba::Rgba;
use crate::vertex::{ColourSlot, Vertex};

/// A triangle, referring to three mesh vertices by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    indices: [usize; 3],
}

impl Triangle {
    /// Construct a new triangle over the given vertex indices.
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Triangle { indices: [a, b, c] }
    }

    /// The three vertex indices, in winding order.
    pub const fn indices(&self) -> [usize; 3] {
        self.indices
    }
}

/// A struct representing a triangle mesh over a reference surface.
///
/// This struct holds the ordered vertex collection scripts enumerate and
/// mutate, plus the triangles connecting them. Vertex heights are not
/// stored; they are derived from vertex positions through the mesh's
/// [`Geometry`], so the same operations work on flat terrains and on
/// spherical planets.
///
/// Vertices are identified by index in `0..vertex_count()`. Every indexed
/// operation checks its bounds and fails loudly with
/// [`MeshError::OutOfRange`]; nothing is clamped or silently skipped, so an
/// indexing bug in a caller surfaces immediately instead of corrupting an
/// unrelated vertex.
pub struct TriangleMesh {
    /// The ordered vertices of the mesh.
    vertices: Vec<Vertex>,

    /// The triangles connecting the vertices.
    triangles: Vec<Triangle>,

    /// The reference surface heights are measured against.
    geometry: Box<dyn Geometry>,
}

impl TriangleMesh {
    /// Construct a flat grid terrain over the unit square.
    ///
    /// `width` and `height` are vertex counts along X and Y; passing 0 for
    /// either produces an empty mesh. Vertices start at height 0 with two
    /// triangles per grid cell.
    pub fn flat_grid(width: usize, height: usize) -> Self {
        let step = |count: usize| {
            if count > 1 {
                1.0 / (count - 1) as f32
            } else {
                0.0
            }
        };
        let (step_x, step_y) = (step(width), step(height));

        let mut vertices = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                vertices.push(Vertex::new(Vec3::new(
                    x as f32 * step_x,
                    y as f32 * step_y,
                    0.0,
                )));
            }
        }

        let mut triangles =
            Vec::with_capacity(width.saturating_sub(1) * height.saturating_sub(1) * 2);
        for y in 0..height.saturating_sub(1) {
            for x in 0..width.saturating_sub(1) {
                let i = y * width + x;
                triangles.push(Triangle::new(i, i + 1, i + width + 1));
                triangles.push(Triangle::new(i, i + width + 1, i + width));
            }
        }

        let mut mesh = TriangleMesh {
            vertices,
            triangles,
            geometry: Box::new(GeometryFlat),
        };
        mesh.compute_normals();
        mesh
    }

    /// Construct a planet mesh: a unit-sphere icosahedron subdivided the
    /// given number of times.
    ///
    /// Each subdivision splits every triangle into four, with the new edge
    /// midpoints pushed out onto the unit sphere, giving `2 + 10 * 4^n`
    /// vertices. All vertices start at height 0 (radius 1).
    pub fn subdivided_icosahedron(subdivisions: u32) -> Self {
        // The twelve icosahedron vertices, as cyclic golden-ratio rectangles
        let phi = (1.0 + 5f32.sqrt()) / 2.0;
        let corners = [
            (-1.0, phi, 0.0),
            (1.0, phi, 0.0),
            (-1.0, -phi, 0.0),
            (1.0, -phi, 0.0),
            (0.0, -1.0, phi),
            (0.0, 1.0, phi),
            (0.0, -1.0, -phi),
            (0.0, 1.0, -phi),
            (phi, 0.0, -1.0),
            (phi, 0.0, 1.0),
            (-phi, 0.0, -1.0),
            (-phi, 0.0, 1.0),
        ];
        let mut vertices: Vec<Vertex> = corners
            .iter()
            .map(|&(x, y, z)| Vertex::new(Vec3::new(x, y, z).normalize()))
            .collect();

        let mut triangles = vec![
            Triangle::new(0, 11, 5),
            Triangle::new(0, 5, 1),
            Triangle::new(0, 1, 7),
            Triangle::new(0, 7, 10),
            Triangle::new(0, 10, 11),
            Triangle::new(1, 5, 9),
            Triangle::new(5, 11, 4),
            Triangle::new(11, 10, 2),
            Triangle::new(10, 7, 6),
            Triangle::new(7, 1, 8),
            Triangle::new(3, 9, 4),
            Triangle::new(3, 4, 2),
            Triangle::new(3, 2, 6),
            Triangle::new(3, 6, 8),
            Triangle::new(3, 8, 9),
            Triangle::new(4, 9, 5),
            Triangle::new(2, 4, 11),
            Triangle::new(6, 2, 10),
            Triangle::new(8, 6, 7),
            Triangle::new(9, 8, 1),
        ];

        for _ in 0..subdivisions {
            // Shared edges must reuse the same midpoint vertex
            let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
            let mut midpoint = |a: usize, b: usize, vertices: &mut Vec<Vertex>| {
                let key = (a.min(b), a.max(b));
                *midpoints.entry(key).or_insert_with(|| {
                    let position = ((vertices[a].position() + vertices[b].position()) * 0.5)
                        .normalize();
                    vertices.push(Vertex::new(position));
                    vertices.len() - 1
                })
            };

            let mut subdivided = Vec::with_capacity(triangles.len() * 4);
            for triangle in &triangles {
                let [a, b, c] = triangle.indices();
                let ab = midpoint(a, b, &mut vertices);
                let bc = midpoint(b, c, &mut vertices);
                let ca = midpoint(c, a, &mut vertices);
                subdivided.push(Triangle::new(a, ab, ca));
                subdivided.push(Triangle::new(b, bc, ab));
                subdivided.push(Triangle::new(c, ca, bc));
                subdivided.push(Triangle::new(ab, bc, ca));
            }
            triangles = subdivided;
        }

        let mut mesh = TriangleMesh {
            vertices,
            triangles,
            geometry: Box::new(GeometrySpherical),
        };
        mesh.compute_normals();
        mesh
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the vertices of the mesh.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Get the triangles of the mesh.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Get the reference surface of the mesh.
    pub fn geometry(&self) -> &dyn Geometry {
        &*self.geometry
    }

    /// Get the vertex at the given index.
    pub fn vertex(&self, index: usize) -> MeshResult<&Vertex> {
        let index = self.check_vertex(index)?;
        Ok(&self.vertices[index])
    }

    /// Get mutable access to the vertex at the given index.
    pub fn vertex_mut(&mut self, index: usize) -> MeshResult<&mut Vertex> {
        let index = self.check_vertex(index)?;
        Ok(&mut self.vertices[index])
    }

    /// Get the height of the vertex at the given index, relative to the
    /// mesh's reference surface.
    pub fn vertex_height(&self, index: usize) -> MeshResult<f32> {
        let index = self.check_vertex(index)?;
        Ok(self.geometry.height(&self.vertices[index].position()))
    }

    /// Set the height of the vertex at the given index, displacing its
    /// position relative to the reference surface.
    pub fn set_vertex_height(&mut self, index: usize, height: f32) -> MeshResult<()> {
        let index = self.check_vertex(index)?;
        let mut position = self.vertices[index].position();
        self.geometry.set_height(&mut position, height);
        self.vertices[index].set_position(position);
        Ok(())
    }

    /// Get the colour of the vertex at the given index, in the given slot.
    pub fn vertex_colour(&self, index: usize, slot: ColourSlot) -> MeshResult<Rgba> {
        let index = self.check_vertex(index)?;
        Ok(self.vertices[index].colour(slot))
    }

    /// Set the colour of the vertex at the given index, in the given slot.
    pub fn set_vertex_colour(
        &mut self,
        index: usize,
        slot: ColourSlot,
        colour: Rgba,
    ) -> MeshResult<()> {
        let index = self.check_vertex(index)?;
        self.vertices[index].set_colour(slot, colour);
        Ok(())
    }

    /// Check that a vertex index is in bounds.
    fn check_vertex(&self, index: usize) -> MeshResult<usize> {
        // Check vertex bounds
        if index >= self.vertices.len() {
            return Err(MeshError::OutOfRange {
                what: "vertex index",
                index,
                len: self.vertices.len(),
            });
        }

        Ok(index)
    }

    /// Recompute all vertex normals from the current triangle geometry.
    ///
    /// Each vertex gets the normalised sum of the area-weighted normals of
    /// its incident triangles. Vertices without usable incident area fall
    /// back to the reference-surface normal.
    pub fn compute_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.set_normal(Vec3::ZERO);
        }

        for triangle in &self.triangles {
            let [a, b, c] = triangle.indices();
            let pa = self.vertices[a].position();
            let pb = self.vertices[b].position();
            let pc = self.vertices[c].position();
            let face = (pb - pa).cross(pc - pa);
            for corner in [a, b, c] {
                let sum = self.vertices[corner].normal() + face;
                self.vertices[corner].set_normal(sum);
            }
        }

        for vertex in &mut self.vertices {
            let normal = vertex.normal().normalize_or_zero();
            if normal == Vec3::ZERO {
                vertex.set_normal(self.geometry.normal(&vertex.position()));
            } else {
                vertex.set_normal(normal);
            }
        }
    }
}

#[test]
fn flat_grid_shape() {
    let mesh = TriangleMesh::flat_grid(4, 3);
    assert_eq!(mesh.vertex_count(), 12);
    assert_eq!(mesh.triangles().len(), 12);

    // A single row has vertices but nothing to triangulate
    let row = TriangleMesh::flat_grid(3, 1);
    assert_eq!(row.vertex_count(), 3);
    assert_eq!(row.triangles().len(), 0);

    let empty = TriangleMesh::flat_grid(0, 5);
    assert_eq!(empty.vertex_count(), 0);
    assert_eq!(empty.triangles().len(), 0);
}

#[test]
fn flat_height_write_then_read() {
    let mut mesh = TriangleMesh::flat_grid(3, 1);
    mesh.set_vertex_height(1, 2.5).unwrap();
    assert_eq!(mesh.vertex_height(1).unwrap(), 2.5);
    assert_eq!(mesh.vertex_height(0).unwrap(), 0.0);
    assert_eq!(mesh.vertex_height(2).unwrap(), 0.0);
}

#[test]
fn indexed_access_fails_loudly() {
    let mut mesh = TriangleMesh::flat_grid(3, 1);

    let err = mesh.vertex_height(5).unwrap_err();
    assert_eq!(
        err,
        MeshError::OutOfRange {
            what: "vertex index",
            index: 5,
            len: 3,
        }
    );
    assert_eq!(
        err.to_string(),
        "vertex index 5 out of range, valid range is 0..3"
    );

    assert!(mesh.vertex(3).is_err());
    assert!(mesh.vertex_mut(usize::MAX).is_err());
    assert!(mesh.set_vertex_height(3, 1.0).is_err());
    assert!(mesh
        .set_vertex_colour(4, ColourSlot::Surface, Rgba::white())
        .is_err());
    assert!(mesh.vertex_colour(3, ColourSlot::Submerged).is_err());
}

#[test]
fn icosahedron_subdivision_counts() {
    let base = TriangleMesh::subdivided_icosahedron(0);
    assert_eq!(base.vertex_count(), 12);
    assert_eq!(base.triangles().len(), 20);

    let once = TriangleMesh::subdivided_icosahedron(1);
    assert_eq!(once.vertex_count(), 42);
    assert_eq!(once.triangles().len(), 80);

    // Every vertex sits on the unit sphere, so every height is zero
    for index in 0..once.vertex_count() {
        assert!(once.vertex_height(index).unwrap().abs() < 1e-5);
    }
}

#[test]
fn spherical_height_write_then_read() {
    let mut mesh = TriangleMesh::subdivided_icosahedron(0);
    mesh.set_vertex_height(3, 0.25).unwrap();
    assert!((mesh.vertex_height(3).unwrap() - 0.25).abs() < 1e-5);
}

#[test]
fn flat_grid_normals_point_up() {
    let mesh = TriangleMesh::flat_grid(3, 3);
    for vertex in mesh.vertices() {
        let normal = vertex.normal();
        assert!(normal.x.abs() < 1e-6);
        assert!(normal.y.abs() < 1e-6);
        assert!((normal.z - 1.0).abs() < 1e-6);
    }
}

#[test]
fn normals_fall_back_to_the_reference_surface() {
    // A single row has no triangles, so no face can contribute area
    let mesh = TriangleMesh::flat_grid(3, 1);
    assert_eq!(mesh.triangles().len(), 0);
    for vertex in mesh.vertices() {
        assert_eq!(vertex.normal(), Vec3::Z);
    }
}
