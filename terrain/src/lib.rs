pub mod error;
pub mod geometry;
pub mod mesh;
pub mod raster;
pub mod rgba;
pub mod vertex;

// Reexport types
pub use error::{MeshError, MeshResult};
pub use mesh::{Triangle, TriangleMesh};
pub use raster::Raster;
pub use rgba::Rgba;
pub use vertex::{ColourSlot, Vertex};
