use glam::Vec3;

use crate::rgba::Rgba;

/// The colour new vertices start out with, in both slots.
const DEFAULT_COLOUR: Rgba = Rgba::from_rgb(0x99, 0x99, 0x99);

/// Selector for one of the two colour slots a vertex carries.
///
/// Every vertex stores two independent colours. The display decides per
/// frame which one a vertex shows: `Surface` when the vertex sits at or
/// above sea level, `Submerged` when it lies below. Keeping both lets a
/// single colouring pass paint dry land and the ocean floor at once, with
/// a sharp transition at the waterline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourSlot {
    /// The colour shown at or above sea level.
    Surface,
    /// The colour shown below sea level.
    Submerged,
}

impl ColourSlot {
    /// The slot's position in a vertex's colour array.
    pub const fn index(self) -> usize {
        match self {
            ColourSlot::Surface => 0,
            ColourSlot::Submerged => 1,
        }
    }
}

/// A single mesh vertex: a position, a shading normal and two colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    position: Vec3,
    normal: Vec3,
    colours: [Rgba; 2],
}

impl Vertex {
    /// Construct a new vertex at the given position.
    ///
    /// The normal starts at zero and is expected to be filled in by the
    /// mesh; both colour slots start at a neutral grey.
    pub fn new(position: Vec3) -> Self {
        Vertex {
            position,
            normal: Vec3::ZERO,
            colours: [DEFAULT_COLOUR; 2],
        }
    }

    /// Get the vertex position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Overwrite the vertex position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Get the shading normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Overwrite the shading normal.
    pub fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal;
    }

    /// Get the colour in the given slot.
    pub fn colour(&self, slot: ColourSlot) -> Rgba {
        self.colours[slot.index()]
    }

    /// Overwrite the colour in the given slot.
    pub fn set_colour(&mut self, slot: ColourSlot, colour: Rgba) {
        self.colours[slot.index()] = colour;
    }
}

#[test]
fn colour_slots_are_independent() {
    let mut vertex = Vertex::new(Vec3::ZERO);
    vertex.set_colour(ColourSlot::Surface, Rgba::from_rgb(0x10, 0x20, 0x30));
    vertex.set_colour(ColourSlot::Submerged, Rgba::from_rgb(0x40, 0x50, 0x60));
    assert_eq!(
        vertex.colour(ColourSlot::Surface),
        Rgba::from_rgb(0x10, 0x20, 0x30)
    );
    assert_eq!(
        vertex.colour(ColourSlot::Submerged),
        Rgba::from_rgb(0x40, 0x50, 0x60)
    );
}
