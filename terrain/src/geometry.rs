use glam::Vec3;

/// The reference surface a mesh is built over.
///
/// A vertex height is not stored directly; it is derived from the vertex
/// position relative to this surface, and writing a height displaces the
/// position. This keeps flat terrains and spherical planets behind one
/// interface.
pub trait Geometry {
    /// Height of the given point relative to the reference surface.
    fn height(&self, position: &Vec3) -> f32;

    /// Displace the given point so its height becomes `height`, preserving
    /// its location on the reference surface.
    fn set_height(&self, position: &mut Vec3, height: f32);

    /// Outward reference-surface normal at the given point, ignoring local
    /// relief.
    fn normal(&self, position: &Vec3) -> Vec3;
}

/// A flat reference surface: the XY plane, with height along Z.
pub struct GeometryFlat;

impl Geometry for GeometryFlat {
    fn height(&self, position: &Vec3) -> f32 {
        position.z
    }

    fn set_height(&self, position: &mut Vec3, height: f32) {
        position.z = height;
    }

    fn normal(&self, _position: &Vec3) -> Vec3 {
        Vec3::Z
    }
}

/// A spherical reference surface: the unit sphere around the origin, with
/// height measured radially.
///
/// Writing a height rescales the position along its own direction to
/// magnitude `1 + height`. Heights below -1 therefore fold through the
/// centre and read back folded; a point at the exact centre has no
/// direction of its own and is displaced along +Z.
pub struct GeometrySpherical;

impl Geometry for GeometrySpherical {
    fn height(&self, position: &Vec3) -> f32 {
        position.length() - 1.0
    }

    fn set_height(&self, position: &mut Vec3, height: f32) {
        let mut direction = position.normalize_or_zero();
        if direction == Vec3::ZERO {
            direction = Vec3::Z;
        }
        *position = direction * (1.0 + height);
    }

    fn normal(&self, position: &Vec3) -> Vec3 {
        let direction = position.normalize_or_zero();
        if direction == Vec3::ZERO {
            Vec3::Z
        } else {
            direction
        }
    }
}

#[test]
fn flat_height_roundtrip() {
    let geometry = GeometryFlat;
    let mut position = Vec3::new(0.25, 0.75, 0.0);
    geometry.set_height(&mut position, 1.5);
    assert_eq!(geometry.height(&position), 1.5);
    assert_eq!((position.x, position.y), (0.25, 0.75));
}

#[test]
fn spherical_height_roundtrip() {
    let geometry = GeometrySpherical;
    let mut position = Vec3::new(0.0, 3.0, 4.0).normalize();
    assert!(geometry.height(&position).abs() < 1e-6);

    geometry.set_height(&mut position, 0.25);
    assert!((geometry.height(&position) - 0.25).abs() < 1e-6);

    // A centre point gains a direction instead of staying stuck at zero
    let mut centre = Vec3::ZERO;
    geometry.set_height(&mut centre, 0.5);
    assert!((geometry.height(&centre) - 0.5).abs() < 1e-6);
}

#[test]
fn spherical_heights_below_minus_one_fold_through_the_centre() {
    let geometry = GeometrySpherical;
    let mut position = Vec3::new(1.0, 0.0, 0.0);
    geometry.set_height(&mut position, -1.5);

    // The point comes out the far side of the sphere and its height reads
    // back as the folded magnitude, not the written value
    assert!((position.x + 0.5).abs() < 1e-6);
    assert!((geometry.height(&position) + 0.5).abs() < 1e-6);
}
