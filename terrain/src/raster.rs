use crate::error::{MeshError, MeshResult};
use crate::rgba::Rgba;

/// A struct representing a raster framebuffer.
///
/// This struct holds one raw colour value per pixel, where each pixel
/// consists of 4 bytes in a single u32 for each colour channel. The mesh
/// display draws into it and hands its bytes to an image encoder for
/// snapshots.
///
/// The execution model of this crate is single-threaded and synchronous,
/// so the map is a plain `Vec<u32>` without any locking or atomics.
pub struct Raster {
    /// A map with a raw colour value for each pixel in the map.
    map: Vec<u32>,

    /// Raster dimensions, width and height
    dimensions: (usize, usize),
}

impl Raster {
    const DEFAULT_PIXEL: u32 = Rgba::black().to_raw();

    /// Construct a new raster with the given dimensions, filled with black.
    pub fn new(width: usize, height: usize) -> Self {
        Raster {
            map: vec![Self::DEFAULT_PIXEL; width * height],
            dimensions: (width, height),
        }
    }

    /// Get the width of the raster.
    pub fn width(&self) -> usize {
        self.dimensions.0
    }

    /// Get the height of the raster.
    pub fn height(&self) -> usize {
        self.dimensions.1
    }

    /// Get the dimensions of the raster.
    pub fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    /// Get the pixel at the given coordinate, as colour.
    pub fn pixel(&self, x: usize, y: usize) -> MeshResult<Rgba> {
        let index = self.pixel_index(x, y)?;
        Ok(Rgba::new(self.map[index]))
    }

    /// Set the pixel at the given coordinate, to the given colour.
    pub fn set_pixel(&mut self, x: usize, y: usize, colour: Rgba) -> MeshResult<()> {
        let index = self.pixel_index(x, y)?;
        self.map[index] = colour.to_raw();
        Ok(())
    }

    /// Fill the whole raster with the given colour.
    pub fn clear(&mut self, colour: Rgba) {
        self.map.fill(colour.to_raw());
    }

    /// Get the index a pixel is at, for the given coordinate.
    fn pixel_index(&self, x: usize, y: usize) -> MeshResult<usize> {
        // Check pixel bounds
        if x >= self.dimensions.0 {
            return Err(MeshError::OutOfRange {
                what: "raster column",
                index: x,
                len: self.dimensions.0,
            });
        } else if y >= self.dimensions.1 {
            return Err(MeshError::OutOfRange {
                what: "raster row",
                index: y,
                len: self.dimensions.1,
            });
        }

        // Determine the index and return
        Ok(y * self.dimensions.0 + x)
    }

    /// Get the raster data as a sequence of bytes, 4 per pixel in RGBA
    /// order, rows top to bottom.
    ///
    /// This data may be handed to an image encoder as a raw RGBA8 buffer.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.map.len() * 4);
        for raw in &self.map {
            bytes.extend_from_slice(&raw.to_le_bytes());
        }
        bytes
    }
}

#[test]
fn pixel_roundtrip_and_bounds() {
    let mut raster = Raster::new(4, 2);
    let colour = Rgba::from_rgb(0x12, 0x34, 0x56);
    raster.set_pixel(3, 1, colour).unwrap();
    assert_eq!(raster.pixel(3, 1).unwrap(), colour);

    let err = raster.set_pixel(4, 0, colour).unwrap_err();
    assert_eq!(
        err.to_string(),
        "raster column 4 out of range, valid range is 0..4"
    );
    assert!(raster.pixel(0, 2).is_err());
}

#[test]
fn rgba_bytes_are_rgba_ordered() {
    let mut raster = Raster::new(2, 1);
    raster
        .set_pixel(0, 0, Rgba::from_rgba(0xAB, 0xCD, 0xEF, 0xFF))
        .unwrap();
    let bytes = raster.to_rgba_bytes();
    assert_eq!(bytes.len(), 8);
    assert_eq!(&bytes[..4], &[0xAB, 0xCD, 0xEF, 0xFF]);
}
