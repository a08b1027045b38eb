use std::fmt;

/// The default alpha channel value, if not specified. (0xFF = opaque)
const DEFAULT_ALPHA: u8 = 0xFF;

/// Struct representing a colour value.
///
/// This colour uses 4 channels, for red, green, blue and alpha.
/// Each channel may be a value from 0 to 255.
///
/// Internally, this struct stores the colour channels as a single u32
/// (DWORD) value, which is aligned to 4 bytes in memory. The byte order is
/// RGBA, little endian, so the raw pixel data of a raster can be handed to
/// an image encoder without any per-pixel shuffling.
#[repr(align(4))]
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Rgba {
    /// Defines the colour with a byte for each of the 4 colour channels.
    ///
    /// Bytes are ordered as RGBA, little endian.
    value: u32,
}

impl Rgba {
    /// Construct a new colour, from a raw colour value.
    ///
    /// This colour value defines the value of all 4 colour channels.
    pub const fn new(value: u32) -> Self {
        Rgba { value }
    }

    /// Construct a new colour, from RGB values.
    ///
    /// The alpha channel will be set to 0xFF.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba::from_rgba(r, g, b, DEFAULT_ALPHA)
    }

    /// Construct a new colour, from RGBA values.
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba::new(r as u32 | (g as u32) << 8 | (b as u32) << 16 | (a as u32) << 24)
    }

    /// Construct a new opaque colour from float channels.
    ///
    /// Inputs are not validated: each channel is scaled by 255 and cast
    /// with saturating semantics, so values above 1.0 saturate to 255,
    /// values below 0.0 saturate to 0, and NaN becomes 0. Any float triple
    /// is accepted.
    pub fn from_floats(r: f32, g: f32, b: f32) -> Self {
        Rgba::from_rgb(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
        )
    }

    /// Get the red value, in the range `[0, 255]`.
    pub const fn red(&self) -> u32 {
        self.value & 0xFF
    }

    /// Get the green value, in the range `[0, 255]`.
    pub const fn green(&self) -> u32 {
        (self.value & 0xFF00) >> 8
    }

    /// Get the blue value, in the range `[0, 255]`.
    pub const fn blue(&self) -> u32 {
        (self.value & 0xFF0000) >> 16
    }

    /// Get the alpha value, in the range `[0, 255]`.
    pub const fn alpha(&self) -> u32 {
        (self.value & 0xFF000000) >> 24
    }

    /// Get the hexadecimal value of the colour, without the alpha channel.
    pub fn hex(&self) -> String {
        format!("{:06X}", self.value.to_be() >> 8)
    }

    /// A black colour, with the default alpha.
    pub const fn black() -> Self {
        Rgba::from_rgb(0, 0, 0)
    }

    /// A white colour, with the default alpha.
    pub const fn white() -> Self {
        Rgba::from_rgb(0xFF, 0xFF, 0xFF)
    }

    /// Get the raw colour value, as single u32.
    pub const fn to_raw(&self) -> u32 {
        self.value
    }

    /// This colour with every RGB channel scaled by the given factor.
    ///
    /// Used for shading; the factor is clamped to `[0, 1]` and the alpha
    /// channel is left untouched.
    pub fn scaled(&self, factor: f32) -> Rgba {
        let factor = factor.clamp(0.0, 1.0);
        Rgba::from_rgba(
            (self.red() as f32 * factor) as u8,
            (self.green() as f32 * factor) as u8,
            (self.blue() as f32 * factor) as u8,
            self.alpha() as u8,
        )
    }
}

impl fmt::Debug for Rgba {
    /// Nicely format the colour in a human readable RGB(A) format.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Only debug the alpha channel if it isn't the default value
        if self.alpha() == DEFAULT_ALPHA as u32 {
            write!(
                f,
                "Rgb({:X}, {:X}, {:X})",
                self.red(),
                self.green(),
                self.blue()
            )
        } else {
            write!(
                f,
                "Rgba({:X}, {:X}, {:X}, {:X})",
                self.red(),
                self.green(),
                self.blue(),
                self.alpha()
            )
        }
    }
}

#[test]
fn from_floats() {
    macro_rules! test {
        ($r: expr, $g: expr, $b: expr, $print: literal) => {
            assert_eq!(format!("{:?}", Rgba::from_floats($r, $g, $b)), $print);
        };
    }

    test!(0.0, 0.0, 0.0, "Rgb(0, 0, 0)");
    test!(1.0, 0.5, 0.0, "Rgb(FF, 7F, 0)");
    // Out-of-domain channels saturate instead of failing
    test!(1.5, -0.25, 2.0, "Rgb(FF, 0, FF)");
    test!(f32::NAN, 0.0, 1e9, "Rgb(0, 0, FF)");
}

#[test]
fn raw_layout_is_rgba_little_endian() {
    let colour = Rgba::from_rgba(0xAB, 0xCD, 0xEF, 0xBA);
    assert_eq!(colour.to_raw().to_le_bytes(), [0xAB, 0xCD, 0xEF, 0xBA]);
    assert_eq!(colour.hex(), "ABCDEF");
}
