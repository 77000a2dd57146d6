//! Floating-point pixel buffer produced by a render.

use crate::Color;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA, clamping each channel to [0, 1] first.
pub fn color_to_rgba(color: Color, gamma: bool) -> [u8; 4] {
    let encode = |c: f32| {
        let c = if gamma { linear_to_gamma(c) } else { c };
        (255.0 * c.clamp(0.0, 1.0)).round() as u8
    };
    [encode(color.x), encode(color.y), encode(color.z), 255]
}

/// Row-major image of linear, unclamped colors. Row 0 is the top row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Copy a rectangular block of row-major pixels into place.
    pub fn blit(&mut self, x0: u32, y0: u32, width: u32, pixels: &[Color]) {
        for (row, chunk) in pixels.chunks(width as usize).enumerate() {
            let start = self.index(x0, y0 + row as u32);
            self.pixels[start..start + chunk.len()].copy_from_slice(chunk);
        }
    }

    /// Convert to RGBA bytes for an image encoder.
    pub fn to_rgba(&self, gamma: bool) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&color| color_to_rgba(color, gamma))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(2.0, -1.0, 0.5), false), [255, 0, 128, 255]);
        assert_eq!(color_to_rgba(Color::new(0.25, 0.0, 1.0), true), [128, 0, 255, 255]);
    }

    #[test]
    fn test_get_is_row_major() {
        let mut image = ImageBuffer::new(3, 2);
        image.blit(2, 1, 1, &[Color::ONE]);

        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.pixels[5], Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_blit_writes_only_the_block() {
        let mut image = ImageBuffer::new(4, 4);
        let block = vec![Color::ONE; 4];
        image.blit(1, 2, 2, &block);

        for y in 0..4 {
            for x in 0..4 {
                let inside = (1..3).contains(&x) && (2..4).contains(&y);
                assert_eq!(image.get(x, y) == Color::ONE, inside, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_to_rgba_length() {
        let image = ImageBuffer::new(5, 3);
        assert_eq!(image.to_rgba(false).len(), 5 * 3 * 4);
    }
}
