#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    RGB,
    RGBA,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::RGB => 3,
            PixelFormat::RGBA => 4,
        }
    }
}

/// Tightly packed pixel rows. Row 0 is the first row in memory; whether that
/// is the visual top or bottom is up to the producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTextureData {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
    pub format: PixelFormat,
}

impl RawTextureData {
    pub fn new_rgba(width: u32, height: u32) -> Self {
        let mut texture = RawTextureData {
            width: 0,
            height: 0,
            bytes: Vec::new(),
            format: PixelFormat::RGBA,
        };
        texture.reshape(width, height);
        texture
    }

    pub fn empty() -> Self {
        Self::new_rgba(0, 0)
    }

    pub fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Resize the backing store for new dimensions.
    ///
    /// Returns `true` when the dimensions changed. Existing contents are kept
    /// (and must be overwritten by the caller) when they did not.
    pub fn reshape(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        let len = self.stride() * height as usize;
        self.bytes.clear();
        self.bytes.resize(len, 0);
        true
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.bytes[start..start + stride]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.bytes[start..start + stride]
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Convert a decoded image to RGBA. Row 0 is the visual top row.
    pub fn from_image(image: &image::DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        RawTextureData {
            width: rgba.width(),
            height: rgba.height(),
            bytes: rgba.into_raw(),
            format: PixelFormat::RGBA,
        }
    }

    /// Reverse row order in place, switching between top-down and bottom-up.
    pub fn flip_rows(&mut self) {
        let stride = self.stride();
        let height = self.height as usize;
        for y in 0..height / 2 {
            let (upper, lower) = self.bytes.split_at_mut((height - 1 - y) * stride);
            upper[y * stride..(y + 1) * stride].swap_with_slice(&mut lower[..stride]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape_only_reallocates_on_change() {
        let mut texture = RawTextureData::new_rgba(4, 2);
        assert_eq!(texture.bytes.len(), 4 * 2 * 4);

        texture.bytes[0] = 42;
        assert!(!texture.reshape(4, 2));
        assert_eq!(texture.bytes[0], 42);

        assert!(texture.reshape(8, 8));
        assert_eq!(texture.bytes.len(), 8 * 8 * 4);
        assert_eq!(texture.bytes[0], 0);
    }

    #[test]
    fn test_rows_are_stride_sized() {
        let mut texture = RawTextureData::new_rgba(3, 2);
        texture.row_mut(1).fill(7);
        assert_eq!(texture.row(0), &[0u8; 12][..]);
        assert_eq!(texture.row(1), &[7u8; 12][..]);
    }

    #[test]
    fn test_flip_rows() {
        let mut texture = RawTextureData::new_rgba(1, 3);
        texture.bytes = vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3];
        texture.flip_rows();
        assert_eq!(texture.bytes, vec![3, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1]);
    }

    #[test]
    fn test_from_image_is_rgba() {
        let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            2,
            3,
            image::Rgb([10, 20, 30]),
        ));
        let texture = RawTextureData::from_image(&image);
        assert_eq!((texture.width, texture.height), (2, 3));
        assert_eq!(texture.format, PixelFormat::RGBA);
        assert_eq!(&texture.bytes[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_empty_texture() {
        let texture = RawTextureData::empty();
        assert!(texture.is_empty());
        assert!(texture.bytes.is_empty());
    }
}
