use std::fmt;

/// File extensions the upload widget accepts, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "gif", "webp"];

/// Advertised upload size limit. Exceeding it only logs a warning; the
/// original demos never enforced their "10MB" note either.
pub const SOFT_SIZE_LIMIT: u64 = 10 * 1024 * 1024;

/// Errors surfaced to the hosting layer for bad uploads.
#[derive(Debug)]
pub enum InputError {
    /// The file name has no extension or one outside the allow-list.
    UnsupportedExtension { name: String },

    /// The pixel buffer contains no pixels.
    EmptyImage,

    /// The pixel buffer length does not match `width * height`.
    DimensionMismatch { expected: usize, got: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedExtension { name } => {
                write!(
                    f,
                    "unsupported file '{name}': expected one of {}",
                    ALLOWED_EXTENSIONS.join(", ")
                )
            }
            Self::EmptyImage => write!(f, "image has no pixels"),
            Self::DimensionMismatch { expected, got } => {
                write!(f, "pixel buffer length {got} does not match dimensions ({expected})")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Checks an upload by file name and size.
///
/// Validation is by extension only; the demos never sniff content.
///
/// # Arguments
/// * `name` - The uploaded file name.
/// * `size` - The upload size in bytes.
///
/// # Errors
/// Returns `InputError::UnsupportedExtension` if the extension is missing
/// or not in [`ALLOWED_EXTENSIONS`]. An oversized upload is only warned
/// about, never rejected.
pub fn validate_upload(name: &str, size: u64) -> Result<(), InputError> {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => {
            return Err(InputError::UnsupportedExtension {
                name: name.to_string(),
            })
        }
    }

    if size > SOFT_SIZE_LIMIT {
        log::warn!("upload '{name}' is {size} bytes, above the advertised 10MB limit");
    }

    Ok(())
}

/// A raw grayscale image as the hosting layer hands it to the core.
///
/// Decoding file formats is the hosting layer's job; the core only sees
/// one byte per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// Creates a new `GrayImage`.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels.
    /// * `height` - Image height in pixels.
    /// * `pixels` - Row-major pixel bytes, one per pixel.
    ///
    /// # Errors
    /// Returns `InputError::EmptyImage` for zero dimensions and
    /// `InputError::DimensionMismatch` if the buffer length is not
    /// `width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, InputError> {
        if width == 0 || height == 0 || pixels.is_empty() {
            return Err(InputError::EmptyImage);
        }
        if pixels.len() != width * height {
            return Err(InputError::DimensionMismatch {
                expected: width * height,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Resizes to `side` x `side` by nearest neighbor, flattens row-major
    /// and normalizes each pixel to `[0, 1]`.
    ///
    /// This mirrors the grayscale-resize-flatten-normalize transform the
    /// training demo applies before predicting.
    ///
    /// # Arguments
    /// * `side` - Target edge length in pixels (48 for the demo model).
    pub fn to_features(&self, side: usize) -> Vec<f64> {
        let mut features = Vec::with_capacity(side * side);
        for ty in 0..side {
            let sy = ty * self.height / side;
            for tx in 0..side {
                let sx = tx * self.width / side;
                let pixel = self.pixels[sy * self.width + sx];
                features.push(f64::from(pixel) / 255.0);
            }
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_extensions() {
        for name in ["a.jpg", "b.JPEG", "c.png", "d.bmp", "e.gif", "f.webp"] {
            assert!(validate_upload(name, 1024).is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn rejects_unknown_or_missing_extension() {
        for name in ["a.tiff", "archive.zip", "noext", "trailingdot."] {
            assert!(validate_upload(name, 1024).is_err(), "accepted {name}");
        }
    }

    #[test]
    fn oversized_upload_is_not_rejected() {
        assert!(validate_upload("big.png", SOFT_SIZE_LIMIT + 1).is_ok());
    }

    #[test]
    fn image_validation() {
        assert!(GrayImage::new(2, 2, vec![0, 1, 2, 3]).is_ok());
        assert!(matches!(
            GrayImage::new(0, 2, vec![]),
            Err(InputError::EmptyImage)
        ));
        assert!(matches!(
            GrayImage::new(2, 2, vec![0, 1, 2]),
            Err(InputError::DimensionMismatch { expected: 4, got: 3 })
        ));
    }

    #[test]
    fn identity_resize_normalizes() {
        let image = GrayImage::new(2, 2, vec![0, 255, 51, 102]).unwrap();
        let features = image.to_features(2);
        assert_eq!(features, vec![0.0, 1.0, 0.2, 0.4]);
    }

    #[test]
    fn downscale_picks_nearest_pixels() {
        // 4x4 image with distinct quadrant values.
        #[rustfmt::skip]
        let pixels = vec![
            10, 10, 20, 20,
            10, 10, 20, 20,
            30, 30, 40, 40,
            30, 30, 40, 40,
        ];
        let image = GrayImage::new(4, 4, pixels).unwrap();
        let features = image.to_features(2);
        assert_eq!(
            features,
            vec![10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0, 40.0 / 255.0]
        );
    }

    #[test]
    fn upscale_repeats_pixels() {
        let image = GrayImage::new(1, 1, vec![255]).unwrap();
        let features = image.to_features(3);
        assert_eq!(features, vec![1.0; 9]);
    }
}
