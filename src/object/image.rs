//! Raster images.
//!
//! Images are stored as 8-bit RGB samples. If an image has an alpha channel that
//! isn't fully opaque, the alpha values are written as a separate grayscale image
//! that the color image references as its soft mask.

use std::fmt;
use std::sync::Arc;

use crate::error::{QuireError, QuireResult};
use crate::object::dict::{Dictionary, Value};
use crate::object::{ObjectId, StreamKind, StreamObject};
use crate::serialize::SerializeContext;

struct Repr {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

/// A raster image.
///
/// This type is cheap to clone.
#[derive(Clone)]
pub struct Image(Arc<Repr>);

impl Image {
    /// Create an image from tightly packed RGB samples.
    pub fn from_rgb8(data: Vec<u8>, width: u32, height: u32) -> QuireResult<Self> {
        check_len(&data, width, height, 3)?;

        Ok(Self(Arc::new(Repr {
            width,
            height,
            rgb: data,
            alpha: None,
        })))
    }

    /// Create an image from tightly packed RGBA samples.
    pub fn from_rgba8(data: Vec<u8>, width: u32, height: u32) -> QuireResult<Self> {
        check_len(&data, width, height, 4)?;

        let mut rgb = Vec::with_capacity(data.len() / 4 * 3);
        let mut alpha = Vec::with_capacity(data.len() / 4);

        for pixel in data.chunks_exact(4) {
            rgb.extend_from_slice(&pixel[..3]);
            alpha.push(pixel[3]);
        }

        let alpha = if alpha.iter().all(|a| *a == 255) {
            None
        } else {
            Some(alpha)
        };

        Ok(Self(Arc::new(Repr {
            width,
            height,
            rgb,
            alpha,
        })))
    }

    /// Create an image from an image of the `image` crate.
    #[cfg(feature = "image_rs")]
    pub fn from_dynamic(image: &image::DynamicImage) -> QuireResult<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(rgba.into_raw(), width, height)
    }

    /// The width of the image.
    pub fn width(&self) -> u32 {
        self.0.width
    }

    /// The height of the image.
    pub fn height(&self) -> u32 {
        self.0.height
    }

    /// Whether the image needs a soft mask.
    pub fn has_alpha(&self) -> bool {
        self.0.alpha.is_some()
    }

    fn image_dictionary(&self, color_space: &str) -> Dictionary {
        Dictionary::new()
            .with("Type", Value::name("XObject"))
            .with("Subtype", Value::name("Image"))
            .with("Width", self.0.width as i32)
            .with("Height", self.0.height as i32)
            .with("ColorSpace", Value::name(color_space))
            .with("BitsPerComponent", 8)
    }

    /// Add the image to the document and return the identity of the image
    /// XObject. The soft mask, if any, is added first.
    pub(crate) fn register(&self, sc: &mut SerializeContext) -> ObjectId {
        let soft_mask = self.0.alpha.as_ref().map(|alpha| {
            let id = sc.new_id();
            sc.add_object(StreamObject::new(
                id,
                self.image_dictionary("DeviceGray"),
                alpha.clone(),
                StreamKind::Binary,
            ));
            id
        });

        let mut dict = self.image_dictionary("DeviceRGB");
        if let Some(soft_mask) = soft_mask {
            dict.insert("SMask", soft_mask);
        }

        let id = sc.new_id();
        sc.add_object(StreamObject::new(
            id,
            dict,
            self.0.rgb.clone(),
            StreamKind::Binary,
        ));

        id
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.0.width)
            .field("height", &self.0.height)
            .field("alpha", &self.has_alpha())
            .finish()
    }
}

fn check_len(data: &[u8], width: u32, height: u32, channels: usize) -> QuireResult<()> {
    if width == 0 || height == 0 {
        return Err(QuireError::InvalidImage(format!(
            "image has zero size ({width} x {height})"
        )));
    }

    let expected = width as usize * height as usize * channels;
    if data.len() != expected {
        return Err(QuireError::InvalidImage(format!(
            "expected {expected} bytes for a {width} x {height} image, got {}",
            data.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_utils::settings_1;

    #[test]
    fn length_mismatch() {
        assert!(matches!(
            Image::from_rgb8(vec![0; 5], 2, 1),
            Err(QuireError::InvalidImage(_))
        ));
        assert!(matches!(
            Image::from_rgba8(vec![], 0, 0),
            Err(QuireError::InvalidImage(_))
        ));
    }

    #[test]
    fn opaque_rgba_has_no_mask() {
        let image = Image::from_rgba8(vec![10, 20, 30, 255, 40, 50, 60, 255], 2, 1).unwrap();
        assert!(!image.has_alpha());

        let mut sc = SerializeContext::new(settings_1());
        image.register(&mut sc);
        assert_eq!(sc.object_count(), 1);
    }

    #[test]
    fn translucent_image_gets_soft_mask() {
        let image = Image::from_rgba8(vec![10, 20, 30, 128], 1, 1).unwrap();
        assert!(image.has_alpha());

        let mut sc = SerializeContext::new(settings_1());
        let id = image.register(&mut sc);
        assert_eq!(sc.object_count(), 2);

        let mask = sc.objects().next().unwrap();
        let mask_text = String::from_utf8(mask.to_bytes(&settings_1())).unwrap();
        assert!(mask_text.contains("/ColorSpace /DeviceGray"));

        let image = sc.objects().find(|o| o.id() == id).unwrap();
        let text = String::from_utf8(image.to_bytes(&settings_1())).unwrap();
        assert!(text.contains("/Subtype /Image"));
        assert!(text.contains("/ColorSpace /DeviceRGB"));
        assert!(text.contains(&format!("/SMask {}", mask.id())));
    }
}
