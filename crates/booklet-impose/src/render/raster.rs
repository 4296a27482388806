//! Raster image decoding and Image XObjects

use crate::types::Result;
use lopdf::{Document, ObjectId, Stream, dictionary};

/// A decoded raster image, ready to embed
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// 8-bit RGB samples, row-major
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples; `None` when the image is fully opaque
    pub alpha: Option<Vec<u8>>,
}

impl RasterImage {
    /// Decode PNG or JPEG bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();

        let pixel_count = (width as usize) * (height as usize);
        let mut rgb = Vec::with_capacity(pixel_count * 3);
        let mut alpha = Vec::with_capacity(pixel_count);
        for pixel in img.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            alpha.push(pixel.0[3]);
        }

        let alpha = if alpha.iter().all(|&a| a == u8::MAX) {
            None
        } else {
            Some(alpha)
        };

        Ok(Self {
            width,
            height,
            rgb,
            alpha,
        })
    }

    /// Native size in points (one pixel per point)
    pub fn native_size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

/// Add an Image XObject (plus SMask for transparency) to the output.
///
/// The image occupies the unit square; callers scale it with `cm`.
pub fn create_image_xobject(output: &mut Document, image: &RasterImage) -> ObjectId {
    let smask_id = image.alpha.as_ref().map(|alpha| {
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha.clone(),
        );
        output.add_object(compressed(stream))
    });

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width as i64,
        "Height" => image.height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    if let Some(smask_id) = smask_id {
        dict.set("SMask", smask_id);
    }

    output.add_object(compressed(Stream::new(dict, image.rgb.clone())))
}

/// Flate-compress raw samples; an uncompressed stream is still valid
fn compressed(mut stream: Stream) -> Stream {
    if let Err(e) = stream.compress() {
        log::debug!("Keeping image stream uncompressed: {}", e);
    }
    stream
}
