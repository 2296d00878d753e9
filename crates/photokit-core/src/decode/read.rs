//! Format-sniffing decode with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation};
use crate::buffer::PixelBuffer;

/// Decode a JPEG or PNG file into an upright RGBA buffer.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized.
/// Returns `DecodeError::CorruptedFile` if the data cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let orientation = get_orientation(bytes);
    let img = read(bytes)?;
    log::debug!(
        "decoded {}x{} image, orientation {:?}",
        img.width(),
        img.height(),
        orientation
    );
    Ok(PixelBuffer::from_rgba_image(
        apply_orientation(img, orientation).into_rgba8(),
    ))
}

/// EXIF orientation of an encoded file; `Normal` when absent or unreadable.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map_or(Orientation::Normal, Orientation::from)
}

fn read(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    /// A 3x2 PNG whose top-left pixel is red and the rest blue.
    fn sample_png() -> Vec<u8> {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 255, 255]));
        img.put_pixel(0, 0, Rgba([255, 0, 0, 128]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let buf = decode_image(&sample_png()).unwrap();
        assert_eq!((buf.width(), buf.height()), (3, 2));
        assert_eq!(buf.get(0, 0).unwrap(), [255, 0, 0, 128]);
        assert_eq!(buf.get(2, 1).unwrap(), [0, 0, 255, 255]);
    }

    #[test]
    fn test_png_without_exif_is_normal() {
        assert_eq!(get_orientation(&sample_png()), Orientation::Normal);
        assert_eq!(get_orientation(&[]), Orientation::Normal);
    }

    #[test]
    fn test_decode_unknown_format() {
        assert_eq!(
            decode_image(&[0x00, 0x01, 0x02, 0x03]),
            Err(DecodeError::InvalidFormat)
        );
        assert_eq!(decode_image(&[]), Err(DecodeError::InvalidFormat));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = sample_png();
        let result = decode_image(&bytes[..20]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_apply_orientation_rotates() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(3, 2));
        let rotated = apply_orientation(img, Orientation::Rotate90CW);
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
    }
}
