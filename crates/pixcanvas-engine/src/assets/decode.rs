use std::io::Cursor;

use crate::atlas::IndexedImage;
use crate::palette::Color;

use super::AssetError;

/// An indexed PNG: raw palette indices plus the embedded color table.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: IndexedImage,
    /// PLTE entries (with tRNS alpha applied), index 0 first.
    pub colors: Vec<Color>,
}

/// Decodes an indexed-color PNG without expanding it to RGB.
///
/// Bit depths 1, 2, 4 and 8 are accepted; any other color type is
/// [`AssetError::NotIndexed`].
pub fn decode_indexed_png(bytes: &[u8]) -> Result<DecodedImage, AssetError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;

    if frame.color_type != png::ColorType::Indexed {
        return Err(AssetError::NotIndexed(frame.color_type));
    }

    let bits = frame.bit_depth as u8 as u32;
    let (width, height) = (frame.width, frame.height);
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for row in buf.chunks(frame.line_size).take(height as usize) {
        unpack_row(row, bits, width, &mut pixels);
    }

    let image = IndexedImage::from_pixels(width, height, pixels)
        .ok_or(AssetError::Malformed("pixel data shorter than image size"))?;

    let info = reader.info();
    let colors = match info.palette.as_deref() {
        Some(plte) => {
            let trns = info.trns.as_deref().unwrap_or(&[]);
            plte.chunks_exact(3)
                .enumerate()
                .map(|(i, rgb)| {
                    let a = trns.get(i).copied().unwrap_or(255);
                    Color::from_srgb_u8(rgb[0], rgb[1], rgb[2], a)
                })
                .collect()
        }
        None => Vec::new(),
    };

    Ok(DecodedImage { image, colors })
}

/// Expands one packed scanline (MSB-first for sub-byte depths).
fn unpack_row(row: &[u8], bits: u32, width: u32, out: &mut Vec<u8>) {
    if bits == 8 {
        out.extend_from_slice(&row[..width as usize]);
        return;
    }
    let per_byte = 8 / bits;
    let mask = (1u8 << bits) - 1;
    for x in 0..width {
        let byte = row[(x / per_byte) as usize];
        let shift = 8 - bits * (x % per_byte + 1);
        out.push((byte >> shift) & mask);
    }
}
