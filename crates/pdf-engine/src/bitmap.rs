/// Bytes per pixel of a renderer bitmap (B, G, R, unused).
pub const SOURCE_BYTES_PER_PIXEL: usize = 4;

/// Bytes per pixel of the packed output (R, G, B).
pub const RGB_BYTES_PER_PIXEL: usize = 3;

/// A borrowed view of the bitmap a renderer produced.
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    pub width: u32,
    pub height: u32,
    /// Byte distance between the starts of consecutive rows.
    pub stride: usize,
    pub data: &'a [u8],
}

/// Result of a successful renderer run.
#[derive(Debug, Clone, Copy)]
pub struct RenderedPage<'a> {
    pub bitmap: Bitmap<'a>,
    pub page_count: u32,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BitmapError {
    #[error("stride {stride} is smaller than a {width}-pixel row")]
    StrideTooSmall { stride: usize, width: u32 },
    #[error("bitmap holds {actual} bytes but {expected} are needed")]
    Truncated { expected: usize, actual: usize },
}

impl Bitmap<'_> {
    fn row_bytes(&self) -> usize {
        self.width as usize * SOURCE_BYTES_PER_PIXEL
    }

    fn validate(&self) -> Result<(), BitmapError> {
        let row_bytes = self.row_bytes();
        if self.stride < row_bytes {
            return Err(BitmapError::StrideTooSmall { stride: self.stride, width: self.width });
        }

        if self.height == 0 || self.width == 0 {
            return Ok(());
        }

        // The last row does not need its padding.
        let expected = self.stride * (self.height as usize - 1) + row_bytes;
        if self.data.len() < expected {
            return Err(BitmapError::Truncated { expected, actual: self.data.len() });
        }

        Ok(())
    }
}

/// Repacks a B,G,R,x bitmap into tightly packed R,G,B rows.
///
/// The output holds exactly `width * height * 3` bytes; row padding and the
/// fourth source channel are dropped.
pub fn bgrx_to_rgb(bitmap: &Bitmap<'_>) -> Result<Vec<u8>, BitmapError> {
    bitmap.validate()?;

    let width = bitmap.width as usize;
    let height = bitmap.height as usize;
    let mut out = Vec::with_capacity(width * height * RGB_BYTES_PER_PIXEL);

    if width == 0 {
        return Ok(out);
    }

    let row_bytes = bitmap.row_bytes();
    for row in 0..height {
        let start = row * bitmap.stride;
        let src_line = &bitmap.data[start..start + row_bytes];
        for pixel in src_line.chunks_exact(SOURCE_BYTES_PER_PIXEL) {
            out.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
        }
    }

    Ok(out)
}
