//! Image descriptor handed to texture consumers.

/// Channel layout of pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    Luminance,
    #[default]
    Rgb,
    Rgba,
    Bgra,
}

impl PixelFormat {
    pub fn components(self) -> usize {
        match self {
            PixelFormat::Luminance => 1,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba | PixelFormat::Bgra => 4,
        }
    }
}

/// Storage type of a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    #[default]
    UnsignedByte,
}

impl DataType {
    pub fn size(self) -> usize {
        match self {
            DataType::UnsignedByte => 1,
        }
    }
}

/// Who is responsible for releasing the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocationMode {
    /// The image releases the data itself.
    #[default]
    UseNewDelete,
    /// The data belongs to the object that installed it.
    NoDelete,
}

/// Which screen edge row 0 of the data represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    BottomLeft,
    TopLeft,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::BottomLeft => "bottom-left",
            Origin::TopLeft => "top-left",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("pixel data holds {actual} bytes, {s}x{t}x{r} image needs {expected}")]
    SizeMismatch { s: u32, t: u32, r: u32, expected: usize, actual: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    s: u32,
    t: u32,
    r: u32,
    internal_format: PixelFormat,
    pixel_format: PixelFormat,
    data_type: DataType,
    allocation: AllocationMode,
    origin: Origin,
    data: Vec<u8>,
}

impl Image {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs new pixel data; the image is left untouched on error.
    #[allow(clippy::too_many_arguments)]
    pub fn set_image(
        &mut self,
        s: u32,
        t: u32,
        r: u32,
        internal_format: PixelFormat,
        pixel_format: PixelFormat,
        data_type: DataType,
        data: Vec<u8>,
        allocation: AllocationMode,
    ) -> Result<(), ImageError> {
        let expected =
            s as usize * t as usize * r as usize * pixel_format.components() * data_type.size();
        if data.len() != expected {
            return Err(ImageError::SizeMismatch { s, t, r, expected, actual: data.len() });
        }

        self.s = s;
        self.t = t;
        self.r = r;
        self.internal_format = internal_format;
        self.pixel_format = pixel_format;
        self.data_type = data_type;
        self.data = data;
        self.allocation = allocation;
        Ok(())
    }

    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    pub fn s(&self) -> u32 {
        self.s
    }

    pub fn t(&self) -> u32 {
        self.t
    }

    pub fn r(&self) -> u32 {
        self.r
    }

    pub fn internal_format(&self) -> PixelFormat {
        self.internal_format
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn allocation(&self) -> AllocationMode {
        self.allocation
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes in one row of pixels.
    pub fn row_size(&self) -> usize {
        self.s as usize * self.pixel_format.components() * self.data_type.size()
    }

    /// Row `index` in storage order, counted from the origin edge.
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        let row_size = self.row_size();
        let start = index.checked_mul(row_size)?;
        self.data.get(start..start.checked_add(row_size)?).filter(|row| !row.is_empty())
    }

    /// Rows ordered from the top edge of the picture down.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let rows = (self.t as usize).saturating_mul(self.r as usize);
        let origin = self.origin;
        (0..rows).map_while(move |i| {
            let index = match origin {
                Origin::TopLeft => i,
                Origin::BottomLeft => rows - 1 - i,
            };
            self.row(index)
        })
    }
}
