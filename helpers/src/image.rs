use std::{error, fmt};

/// An 8-bit grayscale image.
pub struct Gray {
    pub data: Box<[u8]>,
    pub size: (u32, u32),
}

impl Gray {
    /// Decodes an 8-bit grayscale png.
    ///
    /// # Errors
    /// Returns an [error](DecodeError) if the bytes are not a valid png
    /// or the image has another pixel format.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        use png::{BitDepth, ColorType, Decoder};

        let decoder = Decoder::new(bytes);
        let mut reader = decoder.read_info()?;
        let mut data = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut data)?;
        if info.color_type != ColorType::Grayscale || info.bit_depth != BitDepth::Eight {
            return Err(DecodeError::Format {
                color: info.color_type,
                depth: info.bit_depth,
            });
        }

        data.truncate(info.buffer_size());
        Ok(Self {
            data: data.into_boxed_slice(),
            size: (info.width, info.height),
        })
    }

    /// Returns the intensity of the pixel at given column and row.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        let (width, height) = self.size;
        assert!(x < width && y < height, "pixel ({x}, {y}) is out of bounds");
        self.data[(x + y * width) as usize]
    }
}

#[derive(Debug)]
pub enum DecodeError {
    Png(png::DecodingError),
    Format {
        color: png::ColorType,
        depth: png::BitDepth,
    },
}

impl From<png::DecodingError> for DecodeError {
    fn from(v: png::DecodingError) -> Self {
        Self::Png(v)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png(err) => err.fmt(f),
            Self::Format { color, depth } => {
                write!(f, "expected 8-bit grayscale, got {color:?} {depth:?}")
            }
        }
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Png(err) => Some(err),
            Self::Format { .. } => None,
        }
    }
}
