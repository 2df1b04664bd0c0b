use {
    crate::MAX_SIZE,
    std::{error, fmt},
};

/// An error returned from generation, encoding and analysis.
#[derive(Debug)]
pub enum Error {
    /// The side length exceeds `MAX_SIZE`.
    SizeTooLarge { size: i64 },

    /// The side length is zero or negative, so no image can be built.
    SizeNotPositive { size: i64 },

    /// The modulus is zero, so the recurrence is undefined.
    ZeroModulus,

    /// The intensity buffer doesn't match the image dimensions.
    BufferLength { expected: usize, actual: usize },

    /// The png codec failed.
    Png(png::EncodingError),
}

impl Error {
    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SizeTooLarge { .. } => ErrorKind::InvalidParameter,
            Self::ZeroModulus => ErrorKind::Arithmetic,
            Self::SizeNotPositive { .. } | Self::BufferLength { .. } | Self::Png(_) => {
                ErrorKind::Encoding
            }
        }
    }
}

impl From<png::EncodingError> for Error {
    fn from(v: png::EncodingError) -> Self {
        Self::Png(v)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeTooLarge { size } => write!(f, "size too large: {size}, max {MAX_SIZE}"),
            Self::SizeNotPositive { size } => write!(f, "size must be positive, got {size}"),
            Self::ZeroModulus => write!(f, "modulus must be non zero"),
            Self::BufferLength { expected, actual } => {
                write!(f, "buffer length {actual} doesn't match image size {expected}")
            }
            Self::Png(err) => write!(f, "png encoding failed: {err}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Png(err) => Some(err),
            _ => None,
        }
    }
}

/// The category of an [error](crate::Error).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A parameter is out of its valid range.
    InvalidParameter,

    /// The arithmetic of the generator is undefined for given parameters.
    Arithmetic,

    /// The image couldn't be encoded.
    Encoding,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidParameter => "invalid parameter",
            Self::Arithmetic => "arithmetic error",
            Self::Encoding => "encoding error",
        };

        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let large = Error::SizeTooLarge { size: 2000 };
        assert_eq!(large.kind(), ErrorKind::InvalidParameter, "large size kind");

        let negative = Error::SizeNotPositive { size: -2 };
        assert_eq!(negative.kind(), ErrorKind::Encoding, "negative size kind");
        assert_eq!(Error::ZeroModulus.kind(), ErrorKind::Arithmetic, "modulus error kind");

        let len = Error::BufferLength {
            expected: 4,
            actual: 3,
        };

        assert_eq!(len.kind(), ErrorKind::Encoding, "length error kind");
    }

    #[test]
    fn messages() {
        let large = Error::SizeTooLarge { size: 2000 };
        assert_eq!(large.to_string(), "size too large: 2000, max 1024", "large size");

        let zero = Error::SizeNotPositive { size: 0 };
        assert_eq!(zero.to_string(), "size must be positive, got 0", "zero size");
    }
}
