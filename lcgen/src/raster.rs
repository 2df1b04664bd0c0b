use crate::{Error, Params, sequence};

/// Encodes the intensities as a `size × size` 8-bit grayscale png.
///
/// # Errors
/// Returns an [error](crate::Error) if the buffer length is not `size * size`
/// or the png codec fails.
pub fn encode(intensities: &[u8], size: u32) -> Result<Vec<u8>, Error> {
    use png::{BitDepth, ColorType, Encoder};

    let side = size as usize;
    let expected = side * side;
    if intensities.len() != expected {
        return Err(Error::BufferLength {
            expected,
            actual: intensities.len(),
        });
    }

    let mut data = vec![];
    let mut encoder = Encoder::new(&mut data, size, size);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(intensities)?;
    writer.finish()?;
    Ok(data)
}

/// Generates the intensities for given parameters and encodes them as png.
///
/// # Errors
/// Returns an [error](crate::Error) if the parameters are invalid
/// or the image couldn't be encoded.
pub fn render(params: &Params) -> Result<Vec<u8>, Error> {
    let side = params.side()?;
    let intensities = sequence::generate(params)?;
    let png = encode(&intensities, side)?;
    log::debug!(
        "rendered {side}x{side} image ({len} bytes) for {params:?}",
        len = png.len(),
    );

    Ok(png)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::ErrorKind, helpers::Gray};

    #[test]
    fn encode_small() {
        let png = encode(&[0, 64, 128, 255], 2).expect("encode");
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"), "png signature");

        let image = Gray::decode(&png).expect("decode");
        assert_eq!(image.size, (2, 2), "image size");
        assert_eq!(&*image.data, [0, 64, 128, 255], "pixels");
    }

    #[test]
    fn length_mismatch() {
        let err = encode(&[0, 1, 2], 2).expect_err("length error");
        assert_eq!(err.kind(), ErrorKind::Encoding, "error kind");
        assert!(
            matches!(
                err,
                Error::BufferLength {
                    expected: 4,
                    actual: 3
                }
            ),
            "unexpected error: {err}",
        );
    }

    #[test]
    fn render_rejects_zero_modulus() {
        let params = Params {
            a: 1,
            c: 1,
            m: 0,
            size: 4,
        };

        let err = render(&params).expect_err("modulus error");
        assert_eq!(err.kind(), ErrorKind::Arithmetic, "error kind");
    }
}
