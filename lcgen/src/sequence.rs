use {
    crate::{Error, MAX_SIZE},
    std::iter::FusedIterator,
};

/// Parameters of a generated image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// The multiplier.
    pub a: i64,

    /// The increment.
    pub c: i64,

    /// The modulus.
    pub m: i64,

    /// The side length of the square image in pixels.
    pub size: i64,
}

impl Params {
    /// Validates the parameters and returns the side length.
    ///
    /// # Errors
    /// Returns an [error](crate::Error) if the size is not in `1..=MAX_SIZE`
    /// or the modulus is zero.
    pub fn side(&self) -> Result<u32, Error> {
        let size = self.size;
        if size > i64::from(MAX_SIZE) {
            return Err(Error::SizeTooLarge { size });
        }

        let size = u32::try_from(size)
            .ok()
            .filter(|&size| size > 0)
            .ok_or(Error::SizeNotPositive { size })?;

        if self.m == 0 {
            return Err(Error::ZeroModulus);
        }

        Ok(size)
    }
}

/// The linear congruential recurrence `x ← (a * x + c) mod m`.
///
/// The state starts at [seed](Lcg::SEED) and the iterator yields every next
/// state infinitely. The modulo is floored, so each state has the sign of `m`
/// and `x / m` is always in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct Lcg {
    a: i64,
    c: i64,
    m: i64,
    x: i64,
}

impl Lcg {
    pub const SEED: i64 = 1;

    /// Creates a new generator.
    ///
    /// # Errors
    /// Returns [`ZeroModulus`](crate::Error::ZeroModulus) if `m` is zero.
    pub fn new(a: i64, c: i64, m: i64) -> Result<Self, Error> {
        if m == 0 {
            return Err(Error::ZeroModulus);
        }

        Ok(Self {
            a,
            c,
            m,
            x: Self::SEED,
        })
    }

    /// Returns the current state.
    pub fn state(&self) -> i64 {
        self.x
    }

    /// Normalizes a state to the `[0, 1)` range.
    pub fn ratio(&self, x: i64) -> f64 {
        x as f64 / self.m as f64
    }

    /// Maps a state to a grayscale intensity `floor(x / m * 255)`.
    ///
    /// The value is computed exactly in integers and then clamped.
    pub fn intensity(&self, x: i64) -> u8 {
        let v = i128::from(x) * 255 / i128::from(self.m);
        match u8::try_from(v) {
            Ok(v) => v,
            Err(_) if v < 0 => 0,
            Err(_) => u8::MAX,
        }
    }
}

impl Iterator for Lcg {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        let v = i128::from(self.a) * i128::from(self.x) + i128::from(self.c);
        self.x = floor_mod(v, self.m);
        Some(self.x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl FusedIterator for Lcg {}

fn floor_mod(v: i128, m: i64) -> i64 {
    let m = i128::from(m);
    let r = v.rem_euclid(m);
    let r = if m < 0 && r != 0 { r + m } else { r };

    // |r| < |m| so it always fits
    i64::try_from(r).unwrap_or_default()
}

/// A finite lazy sequence of intensities in row-major order.
#[derive(Clone, Debug)]
pub struct Intensities {
    lcg: Lcg,
    left: usize,
}

impl Iterator for Intensities {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.left == 0 {
            return None;
        }

        self.left -= 1;
        let x = self.lcg.next()?;
        Some(self.lcg.intensity(x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.left, Some(self.left))
    }
}

impl ExactSizeIterator for Intensities {}

impl FusedIterator for Intensities {}

/// Creates a lazy sequence of `size * size` intensities.
///
/// # Errors
/// Returns an [error](crate::Error) if the parameters are invalid.
pub fn intensities(params: &Params) -> Result<Intensities, Error> {
    let side = params.side()? as usize;
    let lcg = Lcg::new(params.a, params.c, params.m)?;
    Ok(Intensities {
        lcg,
        left: side * side,
    })
}

/// Generates `size * size` intensities in row-major order.
///
/// # Errors
/// Returns an [error](crate::Error) if the parameters are invalid.
pub fn generate(params: &Params) -> Result<Vec<u8>, Error> {
    Ok(intensities(params)?.collect())
}
