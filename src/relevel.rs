use crate::{
    errors::{Error, SizeMismatch},
    Image,
};
use image::{ImageBuffer, Pixel};

/// What to output where the local minimum and maximum are equal, ie. the
/// neighborhood is flat and there is no range to stretch into.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ZeroRange {
    /// Keep the input value
    Original,
    /// Write this value instead
    Fill(u8),
}

impl Default for ZeroRange {
    fn default() -> Self {
        Self::Original
    }
}

/// Maps `lo` to 0 and `hi` to 255.
///
/// The scaling has to happen in floating point; scaling by the integer
/// `255 / range` truncates and shows up as visible steps wherever the
/// cutoff changes along a gradient. Multiplying before dividing keeps every
/// exact result exact, and the final cast truncates toward zero.
#[inline]
fn stretch(value: u8, lo: u8, hi: u8, zero_range: ZeroRange) -> u8 {
    let range = hi.saturating_sub(lo);
    if range == 0 {
        return match zero_range {
            ZeroRange::Original => value,
            ZeroRange::Fill(fill) => fill,
        };
    }

    let zeroed = value.saturating_sub(lo);
    let scaled = f32::from(zeroed) * 255.0 / f32::from(range);

    // Interpolated bounds don't always contain the value
    scaled.min(255.0) as u8
}

pub(crate) fn relevel_into<P>(
    image: &Image<P>,
    lo: &Image<P>,
    hi: &Image<P>,
    zero_range: ZeroRange,
    output: &mut Image<P>,
) where
    P: Pixel<Subpixel = u8> + 'static,
{
    debug_assert_eq!(image.dimensions(), lo.dimensions());
    debug_assert_eq!(image.dimensions(), hi.dimensions());
    debug_assert_eq!(image.dimensions(), output.dimensions());

    for (out, ((value, lo), hi)) in output
        .iter_mut()
        .zip(image.iter().zip(lo.iter()).zip(hi.iter()))
    {
        *out = stretch(*value, *lo, *hi, zero_range);
    }
}

/// Stretches `image` between caller supplied bounds, every channel of every
/// pixel on its own. All three images must have the same dimensions.
pub fn relevel_pixels<P>(
    image: &Image<P>,
    lo: &Image<P>,
    hi: &Image<P>,
    zero_range: ZeroRange,
) -> Result<Image<P>, Error>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    for bound in &[lo, hi] {
        if bound.dimensions() != image.dimensions() {
            return Err(Error::SizeMismatch(SizeMismatch {
                expected: image.dimensions(),
                actual: bound.dimensions(),
            }));
        }
    }

    let (width, height) = image.dimensions();
    let mut output = ImageBuffer::new(width, height);
    relevel_into(image, lo, hi, zero_range, &mut output);
    Ok(output)
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn stretches_bounds_to_full_range() {
        assert_eq!(stretch(100, 100, 200, ZeroRange::Original), 0);
        assert_eq!(stretch(200, 100, 200, ZeroRange::Original), 255);
        assert_eq!(stretch(10, 10, 200, ZeroRange::Original), 0);
        assert_eq!(stretch(200, 10, 200, ZeroRange::Original), 255);
        assert_eq!(stretch(120, 100, 120, ZeroRange::Original), 255);
    }

    #[test]
    fn truncates_toward_zero() {
        // 1 * 255 / 2 = 127.5
        assert_eq!(stretch(1, 0, 2, ZeroRange::Original), 127);
        // 2 * 255 / 3 = 170
        assert_eq!(stretch(2, 0, 3, ZeroRange::Original), 170);
        // 1 * 255 / 3 = 85
        assert_eq!(stretch(1, 0, 3, ZeroRange::Original), 85);
    }

    #[test]
    fn clamps_values_outside_the_bounds() {
        assert_eq!(stretch(5, 10, 20, ZeroRange::Original), 0);
        assert_eq!(stretch(30, 10, 20, ZeroRange::Original), 255);
        // Inverted bounds have no range either
        assert_eq!(stretch(30, 20, 10, ZeroRange::Fill(3)), 3);
    }

    #[test]
    fn flat_neighborhoods_follow_policy() {
        assert_eq!(stretch(42, 42, 42, ZeroRange::Original), 42);
        assert_eq!(stretch(42, 42, 42, ZeroRange::Fill(0)), 0);
        assert_eq!(stretch(42, 40, 40, ZeroRange::Fill(255)), 255);
    }

    #[test]
    fn checks_bound_dimensions() {
        let img = GrayImage::new(4, 4);
        let lo = GrayImage::new(4, 4);
        let hi = GrayImage::new(4, 3);

        let err = relevel_pixels(&img, &lo, &hi, ZeroRange::Original)
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "expected an image of 4x4, but got 4x3"
        );
    }

    #[test]
    fn relevels_every_subpixel() {
        let img = GrayImage::from_raw(3, 1, vec![10, 15, 20]).unwrap();
        let lo = GrayImage::from_pixel(3, 1, Luma([10]));
        let hi = GrayImage::from_pixel(3, 1, Luma([20]));

        let out = relevel_pixels(&img, &lo, &hi, ZeroRange::Original).unwrap();
        assert_eq!(out.into_raw(), vec![0, 127, 255]);
    }
}
