use crate::Image;
use image::{ImageBuffer, Pixel};

/// Binary operation used to merge the channel values of a 2x2 block.
///
/// Implementations **must** be associative and commutative, ie.
/// `combine(combine(a, b), combine(c, d)) == combine(combine(a, c), combine(b, d))`
/// for any `a`, `b`, `c`, `d`. The block is folded in a fixed order, so an
/// operator that breaks this contract produces unspecified (though
/// deterministic) output.
pub trait Combine {
    fn combine(a: u8, b: u8) -> u8;
}

/// Keeps the darkest value of a block
#[derive(Copy, Clone, Debug)]
pub struct Min;

impl Combine for Min {
    #[inline]
    fn combine(a: u8, b: u8) -> u8 {
        a.min(b)
    }
}

/// Keeps the brightest value of a block
#[derive(Copy, Clone, Debug)]
pub struct Max;

impl Combine for Max {
    #[inline]
    fn combine(a: u8, b: u8) -> u8 {
        a.max(b)
    }
}

/// Halves an image in both dimensions by folding each 2x2 block of pixels
/// with `C`, every channel on its own.
///
/// The output is `ceil(width / 2) x ceil(height / 2)`. When a dimension is
/// odd, the last output column (or row) is built only from the pixels that
/// exist in the input, and the bottom-right pixel of an image that is odd in
/// both dimensions is copied through unchanged.
pub fn downsample<C, P>(input: &Image<P>) -> Image<P>
where
    C: Combine,
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = input.dimensions();
    let mut output = ImageBuffer::new((width + 1) / 2, (height + 1) / 2);

    let merge = |a: &P, b: &P| a.map2(b, C::combine);

    for (x, y, out) in output.enumerate_pixels_mut() {
        let (sx, sy) = (x * 2, y * 2);
        let has_right = sx + 1 < width;
        let has_below = sy + 1 < height;

        let mut left = *input.get_pixel(sx, sy);
        if has_below {
            left = merge(&left, input.get_pixel(sx, sy + 1));
        }

        if has_right {
            let mut right = *input.get_pixel(sx + 1, sy);
            if has_below {
                right = merge(&right, input.get_pixel(sx + 1, sy + 1));
            }
            left = merge(&left, &right);
        }

        *out = left;
    }

    output
}

/// [`downsample`] keeping the darkest value of each block
///
/// ```
/// use minmax_relevel::{downsample_min, image::{Rgb, RgbImage}};
///
/// let img = RgbImage::from_raw(2, 1, vec![1, 20, 3, 10, 2, 30]).unwrap();
/// assert_eq!(downsample_min(&img).get_pixel(0, 0), &Rgb([1, 2, 3]));
/// ```
#[inline]
pub fn downsample_min<P: Pixel<Subpixel = u8> + 'static>(input: &Image<P>) -> Image<P> {
    downsample::<Min, P>(input)
}

/// [`downsample`] keeping the brightest value of each block
///
/// ```
/// use minmax_relevel::{downsample_max, image::{Rgb, RgbImage}};
///
/// let img = RgbImage::from_raw(2, 1, vec![1, 20, 3, 10, 2, 30]).unwrap();
/// assert_eq!(downsample_max(&img).get_pixel(0, 0), &Rgb([10, 20, 30]));
/// ```
#[inline]
pub fn downsample_max<P: Pixel<Subpixel = u8> + 'static>(input: &Image<P>) -> Image<P> {
    downsample::<Max, P>(input)
}
