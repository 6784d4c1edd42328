use crate::{
    errors::{self, Error},
    reduce::{downsample_max, downsample_min},
    relevel::{relevel_into, ZeroRange},
    Image, RawImage,
};
use image::{imageops::FilterType, ImageBuffer, Pixel};
use std::borrow::Cow;

/// Upper bound on the number of reductions, which is far more than any real
/// image needs but stops a runaway if something goes wrong.
pub const MAX_LEVELS: u32 = 50;

/// Levels finer than this are normally not kept; as the min/max gets very
/// local, releveling degenerates into an edge detector.
pub const DEFAULT_MIN_LEVEL: u32 = 4;

/// Heights below `2^MIN_LEVEL_HEIGHT_OFFSET` lower the min level so that
/// small images still expose some levels.
const MIN_LEVEL_HEIGHT_OFFSET: i64 = 4;

#[derive(Clone, Copy)]
struct Parameters {
    max_levels: u32,
    min_level: u32,
    filter: FilterType,
    zero_range: ZeroRange,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            max_levels: MAX_LEVELS,
            min_level: DEFAULT_MIN_LEVEL,
            filter: FilterType::Triangle,
            zero_range: ZeroRange::default(),
        }
    }
}

/// Builds a [`MinMaxPyramid`] by setting parameters, then calling `build`
/// once per image. The builder can be reused for every image that is loaded.
///
/// # Example
/// ```
/// use minmax_relevel::{image::RgbImage, PyramidBuilder, ZeroRange};
///
/// let builder = PyramidBuilder::new()
///     .min_level(2)
///     .zero_range(ZeroRange::Fill(0));
///
/// let img = RgbImage::from_pixel(64, 64, minmax_relevel::image::Rgb([40, 80, 120]));
/// let pyramid = builder.build(img).expect("failed to build pyramid");
/// assert_eq!(pyramid.min_scale(), 2);
/// ```
#[derive(Clone, Copy, Default)]
pub struct PyramidBuilder {
    params: Parameters,
}

impl PyramidBuilder {
    /// Creates a new `PyramidBuilder` with default parameters, can also be
    /// created via `MinMaxPyramid::builder()`
    pub fn new() -> Self {
        Self::default()
    }

    /// The maximum number of reductions performed. Range 1-50.
    ///
    /// Default: 50
    pub fn max_levels(mut self, count: u32) -> Self {
        self.params.max_levels = count;
        self
    }

    /// The finest level that is precomputed for normal sized images. Smaller
    /// images lower this automatically. Range 0-50.
    ///
    /// Default: 4
    pub fn min_level(mut self, level: u32) -> Self {
        self.params.min_level = level;
        self
    }

    /// The filter used to bring each reduced level back up to full size.
    /// Anything smoother than `Nearest` avoids hard edges in the output.
    ///
    /// Default: `Triangle` (linear interpolation)
    pub fn filter(mut self, filter: FilterType) -> Self {
        self.params.filter = filter;
        self
    }

    /// What `relevel` does where the local neighborhood is perfectly flat.
    ///
    /// Default: [`ZeroRange::Original`]
    pub fn zero_range(mut self, policy: ZeroRange) -> Self {
        self.params.zero_range = policy;
        self
    }

    /// Builds the pyramid for `image`. This is the expensive step, every
    /// retained level is stored at full resolution.
    pub fn build<P>(&self, image: Image<P>) -> Result<MinMaxPyramid<P>, Error>
    where
        P: Pixel<Subpixel = u8> + 'static,
    {
        self.check_parameters_validity()?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }

        let (mins, maxs) = reduce_levels(&image, self.params.max_levels);
        let max_layer = mins.len() as u32 - 1;
        let min_layer = min_layer_for_height(height, self.params.min_level).min(max_layer);

        log::debug!(
            "building min/max pyramid for {}x{} image: levels {}..={}",
            width,
            height,
            min_layer,
            max_layer
        );

        // The interpolation blurs the bounds so that the final stretch
        // doesn't have hard block edges
        let filter = self.params.filter;
        let (min_images, max_images): (Vec<_>, Vec<_>) = mins
            .iter()
            .zip(maxs.iter())
            .skip(min_layer as usize)
            .map(|(lo, hi)| {
                (
                    image::imageops::resize(lo, width, height, filter),
                    image::imageops::resize(hi, width, height, filter),
                )
            })
            .unzip();

        Ok(MinMaxPyramid {
            image,
            min_layer,
            max_layer,
            min_images,
            max_images,
            zero_range: self.params.zero_range,
        })
    }

    /// Copies a borrowed, possibly padded, buffer into an owned image and
    /// builds the pyramid for it.
    pub fn build_from_raw<P>(&self, raw: RawImage<'_, P>) -> Result<MinMaxPyramid<P>, Error>
    where
        P: Pixel<Subpixel = u8> + 'static,
    {
        self.build(raw.to_image())
    }

    fn check_parameters_validity(&self) -> Result<(), Error> {
        if self.params.max_levels == 0 || self.params.max_levels > MAX_LEVELS {
            return Err(Error::InvalidRange(errors::InvalidRange {
                min: 1,
                max: MAX_LEVELS,
                value: self.params.max_levels,
                name: "max-levels",
            }));
        }

        if self.params.min_level > MAX_LEVELS {
            return Err(Error::InvalidRange(errors::InvalidRange {
                min: 0,
                max: MAX_LEVELS,
                value: self.params.min_level,
                name: "min-level",
            }));
        }

        Ok(())
    }
}

/// Produces the reduced min and max sequences. Level 0 is the first
/// reduction of `image`; reduction stops once a level has collapsed to a
/// single pixel, which is the last level kept.
fn reduce_levels<P>(image: &Image<P>, max_levels: u32) -> (Vec<Image<P>>, Vec<Image<P>>)
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let mut mins = vec![downsample_min(image)];
    let mut maxs = vec![downsample_max(image)];

    while mins.len() < max_levels as usize {
        let (lo, hi) = match (mins.last(), maxs.last()) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => break,
        };

        if lo.width() < 2 && lo.height() < 2 {
            break;
        }

        let (lo, hi) = (downsample_min(lo), downsample_max(hi));
        log::trace!("level {}: {}x{}", mins.len(), lo.width(), lo.height());

        mins.push(lo);
        maxs.push(hi);
    }

    (mins, maxs)
}

/// `clamp(floor(log2(height)) - 4, 0, min_level)`
fn min_layer_for_height(height: u32, min_level: u32) -> u32 {
    // floor(log2(height)) for a non-zero height
    let log2 = i64::from(31 - height.max(1).leading_zeros());
    (log2 - MIN_LEVEL_HEIGHT_OFFSET).max(0).min(i64::from(min_level)) as u32
}

/// The full resolution bounds of one pyramid level
#[derive(Clone, Copy)]
pub struct Level<'a, P: Pixel<Subpixel = u8>> {
    /// The scale to pass to `relevel` for these bounds
    pub scale: u32,
    /// Local minimum of each channel, upsampled to the input size
    pub min: &'a Image<P>,
    /// Local maximum of each channel, upsampled to the input size
    pub max: &'a Image<P>,
}

/// Local contrast stretching over a multi-resolution min/max pyramid.
///
/// Construction reduces the image repeatedly with a 2x2 min and a 2x2 max,
/// then brings every retained level back up to the input size. `relevel`
/// then only has to do a single linear pass per call, which is cheap enough
/// to run on every tick of an interactive control.
///
/// The value is immutable; loading a new image means building a new pyramid.
///
/// # Example
/// ```
/// use minmax_relevel::{image::RgbImage, MinMaxPyramid};
///
/// let img = RgbImage::from_fn(32, 32, |x, y| {
///     minmax_relevel::image::Rgb([(x * 4) as u8, (y * 4) as u8, 128])
/// });
/// let pyramid = MinMaxPyramid::new(img).expect("failed to build pyramid");
///
/// for scale in pyramid.min_scale()..=pyramid.max_scale() {
///     let stretched = pyramid.relevel(scale);
///     assert_eq!(stretched.dimensions(), (32, 32));
/// }
/// ```
pub struct MinMaxPyramid<P: Pixel<Subpixel = u8> = image::Rgb<u8>> {
    image: Image<P>,
    min_layer: u32,
    max_layer: u32,
    // Indexed by `scale - min_layer`
    min_images: Vec<Image<P>>,
    max_images: Vec<Image<P>>,
    zero_range: ZeroRange,
}

impl MinMaxPyramid {
    /// Creates a new `PyramidBuilder` with default parameters
    pub fn builder() -> PyramidBuilder {
        PyramidBuilder::default()
    }
}

impl<P: Pixel<Subpixel = u8> + 'static> MinMaxPyramid<P> {
    /// Builds a pyramid with default parameters
    pub fn new(image: Image<P>) -> Result<Self, Error> {
        PyramidBuilder::default().build(image)
    }

    /// Smallest scale at which `relevel` will operate
    #[inline]
    pub fn min_scale(&self) -> u32 {
        self.min_layer
    }

    /// Largest scale at which `relevel` will operate. Out of range scales
    /// return the original image.
    #[inline]
    pub fn max_scale(&self) -> u32 {
        self.max_layer
    }

    /// The image the pyramid was built from
    #[inline]
    pub fn image(&self) -> &Image<P> {
        &self.image
    }

    pub fn into_image(self) -> Image<P> {
        self.image
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The precomputed bounds for `scale`, if that scale was retained
    pub fn level(&self, scale: u32) -> Option<Level<'_, P>> {
        if scale < self.min_layer || scale > self.max_layer {
            return None;
        }

        let i = (scale - self.min_layer) as usize;
        Some(Level {
            scale,
            min: &self.min_images[i],
            max: &self.max_images[i],
        })
    }

    /// Every retained level, from the most local to the most global
    pub fn levels(&self) -> impl Iterator<Item = Level<'_, P>> + '_ {
        (self.min_layer..=self.max_layer)
            .zip(self.min_images.iter().zip(self.max_images.iter()))
            .map(|(scale, (min, max))| Level { scale, min, max })
    }

    /// Stretches every channel of every pixel between the local minimum and
    /// maximum found at `scale`, so the darkest value nearby maps to 0 and
    /// the brightest to 255.
    ///
    /// Scales outside `min_scale()..=max_scale()` are not an error, they
    /// borrow the original image unchanged. Scales are unsigned, so slider
    /// style arithmetic such as `max_scale() - value` should go through
    /// `relevel_locality`, or use `checked_sub` and treat `None` as out of
    /// range.
    pub fn relevel(&self, scale: u32) -> Cow<'_, Image<P>> {
        match self.level(scale) {
            Some(level) => {
                let (width, height) = self.image.dimensions();
                let mut output = ImageBuffer::new(width, height);
                relevel_into(&self.image, level.min, level.max, self.zero_range, &mut output);
                Cow::Owned(output)
            }
            None => Cow::Borrowed(&self.image),
        }
    }

    /// The number of non-zero locality settings, one per retained level
    pub fn locality_steps(&self) -> u32 {
        self.max_layer - self.min_layer + 1
    }

    /// Maps a user facing locality, where 0 means "unchanged" and larger
    /// values stretch against ever smaller neighborhoods, onto a scale.
    ///
    /// Localities past `locality_steps()` clamp to `min_scale()`.
    pub fn scale_for_locality(&self, locality: u32) -> Option<u32> {
        if locality == 0 {
            return None;
        }

        let step = locality.min(self.locality_steps());
        Some(self.max_layer + 1 - step)
    }

    /// `relevel` driven by a locality, see `scale_for_locality`
    pub fn relevel_locality(&self, locality: u32) -> Cow<'_, Image<P>> {
        match self.scale_for_locality(locality) {
            Some(scale) => self.relevel(scale),
            None => Cow::Borrowed(&self.image),
        }
    }
}
