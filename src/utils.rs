use crate::{Error, Image};
use image::{ImageBuffer, Pixel};
use std::marker::PhantomData;

/// A borrowed, row-major pixel buffer as handed over by an image loader.
///
/// Rows may be padded, so `stride` (in bytes) can exceed
/// `width * channels`. The padding of the final row may be omitted.
#[derive(Clone, Copy)]
pub struct RawImage<'a, P> {
    width: u32,
    height: u32,
    stride: usize,
    data: &'a [u8],
    pixel: PhantomData<P>,
}

impl<'a, P: Pixel<Subpixel = u8> + 'static> RawImage<'a, P> {
    pub fn new(width: u32, height: u32, stride: usize, data: &'a [u8]) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }

        let row_len = Self::row_len(width);
        if stride < row_len {
            return Err(Error::InvalidStride {
                stride,
                min: row_len,
            });
        }

        // Every row but the last is padded out to the full stride
        let required = stride
            .checked_mul(height as usize - 1)
            .and_then(|padded| padded.checked_add(row_len))
            .ok_or(Error::BufferTooSmall {
                len: data.len(),
                required: usize::MAX,
            })?;
        if data.len() < required {
            return Err(Error::BufferTooSmall {
                len: data.len(),
                required,
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
            pixel: PhantomData,
        })
    }

    /// A tightly packed buffer, ie. `stride == width * channels`
    pub fn packed(width: u32, height: u32, data: &'a [u8]) -> Result<Self, Error> {
        Self::new(width, height, Self::row_len(width), data)
    }

    #[inline]
    fn row_len(width: u32) -> usize {
        // Saturating is enough, no buffer can be that long
        (width as usize).saturating_mul(usize::from(P::CHANNEL_COUNT))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The pixels of row `y` without padding, or `None` past the last row
    pub fn row(&self, y: u32) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }

        // Validated in `new`, every row up to `height` is inside `data`
        let start = y as usize * self.stride;
        self.data.get(start..start + Self::row_len(self.width))
    }

    /// Copies the pixels into an owned image, dropping any row padding
    pub fn to_image(&self) -> Image<P> {
        let mut img: Image<P> = ImageBuffer::new(self.width, self.height);
        let row_len = Self::row_len(self.width);

        for (src, dst) in self
            .data
            .chunks(self.stride)
            .zip(img.chunks_exact_mut(row_len))
        {
            dst.copy_from_slice(&src[..row_len]);
        }

        img
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use image::Rgb;

    #[test]
    fn strips_row_padding() {
        // 2x2 RGB with 2 bytes of padding per row, last row unpadded
        #[rustfmt::skip]
        let data = [
            1, 2, 3, 4, 5, 6, 0xff, 0xff,
            7, 8, 9, 10, 11, 12,
        ];
        let raw = RawImage::<Rgb<u8>>::new(2, 2, 8, &data).unwrap();
        assert_eq!(raw.row(1), Some(&[7, 8, 9, 10, 11, 12][..]));

        let img = raw.to_image();
        assert_eq!(img.get_pixel(1, 0), &Rgb([4, 5, 6]));
        assert_eq!(img.get_pixel(0, 1), &Rgb([7, 8, 9]));
        assert_eq!(img.into_raw(), (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn rejects_short_strides() {
        let data = [0u8; 32];
        let err = RawImage::<Rgb<u8>>::new(3, 2, 8, &data).err().unwrap();
        assert!(matches!(err, Error::InvalidStride { stride: 8, min: 9 }));
    }

    #[test]
    fn rejects_short_buffers() {
        let data = [0u8; 16];
        let err = RawImage::<Rgb<u8>>::new(2, 3, 8, &data).err().unwrap();
        assert!(matches!(
            err,
            Error::BufferTooSmall {
                len: 16,
                required: 22
            }
        ));
    }

    #[test]
    fn rejects_strides_that_overflow() {
        let data = [0u8; 64];
        let err = RawImage::<Rgb<u8>>::new(2, 3, usize::MAX / 2 + 1, &data)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::BufferTooSmall {
                len: 64,
                required: usize::MAX
            }
        ));

        // A single row never multiplies the stride
        let raw = RawImage::<Rgb<u8>>::new(2, 1, usize::MAX, &data[..6]).unwrap();
        assert_eq!(raw.to_image().into_raw(), vec![0; 6]);
    }

    #[test]
    fn rows_past_the_end_are_none() {
        // Backing buffer is much longer than the image
        let data = [1u8; 60];
        let raw = RawImage::<Rgb<u8>>::new(2, 2, 6, &data).unwrap();

        assert_eq!(raw.row(1), Some(&data[6..12]));
        assert_eq!(raw.row(2), None);
        assert_eq!(raw.row(5), None);
        assert_eq!(raw.to_image().into_raw(), vec![1; 12]);
    }

    #[test]
    fn rejects_empty_buffers() {
        let err = RawImage::<Rgb<u8>>::packed(0, 3, &[]).err().unwrap();
        assert!(matches!(err, Error::EmptyImage));
    }
}
