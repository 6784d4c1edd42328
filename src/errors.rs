use std::fmt;

#[derive(Debug)]
pub struct InvalidRange {
    pub(crate) min: u32,
    pub(crate) max: u32,
    pub(crate) value: u32,
    pub(crate) name: &'static str,
}

impl fmt::Display for InvalidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parameter '{}' - value '{}' is outside the range of {}-{}",
            self.name, self.value, self.min, self.max
        )
    }
}

#[derive(Debug)]
pub struct SizeMismatch {
    pub(crate) expected: (u32, u32),
    pub(crate) actual: (u32, u32),
}

impl fmt::Display for SizeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected an image of {}x{}, but got {}x{}",
            self.expected.0, self.expected.1, self.actual.0, self.actual.1
        )
    }
}

#[derive(Debug)]
pub enum Error {
    /// The input image has a zero width or height
    EmptyImage,
    /// A raw buffer's row stride is shorter than one row of pixels
    InvalidStride { stride: usize, min: usize },
    /// A raw buffer is too short to hold every row it claims to have
    BufferTooSmall { len: usize, required: usize },
    /// Images that are processed together must all have the same dimensions
    SizeMismatch(SizeMismatch),
    /// A builder parameter had an invalid range specified
    InvalidRange(InvalidRange),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImage => write!(f, "the input image has no pixels"),
            Self::InvalidStride { stride, min } => write!(
                f,
                "row stride of {} bytes is shorter than a row of {} bytes",
                stride, min
            ),
            Self::BufferTooSmall { len, required } => write!(
                f,
                "buffer holds {} bytes, but at least {} are required",
                len, required
            ),
            Self::SizeMismatch(sm) => write!(f, "{}", sm),
            Self::InvalidRange(ir) => write!(f, "{}", ir),
        }
    }
}
