// BEGIN - Embark standard lints v0.4
// do not change or add/remove here, but one can add exceptions after this section
// for more info see: <https://github.com/EmbarkStudios/rust-ecosystem/issues/59>
#![deny(unsafe_code)]
#![warn(
    clippy::all,
    clippy::await_holding_lock,
    clippy::char_lit_as_u8,
    clippy::checked_conversions,
    clippy::dbg_macro,
    clippy::debug_assert_with_mut_call,
    clippy::doc_markdown,
    clippy::empty_enum,
    clippy::enum_glob_use,
    clippy::exit,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_deref_methods,
    clippy::explicit_into_iter_loop,
    clippy::fallible_impl_from,
    clippy::filter_map_next,
    clippy::float_cmp_const,
    clippy::fn_params_excessive_bools,
    clippy::if_let_mutex,
    clippy::implicit_clone,
    clippy::imprecise_flops,
    clippy::inefficient_to_string,
    clippy::invalid_upcast_comparisons,
    clippy::large_types_passed_by_value,
    clippy::let_unit_value,
    clippy::linkedlist,
    clippy::lossy_float_literal,
    clippy::macro_use_imports,
    clippy::manual_ok_or,
    clippy::map_err_ignore,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::match_on_vec_items,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mem_forget,
    clippy::mismatched_target_os,
    clippy::mut_mut,
    clippy::mutex_integer,
    clippy::needless_borrow,
    clippy::needless_continue,
    clippy::option_option,
    clippy::path_buf_push_overwrite,
    clippy::ptr_as_ptr,
    clippy::ref_option_ref,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::same_functions_in_if_condition,
    clippy::semicolon_if_nothing_returned,
    clippy::string_add_assign,
    clippy::string_add,
    clippy::string_lit_as_bytes,
    clippy::string_to_string,
    clippy::todo,
    clippy::trait_duplication_in_bounds,
    clippy::unimplemented,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::useless_transmute,
    clippy::verbose_file_reads,
    clippy::zero_sized_map_values,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms
)]
// END - Embark standard lints v0.4

//! `minmax-relevel` performs local contrast stretching: every pixel is
//! rescaled between the darkest and brightest values found in a neighborhood
//! around it, rather than the darkest and brightest of the whole image.
//!
//! The neighborhoods come from a min/max pyramid. A [`MinMaxPyramid`] is
//! built once per image, which repeatedly halves the image with a 2x2 min and
//! a 2x2 max and then brings each retained level back up to full size. After
//! that, [`MinMaxPyramid::relevel`] is a single linear pass, cheap enough to
//! call on every movement of an interactive control.
//!
//! Higher scales come from coarser levels, so they stretch against larger
//! neighborhoods and produce a more global result. Lower scales are more
//! local and more aggressive.
//!
//! ## Usage
//!
//! ```
//! use minmax_relevel::{image::RgbImage, MinMaxPyramid};
//!
//! let img = RgbImage::from_fn(64, 48, |x, y| {
//!     minmax_relevel::image::Rgb([(x * 2) as u8, (y * 3) as u8, 100])
//! });
//!
//! // Build the pyramid once per loaded image
//! let pyramid = MinMaxPyramid::new(img).expect("failed to build pyramid");
//!
//! // Size a slider with the available scales, then relevel on every change
//! let stretched = pyramid.relevel(pyramid.max_scale());
//! assert_eq!(stretched.dimensions(), (64, 48));
//!
//! // Out of range scales hand back the original image
//! let original = pyramid.relevel(pyramid.max_scale() + 1);
//! assert_eq!(&*original, pyramid.image());
//! ```
mod errors;
mod img_pyramid;
pub mod reduce;
mod relevel;
mod utils;

pub use image;

pub use errors::Error;
pub use img_pyramid::{Level, MinMaxPyramid, PyramidBuilder, DEFAULT_MIN_LEVEL, MAX_LEVELS};
pub use reduce::{downsample_max, downsample_min};
pub use relevel::{relevel_pixels, ZeroRange};
pub use utils::RawImage;

/// The owned image type used throughout the crate, one `u8` per channel
pub type Image<P> = image::ImageBuffer<P, Vec<u8>>;
