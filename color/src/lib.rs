//! Maps the colors of an image onto a small target palette.
//!
//! The distinct colors of an image are collected with [`unique`], paired one
//! to one with palette colors by [`assign`] and painted back with
//! [`recolor`].

mod color;
mod distance;
mod hsl;
mod matcher;
mod nearest;
mod palette;
mod recolor;
mod set;

pub use crate::{
    color::{Color, ParseError, Sample},
    distance::{HueDistance, Metric, Weights},
    hsl::Hsl,
    matcher::{assign, ColorMap},
    nearest::Nearest,
    palette::Palette,
    recolor::recolor,
    set::{unique, ColorSet},
};
