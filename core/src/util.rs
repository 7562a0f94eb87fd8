//! Various utility types and functions.

pub mod buf;
pub mod pnm;

/// The width and height of a rectangular region such as a pixel buffer.
pub type Dims = (u32, u32);
