//! PNM, also known as NetPBM, image support.
//!
//! PNM is a family of extremely simple image formats, each consisting of
//! a short textual header followed by either text or binary pixel data.
//! The renderer uses it as its texture and snapshot format.
//!
//! Type  | Magic | Pixel format        | Read | Write
//! ----- | ------| ------------------- | ---- | -----
//! PGM   | P2/P5 | 8 bpp grayscale     | yes  | no
//! PPM   | P3/P6 | 3x8 bpp RGB         | yes  | P6

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};
#[cfg(feature = "std")]
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use Error::*;

use crate::math::color::{Color3, rgb};
use crate::util::buf::Buf2;

/// The pixel encoding of a PNM image.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Format {
    /// Grayscale, text encoding.
    TextGray,
    /// RGB, text encoding.
    TextRgb,
    /// Grayscale, binary encoding, one byte per pixel.
    BinaryGray,
    /// RGB, binary encoding, three bytes per pixel.
    BinaryRgb,
}

/// The header of a PNM image.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Header {
    format: Format,
    width: u32,
    height: u32,
    max: u16,
}

/// Error during loading or decoding a PNM image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// An I/O error occurred.
    #[cfg(feature = "std")]
    Io(io::ErrorKind),
    /// Unsupported or invalid magic number.
    Unsupported([u8; 2]),
    /// Unexpected end of input while decoding.
    UnexpectedEnd,
    /// Invalid numeric value encountered.
    InvalidNumber,
    /// The image has zero width or height.
    Empty,
}

/// Result of loading or decoding a PNM image.
pub type Result<T> = core::result::Result<T, Error>;

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("error decoding pnm image: ")?;
        match self {
            #[cfg(feature = "std")]
            Io(kind) => write!(f, "{kind}"),
            Unsupported([a, b]) => write!(
                f,
                "unsupported format {:?}",
                [*a as char, *b as char]
            ),
            UnexpectedEnd => f.write_str("unexpected end of data"),
            InvalidNumber => f.write_str("invalid number"),
            Empty => f.write_str("zero-sized image"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "std")]
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Io(e.kind())
    }
}

/// A cursor over the bytes of an encoded image.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Returns the next raw byte.
    fn byte(&mut self) -> Result<u8> {
        let b = *self.bytes.get(self.pos).ok_or(UnexpectedEnd)?;
        self.pos += 1;
        Ok(b)
    }

    /// Skips whitespace and `#` comments.
    fn skip_blank(&mut self) {
        let mut in_comment = false;
        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b'#' => in_comment = true,
                b'\n' | b'\r' => in_comment = false,
                _ if in_comment || b.is_ascii_whitespace() => {}
                _ => return,
            }
            self.pos += 1;
        }
    }

    /// Parses a decimal number, skipping any preceding whitespace and
    /// comments.
    fn num(&mut self) -> Result<u32> {
        self.skip_blank();
        let start = self.pos;
        let mut n = 0u32;
        while let Some(d) = self.bytes.get(self.pos).filter(|b| b.is_ascii_digit())
        {
            n = n
                .checked_mul(10)
                .and_then(|n| n.checked_add((d - b'0') as u32))
                .ok_or(InvalidNumber)?;
            self.pos += 1;
        }
        match self.bytes.get(self.pos) {
            _ if self.pos == start && self.pos == self.bytes.len() => {
                Err(UnexpectedEnd)
            }
            _ if self.pos == start => Err(InvalidNumber),
            Some(b) if !b.is_ascii_whitespace() => Err(InvalidNumber),
            _ => Ok(n),
        }
    }
}

impl Header {
    /// Attempts to parse a PNM header, consuming the single whitespace
    /// byte that separates it from the pixel data.
    fn parse(r: &mut Reader) -> Result<Self> {
        let magic = [r.byte()?, r.byte()?];
        let format = match &magic {
            b"P2" => Format::TextGray,
            b"P3" => Format::TextRgb,
            b"P5" => Format::BinaryGray,
            b"P6" => Format::BinaryRgb,
            _ => return Err(Unsupported(magic)),
        };
        let width = r.num()?;
        let height = r.num()?;
        let max = r.num()?;
        if width == 0 || height == 0 {
            return Err(Empty);
        }
        let max = u16::try_from(max)
            .ok()
            .filter(|&m| m > 0)
            .ok_or(InvalidNumber)?;
        // Exactly one whitespace byte before binary data
        r.byte()?;
        Ok(Self { format, width, height, max })
    }
}

/// Attempts to decode a PNM image from a byte slice.
///
/// Grayscale images are expanded to RGB. Channel values are rescaled from
/// the header's maximum value to the full 0..=255 range.
///
/// # Errors
/// Returns [`pnm::Error`][Error] if the data is not a valid P2, P3, P5, or
/// P6 image, or if it has fewer pixels than the header declares.
pub fn read_pnm(bytes: &[u8]) -> Result<Buf2<Color3>> {
    let r = &mut Reader::new(bytes);
    let h = Header::parse(r)?;

    let scale = |c: u32| -> Result<u8> {
        if c > h.max as u32 {
            return Err(InvalidNumber);
        }
        Ok((c * 255 / h.max as u32) as u8)
    };
    let channel = |r: &mut Reader| -> Result<u8> {
        match h.format {
            Format::TextGray | Format::TextRgb => scale(r.num()?),
            // Wide binary formats store two bytes per channel, big-endian
            Format::BinaryGray | Format::BinaryRgb if h.max > 255 => {
                scale(u32::from_be_bytes([0, 0, r.byte()?, r.byte()?]))
            }
            Format::BinaryGray | Format::BinaryRgb => scale(r.byte()? as u32),
        }
    };

    // Grows as pixels are decoded; the header alone is not trusted
    let count = h.width as usize * h.height as usize;
    let mut data = Vec::new();
    for _ in 0..count {
        let col = match h.format {
            Format::TextGray | Format::BinaryGray => {
                let c = channel(r)?;
                rgb(c, c, c)
            }
            Format::TextRgb | Format::BinaryRgb => {
                rgb(channel(r)?, channel(r)?, channel(r)?)
            }
        };
        data.push(col);
    }
    Ok(Buf2::new_from((h.width, h.height), data))
}

/// Loads a PNM image from a file.
///
/// # Errors
/// Returns [`pnm::Error`][Error] in case of an I/O error or an invalid
/// image.
#[cfg(feature = "std")]
pub fn load_pnm(path: impl AsRef<Path>) -> Result<Buf2<Color3>> {
    let bytes = std::fs::read(path)?;
    read_pnm(&bytes)
}

/// Writes an image to `out` in PPM format, P6 sub-format
/// (binary 8-bits-per-channel RGB).
///
/// # Errors
/// Returns [`std::io::Error`] if an error occurs while writing.
#[cfg(feature = "std")]
pub fn write_ppm(mut out: impl Write, buf: &Buf2<Color3>) -> io::Result<()> {
    let (w, h) = buf.dims();
    writeln!(out, "P6 {w} {h} 255")?;
    buf.data()
        .iter()
        .try_for_each(|c| out.write_all(&c.0))
}

/// Writes an image to a file in PPM format, P6 sub-format.
///
/// Caution: This function overwrites the file if it already exists.
/// Use [`write_ppm`] for more control over file creation.
///
/// # Errors
/// Returns [`std::io::Error`] if an error occurs while writing.
#[cfg(feature = "std")]
pub fn save_ppm(path: impl AsRef<Path>, buf: &Buf2<Color3>) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_ppm(&mut out, buf)?;
    out.flush()
}
