//! Loading meshes from Wavefront OBJ files.
//!
//! Supported statements are `v` (vertex position), `vt` (texture
//! coordinate), and `f` (face). Faces may have any number of vertices,
//! and are split into triangle fans. Face vertices can be given in any of
//! the forms `v`, `v/vt`, `v/vt/vn`, or `v//vn`; indices are 1-based, and
//! negative indices count backwards from the last element read so far.
//!
//! Normals, groups, materials, and smoothing are ignored.
//!
//! OBJ uses a right-handed coordinate system with texture v pointing up,
//! while this crate uses left-handed coordinates with texture v pointing
//! down. When reading, the z coordinate and the texture v coordinate are
//! flipped, and the vertex order of each face is reversed to keep faces
//! pointing outwards. Counter-clockwise faces of a well-formed OBJ file
//! thus become clockwise ones.

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display, Formatter};
#[cfg(feature = "std")]
use std::{io, path::Path};

use re::geom::{Face, Mesh, Vertex, tri, vertex};
use re::math::{Vec3, vec3};
use re::render::Model;
use re::render::tex::{TexCoord, Texture, uv};

use ErrorKind::*;

/// Error reading an OBJ file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// An I/O error occurred.
    #[cfg(feature = "std")]
    Io(io::ErrorKind),
    /// Invalid content at the given 1-based line number.
    Parse { line: usize, kind: ErrorKind },
}

/// The kind of an OBJ parse error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A statement of an unknown type.
    UnknownStatement(String),
    /// A value is missing from a statement.
    MissingValue,
    /// A value could not be parsed as a number.
    InvalidNumber(String),
    /// An index refers to an element that does not exist.
    IndexOutOfBounds(isize),
    /// A face has fewer than three vertices.
    TooFewVertices,
}

/// Result of reading an OBJ file.
pub type Result<T> = core::result::Result<T, Error>;

/// Reads a mesh in OBJ format from `input`.
///
/// The mesh uses the fallback texture; use [`Mesh::with_texture`] to
/// replace it. Face vertices without a texture coordinate get (0, 0).
///
/// # Errors
/// Returns [`Error::Parse`] on the first line with invalid content.
pub fn read_obj(input: &str) -> Result<Mesh> {
    let mut parser = Parser::default();
    for (i, line) in input.lines().enumerate() {
        parser
            .line(line)
            .map_err(|kind| Error::Parse { line: i + 1, kind })?;
    }
    Ok(Mesh::new(parser.faces, Texture::fallback()))
}

/// Loads a mesh from an OBJ file.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read, and
/// [`Error::Parse`] if its content is invalid.
#[cfg(feature = "std")]
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh> {
    let input = std::fs::read_to_string(path)?;
    read_obj(&input)
}

#[derive(Default)]
struct Parser {
    positions: Vec<Vec3>,
    tex_coords: Vec<TexCoord>,
    faces: Vec<Face>,
}

type ParseResult<T> = core::result::Result<T, ErrorKind>;

impl Parser {
    fn line(&mut self, line: &str) -> ParseResult<()> {
        let line = line.split('#').next().unwrap_or_default();
        let mut tokens = line.split_whitespace();
        let Some(stmt) = tokens.next() else {
            return Ok(());
        };
        match stmt {
            "v" => {
                let [x, y, z] = floats(&mut tokens)?;
                self.positions.push(vec3(x, y, -z));
            }
            "vt" => {
                let [u, v] = floats(&mut tokens)?;
                self.tex_coords.push(uv(u, 1.0 - v));
            }
            "f" => self.face(tokens)?,
            "vn" | "vp" | "o" | "g" | "s" | "l" | "mtllib" | "usemtl" => {}
            other => return Err(UnknownStatement(other.into())),
        }
        Ok(())
    }

    fn face<'a>(
        &mut self,
        tokens: impl Iterator<Item = &'a str>,
    ) -> ParseResult<()> {
        let verts = tokens
            .map(|t| self.face_vertex(t))
            .collect::<ParseResult<Vec<_>>>()?;

        let [first, rest @ ..] = &verts[..] else {
            return Err(TooFewVertices);
        };
        if rest.len() < 2 {
            return Err(TooFewVertices);
        }
        for pair in rest.windows(2) {
            self.faces.push(tri(*first, pair[1], pair[0]));
        }
        Ok(())
    }

    fn face_vertex(&self, token: &str) -> ParseResult<Vertex<Vec3<Model>, TexCoord>> {
        let mut parts = token.split('/');
        let pos = parts.next().ok_or(MissingValue)?;
        let pos = resolve(&self.positions, pos)?;
        let tc = match parts.next() {
            None | Some("") => uv(0.0, 0.0),
            Some(tc) => resolve(&self.tex_coords, tc)?,
        };
        Ok(vertex(pos.to(), tc))
    }
}

fn floats<'a, const N: usize>(
    tokens: &mut impl Iterator<Item = &'a str>,
) -> ParseResult<[f32; N]> {
    let mut res = [0.0; N];
    for r in &mut res {
        let t = tokens.next().ok_or(MissingValue)?;
        *r = t.parse().map_err(|_| InvalidNumber(t.into()))?;
    }
    Ok(res)
}

fn resolve<T: Copy>(items: &[T], index: &str) -> ParseResult<T> {
    let i: isize = index.parse().map_err(|_| InvalidNumber(index.into()))?;
    let j = if i > 0 {
        i - 1
    } else if i < 0 {
        items.len() as isize + i
    } else {
        return Err(IndexOutOfBounds(0));
    };
    usize::try_from(j)
        .ok()
        .and_then(|j| items.get(j).copied())
        .ok_or(IndexOutOfBounds(i))
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("error reading obj: ")?;
        match self {
            #[cfg(feature = "std")]
            Error::Io(kind) => write!(f, "{kind}"),
            Error::Parse { line, kind } => write!(f, "line {line}: {kind}"),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UnknownStatement(s) => write!(f, "unknown statement {s:?}"),
            MissingValue => f.write_str("missing value"),
            InvalidNumber(s) => write!(f, "invalid number {s:?}"),
            IndexOutOfBounds(i) => write!(f, "index {i} out of bounds"),
            TooFewVertices => f.write_str("face has fewer than 3 vertices"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "std")]
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e.kind())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    const QUAD: &str = "
# A unit quad in the xy plane
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quad_is_split_into_fan() {
        let mesh = read_obj(QUAD).unwrap();
        assert_eq!(mesh.len(), 2);

        // Winding reversed
        let [a, b, c] = mesh.faces[0].0;
        assert_eq!(a.pos, vec3(0.0, 0.0, 0.0));
        assert_eq!(b.pos, vec3(1.0, 1.0, 0.0));
        assert_eq!(c.pos, vec3(1.0, 0.0, 0.0));

        let [d, e, f] = mesh.faces[1].0;
        assert_eq!(d.pos, a.pos);
        assert_eq!(e.pos, vec3(0.0, 1.0, 0.0));
        assert_eq!(f.pos, b.pos);
    }

    #[test]
    fn handedness_is_converted() {
        let mesh = read_obj(QUAD).unwrap();
        // Facing +z in the file, facing -z after flipping z
        assert_eq!(mesh.faces[0].normal(), Some(vec3(0.0, 0.0, -1.0)));
        // Texture v flipped
        let [a, b, c] = mesh.faces[0].0;
        assert_eq!(a.attrib, uv(0.0, 1.0));
        assert_eq!(b.attrib, uv(1.0, 0.0));
        assert_eq!(c.attrib, uv(1.0, 1.0));

        let mesh = read_obj("v 0 0 2\nv 1 0 2\nv 0 1 2\nf 1 2 3").unwrap();
        assert_eq!(mesh.faces[0].0[0].pos, vec3(0.0, 0.0, -2.0));
    }

    #[test]
    fn face_vertex_forms() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.5\n\
                     f 1 2/1 3//1\n\
                     f 1/1/1 2//1 3";
        let mesh = read_obj(input).unwrap();
        assert_eq!(mesh.len(), 2);
        let [a, b, c] = mesh.faces[0].0;
        assert_eq!(a.attrib, uv(0.0, 0.0));
        assert_eq!(b.attrib, uv(0.0, 0.0));
        assert_eq!(c.attrib, uv(0.5, 0.5));
    }

    #[test]
    fn negative_indices() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1";
        let mesh = read_obj(input).unwrap();
        assert_eq!(mesh.faces[0].0[1].pos, vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn comments_and_ignored_statements() {
        let input = "mtllib foo.mtl\no thing\ng group\ns off\n\
                     v 0 0 0 # origin\nv 1 0 0\nv 0 1 0\n\
                     usemtl bar\nf 1 2 3";
        assert_eq!(read_obj(input).unwrap().len(), 1);
    }

    #[test]
    fn errors_report_line() {
        let err = |s: &str| read_obj(s).unwrap_err();

        assert_eq!(
            err("v 0 0 0\nfoo 1 2"),
            Error::Parse {
                line: 2,
                kind: UnknownStatement("foo".into())
            }
        );
        assert_eq!(
            err("v 0 x 0"),
            Error::Parse { line: 1, kind: InvalidNumber("x".into()) }
        );
        assert_eq!(err("v 0 0"), Error::Parse { line: 1, kind: MissingValue });
        assert_eq!(
            err("v 0 0 0\nf 1 2 3"),
            Error::Parse { line: 2, kind: IndexOutOfBounds(2) }
        );
        assert_eq!(
            err("v 0 0 0\nf 1 1"),
            Error::Parse { line: 2, kind: TooFewVertices }
        );
        assert_eq!(
            err("v 0 0 0\nf 0 1 1"),
            Error::Parse { line: 2, kind: IndexOutOfBounds(0) }
        );
    }

    #[test]
    fn error_display() {
        let e = Error::Parse { line: 3, kind: MissingValue };
        assert_eq!(e.to_string(), "error reading obj: line 3: missing value");
    }

    #[cfg(feature = "std")]
    #[test]
    fn load_missing_file() {
        let res = load_obj("no/such/file.obj");
        assert_eq!(res.unwrap_err(), Error::Io(io::ErrorKind::NotFound));
    }
}
