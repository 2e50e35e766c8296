/// Closed set of shapes a canvas can draw.
///
/// The discriminant is the `kind` field of a [`Param`](super::Param) and is
/// matched on by the shader.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    Box = 0,
    Line = 1,
    Triangle = 2,
    Glyph = 3,
    Picture = 4,
}

/// Vertex assembly used for a shape's template.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    TriangleStrip,
    LineList,
    TriangleList,
}

impl ShapeKind {
    /// Vertices per instance.
    #[inline]
    pub const fn vertex_count(self) -> u32 {
        match self {
            ShapeKind::Box | ShapeKind::Glyph | ShapeKind::Picture => 4,
            ShapeKind::Line => 2,
            ShapeKind::Triangle => 3,
        }
    }

    /// Parameter records consumed by one shape.
    #[inline]
    pub const fn param_count(self) -> usize {
        match self {
            ShapeKind::Triangle => 2,
            _ => 1,
        }
    }

    #[inline]
    pub const fn primitive(self) -> Primitive {
        match self {
            ShapeKind::Box | ShapeKind::Glyph | ShapeKind::Picture => Primitive::TriangleStrip,
            ShapeKind::Line => Primitive::LineList,
            ShapeKind::Triangle => Primitive::TriangleList,
        }
    }
}
