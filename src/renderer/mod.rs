//! WebGPU rendering module
//!
//! Stars are built as triangle lists in canvas pixels and drawn over a
//! transparent canvas; the mirrored camera video sits underneath.

pub mod pipeline;
pub mod shapes;
pub mod stars;
pub mod vertex;

pub use pipeline::{RenderState, canvas_to_ndc};
pub use stars::StarPainter;
pub use vertex::Vertex;
