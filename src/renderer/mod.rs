//! WebGPU rendering module
//!
//! The scene is painted into a `Painter` (normally a `Mesh`), which the
//! pipeline uploads as a single triangle list.

pub mod painter;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod starfield;
pub mod vertex;

pub use painter::{Color, Painter, hex};
pub use pipeline::RenderState;
pub use scene::{Frame, draw_scene};
pub use shapes::Mesh;
pub use starfield::{Star, Starfield};
pub use vertex::Vertex;
