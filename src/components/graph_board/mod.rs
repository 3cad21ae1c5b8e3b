//! Canvas board that lays out graph nodes as cells and shows edges on hover.

mod component;
pub mod render;
pub mod scene;
pub mod state;
pub mod types;

pub use component::GraphBoard;
pub use render::{CanvasSurface, Surface, render};
pub use scene::HoverScene;
pub use state::BoardState;
pub use types::{Cell, EdgeKind, EdgeLine, Emphasis};
