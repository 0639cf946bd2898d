mod component;
mod render;
mod state;
mod types;

pub use component::MindMap;
pub use types::{DiagramData, DiagramNode};
