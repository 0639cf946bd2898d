pub mod citations;
pub mod mind_map;
pub mod papers;
mod placeholder;
pub mod sample_paper;
pub mod summaries;
pub mod workspace_panel;

pub use citations::CitationsPanel;
pub use mind_map::MindMap;
pub use papers::PapersPanel;
pub use placeholder::loadable_view;
pub use sample_paper::SamplePaperPanel;
pub use summaries::SummariesPanel;
pub use workspace_panel::WorkspacePanel;
