pub mod diagram_view;
pub mod info_panel;

pub use diagram_view::DiagramView;
pub use info_panel::InfoPanel;
