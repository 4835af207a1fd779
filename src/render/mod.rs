pub mod colors;
pub mod digits;
pub mod layers;
pub mod layout;
pub mod ring;
pub mod symbols;
pub mod ui;

pub use layers::{LayerRenderer, LayerVisibility, RenderState};
pub use layout::ClockLayout;
pub use symbols::detect_unicode;
pub use ui::{ControlId, ControlsModel};
