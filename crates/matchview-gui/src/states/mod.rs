mod textures;
mod ui;

pub use textures::PanelTextures;
pub use ui::UIState;
