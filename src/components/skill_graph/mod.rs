mod component;
mod layout;
mod render;
mod state;
mod theme;
mod types;

pub use component::SkillGraphCanvas;
pub use layout::SkillTree;
pub use theme::SkillTheme;
