mod component;
mod config;
mod state;

pub use component::FloatingIconsField;
