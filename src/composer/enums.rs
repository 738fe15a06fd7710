pub mod composer_state;
pub mod resolution;
pub mod style_preset;
