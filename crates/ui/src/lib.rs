pub mod keyboard;
pub mod strings;
pub mod theme;
