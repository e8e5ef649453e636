pub mod time;
pub mod xdg;
