pub mod animation;
pub mod ttf;
