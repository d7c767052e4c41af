pub mod clock;
pub mod image;
pub mod timestamp;
pub mod wire;
