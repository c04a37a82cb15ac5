pub mod ad;
pub mod image;
pub mod text;

pub use ad::*;
pub use image::*;
pub use text::*;
