pub mod picture;
pub mod storage;

pub use picture::{ImageExtension, MediaError, MediaType, PictureRecord};
