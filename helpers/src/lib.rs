#[cfg(feature = "png")]
mod image;
#[cfg(feature = "serv")]
pub mod serv;

#[cfg(feature = "png")]
pub use crate::image::*;
