pub mod artist;
pub mod colormap;
pub mod converter;
pub mod error;
pub mod interpolation;
pub mod memory;
