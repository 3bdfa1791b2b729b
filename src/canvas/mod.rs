pub mod geometry;
pub mod mount;
pub mod surface;
