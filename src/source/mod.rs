pub mod metadata;
pub mod svg;
