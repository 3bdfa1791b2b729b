pub mod scrubber;
pub mod transport;
