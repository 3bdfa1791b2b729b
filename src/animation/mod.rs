pub mod clock;
pub mod driver;
pub mod ease;
pub mod extract;
pub mod options;
pub mod schedule;
pub mod state;
