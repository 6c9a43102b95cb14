pub mod hosts;
pub mod range;
pub mod target;
