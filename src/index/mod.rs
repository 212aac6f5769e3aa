pub mod catalog;
pub mod forward;
pub mod interner;
pub mod inverted;
