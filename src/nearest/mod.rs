pub mod rank;
pub mod tracker;
