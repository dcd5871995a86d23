pub mod catalog;
pub mod config;
pub mod counter;
pub mod fast;
pub mod location;
pub mod prayers;
pub mod status;
