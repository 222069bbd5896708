pub mod budget;
pub mod chart;
pub mod session;
pub mod store;
pub mod tracker;
