pub mod config;
pub mod feedback;
pub mod review;
pub mod session;
