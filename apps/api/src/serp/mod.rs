pub mod client;
pub mod error;
pub mod handlers;
pub mod results;
pub mod service;
