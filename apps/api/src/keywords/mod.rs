pub mod estimator;
pub mod expander;
pub mod fanout;
pub mod handlers;
pub mod service;
