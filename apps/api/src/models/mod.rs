pub mod cluster;
pub mod content;
pub mod keyword;
pub mod serp;
