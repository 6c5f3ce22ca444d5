pub mod competitor;
pub mod entities;
pub mod export;
pub mod faq;
pub mod generator;
pub mod handlers;
pub mod recommendations;
pub mod seo_score;
pub mod templates;
