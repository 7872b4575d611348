pub mod config;
pub mod export;
pub mod plan;
pub mod refine;
