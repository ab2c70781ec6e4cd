pub mod annotation;
pub mod augment;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod util;
