pub mod config;
pub mod extractors;
pub mod middleware;
pub mod principal;
pub mod token;

pub use principal::Principal;
