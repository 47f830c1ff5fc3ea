pub mod backend;
pub mod common;
pub mod config;
pub mod models;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
