#[cfg(target_os = "windows")]
mod com;
pub mod error;
#[cfg(test)]
mod fake;
pub mod parser;
mod properties;
pub mod service;
pub mod walker;
