pub mod artifacts;
pub(crate) mod toml;
