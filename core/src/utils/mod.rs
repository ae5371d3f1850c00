pub(crate) mod logging;
pub(crate) mod tasks_toml;
pub(crate) mod time;
