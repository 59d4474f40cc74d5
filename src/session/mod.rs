pub(crate) mod config;
pub(crate) mod controls;
pub(crate) mod debounce;
pub(crate) mod state;
