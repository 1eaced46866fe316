//! Configuration loading and resolution.
//!
//! `load` layers the default config files, explicit `--config` files and
//! `LOCALE_PICKER__*` environment variables, applies CLI overrides and returns
//! a validated [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::ResolvedConfig;
