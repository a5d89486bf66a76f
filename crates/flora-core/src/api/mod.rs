//! API implementation submodules.
//!
//! Each submodule adds `impl FloraApi` blocks; the struct lives in `lib.rs`.

mod builder;
mod datasets;
mod views;

pub use builder::FloraApiBuilder;
