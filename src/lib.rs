pub mod builder;
pub mod config;
pub mod runtime;
pub mod target;
pub mod toolchain;
