#![no_std]

extern crate alloc;

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use generator::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod generator;
mod types;
