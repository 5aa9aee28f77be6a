#![no_std]

mod devlog;
pub mod index;

pub use log as __log;
