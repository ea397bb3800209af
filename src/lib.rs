#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;
#[macro_use]
extern crate log;
extern crate nalgebra;
#[macro_use]
extern crate serde;

pub mod config;
pub mod math;
pub mod planner;
pub mod types;

pub use planner::{Planner, Status};

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;
