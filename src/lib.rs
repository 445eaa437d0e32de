#[macro_use]
extern crate log;

pub mod ir;
pub mod service;
