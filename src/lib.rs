#[macro_use]
extern crate bitflags;

#[macro_use]
extern crate static_assertions;

#[macro_use]
extern crate property;

#[macro_use]
extern crate const_format;

extern crate backtrace;

extern crate itertools;

extern crate threadpool;

#[macro_use]
mod debug_tools;

pub mod def;

pub mod error;

pub mod config;

pub mod logging;

#[macro_use]
pub mod utility;

#[macro_use]
pub mod unicode;

pub mod table;

pub mod emitter;

pub mod pipeline;

#[cfg(test)]
#[macro_use]
extern crate indoc;

#[cfg(test)]
#[macro_use]
extern crate test_case;
