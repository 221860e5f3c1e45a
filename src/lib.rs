#![forbid(unsafe_code)]

//! A parallel search engine for vampire numbers: numbers expressible as
//! a product of two same-length "fang" factors whose digits rearrange
//! into the product's own digits.
//!
//! The engine scans a closed interval one even digit-length class at a
//! time, slicing each class into tasks that a fixed worker pool drains
//! through exactly two mutexes (intake and output). See `SPEC_FULL.md`
//! for the full design.

pub mod board;
pub mod cache;
pub mod checkpoint;
pub mod cli;
pub mod codec;
pub mod config;
pub mod driver;
pub mod error;
pub mod interval;
pub mod kernel;
pub mod partition;
pub mod pool;
pub mod task;
pub mod types;
