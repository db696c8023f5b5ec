#![allow(dead_code)]

pub mod builders;
pub mod db;

pub use builders::{PropertyBuilder, TraceBuilder};
pub use db::TestDb;
