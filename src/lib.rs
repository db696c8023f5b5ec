//! Real-estate properties backend
//!
//! Owners, properties, property images and price traces over a relational
//! store, behind a repository/unit-of-work layer and a thin HTTP surface.

pub mod context;
pub mod entities;
pub mod errors;
pub mod matches;
pub mod repository;
pub mod service;
pub mod settings;
pub mod storage;
pub mod web;
