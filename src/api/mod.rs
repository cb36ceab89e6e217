//! Public API module for Oxirec
//!
//! The main entry point is the [`Oxirec`] struct, which owns the rating
//! matrix, the session map and the product catalog built from one `Config`.

pub mod db;

pub use db::Oxirec;
