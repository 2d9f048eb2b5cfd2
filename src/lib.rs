// src/lib.rs

//! ReconNews Library
//!
//! Tags and scores Christian news articles against a keyword taxonomy and
//! serves them through a cached feed with search, filtering and
//! source-balanced ordering.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
