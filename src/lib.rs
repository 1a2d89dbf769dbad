// src/lib.rs

//! Otodom scraper library

pub mod browser;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
