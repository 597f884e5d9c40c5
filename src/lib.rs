//! EduFinance library
//!
//! This library exposes the core functionality of EduFinance for testing
//! and potential future library use.

pub mod app;
pub mod auth;
pub mod config;
pub mod currency;
pub mod error;
pub mod finance;
pub mod interchange;
pub mod media;
pub mod services;
pub mod store;
