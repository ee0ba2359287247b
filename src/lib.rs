//! Plara - Polar.sh Payment Backend
//!
//! This crate implements the backend intermediary between a web storefront
//! and Polar's hosted checkout and subscription API: checkout session
//! creation, product/order/subscription retrieval, and verified webhook
//! processing.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
