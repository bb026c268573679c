//! # Data Transfer Objects

pub mod conversion_params;
