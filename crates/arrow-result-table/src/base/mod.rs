//! This module contains basic shared functionalities of the library.
pub mod arrow;

pub mod config;

pub mod math;

pub mod metadata;

pub mod time;
