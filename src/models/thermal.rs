//! Thermal systems models.
//!
//! This module contains models for thermal systems, starting with
//! stratified hot-water storage.

pub mod tank;
