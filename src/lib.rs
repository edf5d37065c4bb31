//! # Twine Tank
//!
//! A nodal thermal model of stratified hot-water storage tanks for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once it is useful across models or outside this crate.
//! Only utilities in [`support`] are part of the public API.

pub mod models;
pub mod support;
