//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., temperature, volume, power).
//! This module provides extensions that are useful for modeling but aren't included in [`uom`].
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a [`minus`](TemperatureDifference::minus) method
//! for subtracting one absolute temperature from another to get a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use twine_tank::support::units::TemperatureDifference;
//!
//! let t1 = ThermodynamicTemperature::new::<kelvin>(300.0);
//! let t2 = ThermodynamicTemperature::new::<kelvin>(250.0);
//! let delta_t = t1.minus(t2);
//! // delta_t is a TemperatureInterval, not a ThermodynamicTemperature
//! ```
//!
//! This extension trait is currently needed due to limitations in [`uom`].
//! See [`TemperatureDifference`] for details.
//!
//! ## Rate quantities
//!
//! [`InverseTime`] and [`TemperatureRate`] give the coefficients of a linear
//! first-order temperature ODE, `dT/dt = A·T + B`, their own types:
//!
//! ```
//! use uom::si::{
//!     f64::{HeatCapacity, Power, ThermalConductance},
//!     heat_capacity::joule_per_kelvin,
//!     power::watt,
//!     thermal_conductance::watt_per_kelvin,
//! };
//! use twine_tank::support::units::{InverseTime, TemperatureRate};
//!
//! let capacitance = HeatCapacity::new::<joule_per_kelvin>(4.0e5);
//! let a: InverseTime = -ThermalConductance::new::<watt_per_kelvin>(2.0) / capacitance;
//! let b: TemperatureRate = Power::new::<watt>(800.0) / capacitance;
//! assert!((a.value + 5.0e-6).abs() < 1e-18);
//! assert!((b.value - 2.0e-3).abs() < 1e-15);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{InverseTime, TemperatureRate};
pub use temperature_difference::TemperatureDifference;
