//! Exact integration of a node's linear ODE over one step.
//!
//! Produces both the end-of-step temperature and the step-averaged
//! temperature, which feeds the next convergence pass and the energy balance.

use uom::{
    ConstZero,
    si::{
        f64::{ThermodynamicTemperature, Time},
        thermodynamic_temperature::kelvin,
        time::second,
    },
};

use crate::support::units::InverseTime;

use super::coefficients::Coefficients;

/// Below this `|A·Δt|` the growth factors use their Taylor series.
const SERIES_LIMIT: f64 = 1e-5;

/// A node's temperature at the end of a step and averaged over it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NodeTemperatures {
    pub end: ThermodynamicTemperature,
    pub average: ThermodynamicTemperature,
}

/// Integrates `dT/dt = A·T + B` exactly over one step.
///
/// With `A = 0` the temperature ramps linearly.
/// Otherwise the closed-form solution
/// `T(Δt) = (T0 + B/A)·exp(A·Δt) - B/A` is evaluated as
/// `T0 + (A·T0 + B)·Δt·φ(A·Δt)`, with `φ(x) = (eˣ - 1)/x`,
/// which avoids cancellation when `A·Δt` is small.
pub(super) fn integrate(
    t0: ThermodynamicTemperature,
    coefficients: Coefficients,
    dt: Time,
) -> NodeTemperatures {
    let t0 = t0.get::<kelvin>();
    let b = coefficients.b.value;
    let dt = dt.get::<second>();

    let (end, average) = if coefficients.a == InverseTime::ZERO {
        (t0 + b * dt, t0 + 0.5 * b * dt)
    } else {
        let a = coefficients.a.value;
        let x = a * dt;
        let rise = (a * t0 + b) * dt;
        (t0 + rise * growth(x), t0 + rise * mean_growth(x))
    };

    NodeTemperatures {
        end: ThermodynamicTemperature::new::<kelvin>(end),
        average: ThermodynamicTemperature::new::<kelvin>(average),
    }
}

/// Share of an end-of-step temperature change that appears in the step average.
///
/// A change `ΔT` to a node's end temperature corresponds to a constant
/// extra source over the step. That source shifts the average by `ΔT`
/// times this weight: `1/2` when `A = 0`, approaching `1` as `A·Δt → -∞`.
pub(super) fn average_weight(a: InverseTime, dt: Time) -> f64 {
    let x = a.value * dt.get::<second>();
    let end_factor = growth(x);
    if end_factor.is_normal() {
        mean_growth(x) / end_factor
    } else {
        0.0
    }
}

/// `φ(x) = (eˣ - 1)/x`, with `φ(0) = 1`.
fn growth(x: f64) -> f64 {
    if x.abs() < SERIES_LIMIT {
        1.0 + x / 2.0 + x * x / 6.0
    } else {
        x.exp_m1() / x
    }
}

/// `ψ(x) = (φ(x) - 1)/x`, with `ψ(0) = 1/2`.
fn mean_growth(x: f64) -> f64 {
    if x.abs() < SERIES_LIMIT {
        0.5 + x / 6.0 + x * x / 24.0
    } else {
        (growth(x) - 1.0) / x
    }
}
