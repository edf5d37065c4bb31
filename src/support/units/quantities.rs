use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, P1, Z0},
};

/// Rate of temperature change, K/s in SI.
///
/// The constant term `B` of a node's `dT/dt = A·T + B` equation.
pub type TemperatureRate = Quantity<ISQ<Z0, Z0, N1, Z0, P1, Z0, Z0>, SI<f64>, f64>;

/// Reciprocal time, 1/s in SI.
///
/// The proportional term `A` of a node's `dT/dt = A·T + B` equation.
pub type InverseTime = Quantity<ISQ<Z0, Z0, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;
