use std::fmt;

use thiserror::Error;
use uom::si::f64::ThermodynamicTemperature;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while configuring a tank.
#[derive(Debug, Error)]
pub enum TankError {
    /// The node count is outside the supported range.
    #[error("node count must be between 1 and 50, got {count}")]
    NodeCount { count: usize },

    /// The tank volume or height is not strictly positive.
    #[error("invalid tank {dimension}")]
    Geometry {
        dimension: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// A fluid property is non-physical.
    #[error("invalid fluid {property}")]
    Fluid {
        property: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// A surface loss coefficient is negative or NaN.
    #[error("invalid {surface} loss coefficient")]
    LossCoefficient {
        surface: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// A port, heater, or thermostat location can't be mapped to a node.
    #[error("{component} {index} is misplaced")]
    Location {
        component: Component,

        /// Position of the component in its array.
        index: usize,

        #[source]
        source: LocationError,
    },

    /// A solver setting can't drive the convergence loop.
    #[error("invalid solver {setting}")]
    SolverConfig {
        setting: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The state of charge reference temperatures don't bound a usable range.
    #[error("SOC max temperature {max:?} must exceed consumption temperature {consumption:?}")]
    SocReference {
        consumption: ThermodynamicTemperature,
        max: ThermodynamicTemperature,
    },
}

/// The kind of tank component whose location failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    PortInlet,
    PortOutlet,
    Heater,
    Thermostat,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PortInlet => "port inlet",
            Self::PortOutlet => "port outlet",
            Self::Heater => "heater",
            Self::Thermostat => "thermostat",
        })
    }
}

/// Reasons a [`Location`](super::Location) can't be mapped to a node.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LocationError {
    #[error("height fraction {0} must be a number no less than zero")]
    InvalidFraction(f64),

    #[error("node {node} does not exist in a {count}-node tank")]
    NodeOutOfRange { node: usize, count: usize },
}

/// Errors that can occur while advancing a tank by one step.
#[derive(Debug, Error)]
pub enum StepError {
    /// A temperature input is infinite or NaN.
    #[error("{input} temperature {index} is not finite")]
    NonFiniteTemperature {
        /// Which input the temperature belongs to.
        input: &'static str,

        /// Position within that input (0 for scalar inputs).
        index: usize,
    },

    /// A flow rate, heater power, or the timestep is infinite.
    #[error("{input} {index} is not finite")]
    NonFinite {
        /// Which input the value belongs to.
        input: &'static str,

        /// Position within that input (0 for scalar inputs).
        index: usize,
    },

    /// The computed state of charge fell outside `[0, 1]`.
    ///
    /// This only happens if the solved temperatures are not finite.
    #[error("state of charge is out of range")]
    StateOfCharge(#[source] ConstraintError),
}
