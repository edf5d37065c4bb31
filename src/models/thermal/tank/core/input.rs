use uom::si::f64::{MassRate, Power, ThermodynamicTemperature, Time};

use crate::support::constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive};

use super::{StepError, Surfaces};

/// Mains water supplied to a port over a step.
///
/// The same mass flow leaves the tank through the port's outlet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortFlow {
    pub mass_rate: Constrained<MassRate, NonNegative>,
    pub inlet_temperature: ThermodynamicTemperature,
}

impl PortFlow {
    /// Creates a port flow.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the mass rate is negative or NaN.
    pub fn new(
        mass_rate: MassRate,
        inlet_temperature: ThermodynamicTemperature,
    ) -> Result<Self, ConstraintError> {
        Ok(Self {
            mass_rate: NonNegative::new(mass_rate)?,
            inlet_temperature,
        })
    }

    /// A port with no flow.
    ///
    /// The inlet temperature is still recorded but has no effect.
    #[must_use]
    pub fn idle(inlet_temperature: ThermodynamicTemperature) -> Self {
        Self {
            mass_rate: NonNegative::zero(),
            inlet_temperature,
        }
    }
}

/// Inputs for advancing a tank with `N` nodes, `P` ports, and `Q` heaters by one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput<const N: usize, const P: usize, const Q: usize> {
    /// Node temperatures at the start of the step, top to bottom.
    pub temperatures: [ThermodynamicTemperature; N],

    pub port_flows: [PortFlow; P],

    /// Thermal power of each heater.
    pub heater_powers: [Constrained<Power, NonNegative>; Q],

    /// Ambient temperature seen by each exterior surface.
    pub environment: Surfaces<ThermodynamicTemperature>,

    pub timestep: Constrained<Time, StrictlyPositive>,
}

impl<const N: usize, const P: usize, const Q: usize> StepInput<N, P, Q> {
    /// Checks that every temperature, flow, power, and the timestep is finite.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::NonFiniteTemperature`] or [`StepError::NonFinite`]
    /// naming the first offending input.
    pub(super) fn check_finite(&self) -> Result<(), StepError> {
        let check = |input, index, t: ThermodynamicTemperature| {
            if t.value.is_finite() {
                Ok(())
            } else {
                Err(StepError::NonFiniteTemperature { input, index })
            }
        };

        for (j, t) in self.temperatures.iter().enumerate() {
            check("node", j, *t)?;
        }
        for (p, port) in self.port_flows.iter().enumerate() {
            check("port inlet", p, port.inlet_temperature)?;
        }
        for (surface, t) in self.environment.named() {
            check(surface, 0, t)?;
        }

        let check = |input, index, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(StepError::NonFinite { input, index })
            }
        };

        for (p, port) in self.port_flows.iter().enumerate() {
            check("port mass rate", p, port.mass_rate.as_ref().value)?;
        }
        for (q, power) in self.heater_powers.iter().enumerate() {
            check("heater power", q, power.as_ref().value)?;
        }
        check("timestep", 0, self.timestep.as_ref().value)
    }
}
