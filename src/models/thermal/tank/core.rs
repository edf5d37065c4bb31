//! Nodal thermal model of a stratified hot-water storage tank.
//!
//! The tank is a vertical cylinder split into `N` equal, well-mixed nodes,
//! numbered from the top. Each step:
//!
//! 1. routes each port's flow from its inlet node to its outlet node,
//! 2. builds a linear ODE `dT/dt = A·T + B` for every node from heaters,
//!    ambient losses, conduction, and advection,
//! 3. integrates every ODE in closed form over the step,
//! 4. repeats 2–3 until neighbor and inflow temperatures settle,
//! 5. mixes any node block colder on top than below,
//! 6. reports state of charge and an energy balance.

mod config;
mod error;
mod fluid;
mod geometry;
mod input;
mod location;
mod profile;
mod results;
mod solve;
mod surfaces;

#[cfg(test)]
mod test_support;

pub use config::{SocReference, SolverConfig, TankConfig};
pub use error::{Component, LocationError, StepError, TankError};
pub use fluid::Fluid;
pub use geometry::{Geometry, MAX_NODES, NodeGeometry};
pub use input::{PortFlow, StepInput};
pub use location::{Location, PortLocation};
pub use profile::InitialProfile;
pub use results::{EnergyBalance, StepResults};
pub use surfaces::Surfaces;

use uom::si::f64::{SpecificHeatCapacity, ThermalConductance};

use solve::PortNodes;

/// A configured tank with `N` nodes, `P` ports, `Q` heaters, and `S` thermostats.
///
/// Geometry and component placement are resolved once at construction.
/// The tank holds no temperatures; callers carry node temperatures from
/// one step to the next.
#[derive(Debug, Clone)]
pub struct Tank<const N: usize, const P: usize, const Q: usize, const S: usize> {
    geometry: Geometry<N>,
    loss_conductances: [Surfaces<ThermalConductance>; N],
    conductance: ThermalConductance,
    specific_heat: SpecificHeatCapacity,
    ports: [PortNodes; P],
    heaters: [usize; Q],
    thermostats: [usize; S],
    soc_reference: SocReference,
    solver: SolverConfig,
}

impl<const N: usize, const P: usize, const Q: usize, const S: usize> Tank<N, P, Q, S> {
    /// Creates a tank and maps every component location to a node.
    ///
    /// # Errors
    ///
    /// Returns a [`TankError`] if the node count is unsupported, a geometry,
    /// fluid, or loss value is non-physical, the state of charge reference is
    /// inverted, or a location can't be mapped to a node.
    pub fn new(
        config: &TankConfig,
        ports: [PortLocation; P],
        heaters: [Location; Q],
        thermostats: [Location; S],
    ) -> Result<Self, TankError> {
        let geometry = Geometry::new(config.volume, config.height, &config.fluid)?;
        config.fluid.validate()?;
        config.validate_losses()?;
        config.soc_reference.validate()?;

        let inlets = locate::<N, P>(ports.map(|port| port.inlet), Component::PortInlet)?;
        let outlets = locate::<N, P>(ports.map(|port| port.outlet), Component::PortOutlet)?;

        Ok(Self {
            loss_conductances: geometry.loss_conductances(config.loss_coefficients),
            conductance: geometry.conductance(config.fluid.thermal_conductivity),
            geometry,
            specific_heat: config.fluid.specific_heat,
            ports: std::array::from_fn(|p| PortNodes {
                inlet: inlets[p],
                outlet: outlets[p],
            }),
            heaters: locate::<N, Q>(heaters, Component::Heater)?,
            thermostats: locate::<N, S>(thermostats, Component::Thermostat)?,
            soc_reference: config.soc_reference,
            solver: SolverConfig::default(),
        })
    }

    /// Replaces the convergence loop configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::SolverConfig`] if `max_iters` is zero or
    /// `temp_tol` is negative or NaN.
    pub fn with_solver_config(mut self, solver: SolverConfig) -> Result<Self, TankError> {
        solver.validate()?;
        self.solver = solver;
        Ok(self)
    }

    /// Node volumes, capacitances, and loss areas resolved at construction.
    #[must_use]
    pub fn geometry(&self) -> &Geometry<N> {
        &self.geometry
    }

    /// Node index of each heater.
    #[must_use]
    pub fn heater_nodes(&self) -> [usize; Q] {
        self.heaters
    }

    /// Node index of each thermostat.
    #[must_use]
    pub fn thermostat_nodes(&self) -> [usize; S] {
        self.thermostats
    }

    /// Advances the tank by one step.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] if an input temperature is not finite.
    pub fn step(&self, input: &StepInput<N, P, Q>) -> Result<StepResults<N, P, S>, StepError> {
        solve::step(self, input)
    }
}

fn locate<const N: usize, const K: usize>(
    locations: [Location; K],
    component: Component,
) -> Result<[usize; K], TankError> {
    let mut nodes = [0; K];
    for (index, (node, location)) in nodes.iter_mut().zip(locations).enumerate() {
        *node = location
            .node_index::<N>()
            .map_err(|source| TankError::Location {
                component,
                index,
                source,
            })?;
    }
    Ok(nodes)
}
