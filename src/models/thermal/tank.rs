//! Stratified hot-water storage tank models.
//!
//! This module provides a [`twine_core::Model`] implementation for a vertical
//! tank divided into `N` well-mixed nodes.
//! The computational core is in the internal `core` module.
//!
//! # Example
//!
//! ```
//! use twine_core::Model;
//! use twine_tank::{
//!     models::thermal::tank::{
//!         Location, PortFlow, PortLocation, StepInput, StratifiedTank, Surfaces, TankConfig,
//!     },
//!     support::constraint::{NonNegative, StrictlyPositive},
//! };
//! use uom::si::{
//!     f64::{MassRate, Power, ThermodynamicTemperature, Time},
//!     mass_rate::kilogram_per_second,
//!     power::kilowatt,
//!     thermodynamic_temperature::degree_celsius,
//!     time::minute,
//! };
//!
//! let celsius = ThermodynamicTemperature::new::<degree_celsius>;
//!
//! let tank = StratifiedTank::<6, 1, 1, 1>::new(
//!     &TankConfig::default(),
//!     [PortLocation {
//!         inlet: Location::tank_bottom(),
//!         outlet: Location::tank_top(),
//!     }],
//!     [Location::HeightFraction(0.3)],
//!     [Location::HeightFraction(0.5)],
//! )?;
//!
//! let output = tank.call(&StepInput {
//!     temperatures: [celsius(55.0); 6],
//!     port_flows: [PortFlow::new(
//!         MassRate::new::<kilogram_per_second>(0.05),
//!         celsius(12.0),
//!     )?],
//!     heater_powers: [NonNegative::new(Power::new::<kilowatt>(4.5))?],
//!     environment: Surfaces::uniform(celsius(20.0)),
//!     timestep: StrictlyPositive::new(Time::new::<minute>(5.0))?,
//! })?;
//!
//! assert!(output.temperatures[5] < celsius(55.0));
//! assert!(output.temperatures.windows(2).all(|pair| pair[0] >= pair[1]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub(crate) mod core;

use twine_core::Model;

pub use self::core::{
    Component, EnergyBalance, Fluid, Geometry, InitialProfile, Location, LocationError,
    MAX_NODES, NodeGeometry, PortFlow, PortLocation, SocReference, SolverConfig, StepError,
    StepInput, StepResults, Surfaces, TankConfig, TankError,
};

use self::core::Tank;

/// A stratified tank with `N` nodes, `P` ports, `Q` heaters, and `S` thermostats.
///
/// Each [`Model::call`] advances the node temperatures in its input by one
/// timestep. The model is stateless; feed each output's temperatures into
/// the next step's input.
#[derive(Debug, Clone)]
pub struct StratifiedTank<const N: usize, const P: usize, const Q: usize, const S: usize> {
    core: Tank<N, P, Q, S>,
}

impl<const N: usize, const P: usize, const Q: usize, const S: usize> StratifiedTank<N, P, Q, S> {
    /// Creates a tank model.
    ///
    /// # Errors
    ///
    /// Returns a [`TankError`] if the configuration is non-physical or a
    /// component location can't be mapped to a node.
    pub fn new(
        config: &TankConfig,
        ports: [PortLocation; P],
        heaters: [Location; Q],
        thermostats: [Location; S],
    ) -> Result<Self, TankError> {
        Ok(Self {
            core: Tank::new(config, ports, heaters, thermostats)?,
        })
    }

    /// Replaces the convergence loop configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::SolverConfig`] if the loop can't run with `solver`.
    pub fn with_solver_config(self, solver: SolverConfig) -> Result<Self, TankError> {
        Ok(Self {
            core: self.core.with_solver_config(solver)?,
        })
    }

    /// Node volumes, capacitances, and loss areas resolved at construction.
    #[must_use]
    pub fn geometry(&self) -> &Geometry<N> {
        self.core.geometry()
    }

    /// Node index of each heater.
    #[must_use]
    pub fn heater_nodes(&self) -> [usize; Q] {
        self.core.heater_nodes()
    }

    /// Node index of each thermostat.
    #[must_use]
    pub fn thermostat_nodes(&self) -> [usize; S] {
        self.core.thermostat_nodes()
    }
}

impl<const N: usize, const P: usize, const Q: usize, const S: usize> Model
    for StratifiedTank<N, P, Q, S>
{
    type Input = StepInput<N, P, Q>;
    type Output = StepResults<N, P, S>;
    type Error = StepError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.core.step(input)
    }
}
