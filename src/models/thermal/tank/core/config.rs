use uom::si::{
    f64::{HeatTransfer, Length, TemperatureInterval, ThermodynamicTemperature, Volume},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
    volume::liter,
};

use crate::support::constraint::{NonNegative, StrictlyPositive};

use super::{Fluid, Surfaces, TankError};

/// Physical configuration of a stratified tank.
///
/// The node count is not part of this struct; it is fixed by the tank's
/// `N` const generic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankConfig {
    /// Total stored volume.
    pub volume: Volume,

    /// Inside height of the vertical cylinder.
    pub height: Length,

    /// Properties of the stored fluid.
    pub fluid: Fluid,

    /// Overall heat loss coefficient of each exterior surface.
    pub loss_coefficients: Surfaces<HeatTransfer>,

    /// Reference temperatures for state of charge.
    pub soc_reference: SocReference,
}

impl Default for TankConfig {
    /// A 189 L (50 gal) water heater with moderate insulation.
    fn default() -> Self {
        Self {
            volume: Volume::new::<liter>(189.0),
            height: Length::new::<meter>(1.2),
            fluid: Fluid::water(),
            loss_coefficients: Surfaces::uniform(HeatTransfer::new::<
                watt_per_square_meter_kelvin,
            >(1.0)),
            soc_reference: SocReference::default(),
        }
    }
}

impl TankConfig {
    /// Checks that every loss coefficient is non-negative.
    pub(super) fn validate_losses(&self) -> Result<(), TankError> {
        for (surface, u) in self.loss_coefficients.named() {
            NonNegative::new(u).map_err(|source| TankError::LossCoefficient { surface, source })?;
        }
        Ok(())
    }
}

/// Temperatures that bound the usable energy in the tank.
///
/// A node at or below `consumption` contributes nothing to state of charge.
/// The tank is fully charged once its nodes hold as much energy above
/// `consumption` as a uniform tank at `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SocReference {
    pub consumption: ThermodynamicTemperature,
    pub max: ThermodynamicTemperature,
}

impl Default for SocReference {
    fn default() -> Self {
        Self {
            consumption: ThermodynamicTemperature::new::<degree_celsius>(40.0),
            max: ThermodynamicTemperature::new::<degree_celsius>(65.0),
        }
    }
}

impl SocReference {
    /// Checks that `max` lies above `consumption`.
    pub(super) fn validate(&self) -> Result<(), TankError> {
        if self.max > self.consumption {
            Ok(())
        } else {
            Err(TankError::SocReference {
                consumption: self.consumption,
                max: self.max,
            })
        }
    }
}

/// Configuration of the per-step convergence loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Maximum number of coefficient/integration passes per step.
    pub max_iters: usize,

    /// Largest change in any node's time-averaged temperature between
    /// passes that still counts as settled.
    pub temp_tol: TemperatureInterval,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iters: 20,
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-4),
        }
    }
}

impl SolverConfig {
    /// Checks that the loop runs at least once and the tolerance is usable.
    pub(super) fn validate(&self) -> Result<(), TankError> {
        StrictlyPositive::new(self.max_iters).map_err(|source| TankError::SolverConfig {
            setting: "max_iters",
            source,
        })?;
        NonNegative::new(self.temp_tol).map_err(|source| TankError::SolverConfig {
            setting: "temp_tol",
            source,
        })?;
        Ok(())
    }
}
