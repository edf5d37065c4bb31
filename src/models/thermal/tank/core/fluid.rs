use uom::si::{
    f64::{MassDensity, SpecificHeatCapacity, ThermalConductivity},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::kilojoule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::constraint::{NonNegative, StrictlyPositive};

use super::TankError;

/// Constant properties of the stored fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fluid {
    pub density: MassDensity,
    pub specific_heat: SpecificHeatCapacity,
    pub thermal_conductivity: ThermalConductivity,
}

impl Fluid {
    /// Typical properties of liquid water at storage temperatures.
    #[must_use]
    pub fn water() -> Self {
        Self {
            density: MassDensity::new::<kilogram_per_cubic_meter>(990.0),
            specific_heat: SpecificHeatCapacity::new::<kilojoule_per_kilogram_kelvin>(4.18),
            thermal_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.6),
        }
    }

    /// Checks that the properties are physical.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::Fluid`] if density or specific heat is not
    /// strictly positive, or if conductivity is negative or NaN.
    pub(super) fn validate(&self) -> Result<(), TankError> {
        StrictlyPositive::new(self.density).map_err(|source| TankError::Fluid {
            property: "density",
            source,
        })?;
        StrictlyPositive::new(self.specific_heat).map_err(|source| TankError::Fluid {
            property: "specific heat",
            source,
        })?;
        NonNegative::new(self.thermal_conductivity).map_err(|source| TankError::Fluid {
            property: "thermal conductivity",
            source,
        })?;
        Ok(())
    }
}

impl Default for Fluid {
    fn default() -> Self {
        Self::water()
    }
}
