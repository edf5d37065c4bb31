use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// [`ThermodynamicTemperature`] is an absolute quantity in [`uom`], so it
/// can't be subtracted or multiplied into energy terms directly.
/// This trait bridges absolute temperatures to [`TemperatureInterval`]:
///
/// - [`minus`](Self::minus) returns the difference `self - other`.
/// - [`above_absolute_zero`](Self::above_absolute_zero) returns the interval
///   from 0 K, which is what enters terms like `UA·T` or `ṁ·cp·T`.
///
/// For background on the absolute/interval distinction in [`uom`]:
/// [#380](https://github.com/iliekturtles/uom/issues/380),
/// [#289](https://github.com/iliekturtles/uom/issues/289),
/// [#403](https://github.com/iliekturtles/uom/issues/403).
///
/// [`TemperatureInterval`]: uom::si::f64::TemperatureInterval
/// [`ThermodynamicTemperature`]: uom::si::f64::ThermodynamicTemperature
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;

    /// Returns the temperature interval between absolute zero and `self`.
    fn above_absolute_zero(self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }

    fn above_absolute_zero(self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(self.get::<abs_kelvin>())
    }
}
