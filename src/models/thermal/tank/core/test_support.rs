use uom::{
    ConstZero,
    si::{
        f64::{
            Area, HeatCapacity, HeatTransfer, Power, SpecificHeatCapacity, ThermalConductance,
            ThermodynamicTemperature, Time, Volume,
        },
        power::watt,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermodynamic_temperature::{degree_celsius, kelvin},
        time::second,
    },
};

use crate::support::constraint::{NonNegative, StrictlyPositive};

use super::{
    NodeGeometry, PortFlow, StepInput, Surfaces, TankConfig,
    solve::{PortDistribution, StepContext},
};

pub(super) fn t_c(celsius: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(celsius)
}

pub(super) fn t_k(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<kelvin>(value)
}

/// The default tank with perfect insulation.
pub(super) fn insulated() -> TankConfig {
    TankConfig {
        loss_coefficients: Surfaces::uniform(HeatTransfer::ZERO),
        ..TankConfig::default()
    }
}

/// Step inputs with a 20 °C environment.
pub(super) fn step_input<const N: usize, const P: usize, const Q: usize>(
    temperatures: [ThermodynamicTemperature; N],
    port_flows: [PortFlow; P],
    heater_watts: [f64; Q],
    seconds: f64,
) -> StepInput<N, P, Q> {
    StepInput {
        temperatures,
        port_flows,
        heater_powers: heater_watts.map(|w| NonNegative::new(Power::new::<watt>(w)).unwrap()),
        environment: Surfaces::uniform(t_c(20.0)),
        timestep: StrictlyPositive::new(Time::new::<second>(seconds)).unwrap(),
    }
}

/// Owned data behind a [`StepContext`], with every term zeroed.
pub(super) struct StepContextFixture<const N: usize> {
    pub(super) nodes: [NodeGeometry; N],
    pub(super) loss_conductances: [Surfaces<ThermalConductance>; N],
    pub(super) conductance: ThermalConductance,
    pub(super) specific_heat: SpecificHeatCapacity,
    pub(super) environment: Surfaces<ThermodynamicTemperature>,
    pub(super) heat_input: [Power; N],
}

impl<const N: usize> StepContextFixture<N> {
    pub(super) fn new(capacitance: HeatCapacity) -> Self {
        Self {
            nodes: [NodeGeometry {
                volume: Volume::ZERO,
                capacitance,
                loss_area: Surfaces::uniform(Area::ZERO),
            }; N],
            loss_conductances: [Surfaces::uniform(ThermalConductance::ZERO); N],
            conductance: ThermalConductance::ZERO,
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4180.0),
            environment: Surfaces::uniform(t_c(20.0)),
            heat_input: [Power::ZERO; N],
        }
    }

    pub(super) fn context<const P: usize>(
        &self,
        ports: [PortDistribution<N>; P],
    ) -> StepContext<'_, N, P> {
        StepContext {
            nodes: &self.nodes,
            loss_conductances: &self.loss_conductances,
            conductance: self.conductance,
            specific_heat: self.specific_heat,
            environment: self.environment,
            heat_input: self.heat_input,
            ports,
        }
    }
}
