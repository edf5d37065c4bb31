//! Linear ODE coefficients for each node's energy balance.

use uom::{
    ConstZero,
    si::f64::{Power, ThermalConductance, ThermodynamicTemperature},
};

use crate::support::units::{InverseTime, TemperatureDifference, TemperatureRate};

use super::StepContext;

/// Coefficients of a node's linear ODE, `dT/dt = A·T + B`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Coefficients {
    pub a: InverseTime,
    pub b: TemperatureRate,
}

impl Coefficients {
    pub(crate) const ZERO: Self = Self {
        a: InverseTime::ZERO,
        b: TemperatureRate::ZERO,
    };
}

/// Builds every node's coefficients from temperatures frozen at the last pass.
///
/// Each node gathers a total conductance `G` and a total heat source `Q`,
/// giving `A = -G/C` and `B = Q/C`:
///
/// - heaters add their power to `Q`,
/// - each surface adds `UA` to `G` and `UA·T_ambient` to `Q`,
/// - each adjacent node adds `K` to `G` and `K·T_neighbor` to `Q`,
/// - each port adds `ṁ_out·cp` to `G` and `ṁ_in·cp·T_in + ṁ_mains·cp·T_mains` to `Q`.
pub(super) fn build<const N: usize, const P: usize>(
    context: &StepContext<'_, N, P>,
    frozen: &[ThermodynamicTemperature; N],
) -> [Coefficients; N] {
    let cp = context.specific_heat;
    let inbound = context
        .ports
        .each_ref()
        .map(|port| port.inbound_temperatures(frozen));

    std::array::from_fn(|j| {
        let mut conductance = ThermalConductance::ZERO;
        let mut source: Power = context.heat_input[j];

        let ua = context.loss_conductances[j];
        conductance += ua.total();
        source += ua
            .zip_with(context.environment, |ua, t| ua * t.above_absolute_zero())
            .total();

        let neighbors = [j.checked_sub(1), Some(j + 1).filter(|&k| k < N)];
        for k in neighbors.into_iter().flatten() {
            conductance += context.conductance;
            source += context.conductance * frozen[k].above_absolute_zero();
        }

        for (port, t_in) in context.ports.iter().zip(&inbound) {
            let flow = port.nodes[j];
            conductance += flow.outbound * cp;
            source += flow.inbound * cp * t_in[j].above_absolute_zero()
                + flow.mains * cp * port.mains_temperature.above_absolute_zero();
        }

        let capacitance = context.nodes[j].capacitance;
        Coefficients {
            a: -conductance / capacitance,
            b: source / capacitance,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{HeatCapacity, MassRate},
        heat_capacity::joule_per_kelvin,
        mass_rate::kilogram_per_second,
        power::watt,
        thermal_conductance::watt_per_kelvin,
        thermodynamic_temperature::kelvin,
    };

    use crate::models::thermal::tank::core::{
        Surfaces,
        solve::flow::{PortDistribution, PortNodes},
        test_support::{StepContextFixture, t_k},
    };

    #[test]
    fn isolated_node_with_heater() {
        let mut fixture = StepContextFixture::<1>::new(HeatCapacity::new::<joule_per_kelvin>(1000.0));
        fixture.heat_input = [Power::new::<watt>(50.0)];

        let [c] = build(&fixture.context::<0>([]), &[t_k(300.0)]);
        assert_eq!(c.a, InverseTime::ZERO);
        assert_relative_eq!(c.b.value, 0.05);
    }

    #[test]
    fn losses_pull_toward_each_ambient() {
        let mut fixture = StepContextFixture::<1>::new(HeatCapacity::new::<joule_per_kelvin>(1000.0));
        fixture.loss_conductances = [Surfaces {
            top: ThermalConductance::new::<watt_per_kelvin>(1.0),
            edge: ThermalConductance::new::<watt_per_kelvin>(2.0),
            bottom: ThermalConductance::new::<watt_per_kelvin>(0.0),
        }];
        fixture.environment = Surfaces {
            top: t_k(290.0),
            edge: t_k(280.0),
            bottom: t_k(1000.0),
        };

        let [c] = build(&fixture.context::<0>([]), &[t_k(330.0)]);
        assert_relative_eq!(c.a.value, -3.0e-3);
        assert_relative_eq!(c.b.value, (290.0 + 2.0 * 280.0) / 1000.0);

        // Steady state is the conductance-weighted ambient.
        assert_relative_eq!(-c.b.value / c.a.value, 850.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn conduction_uses_frozen_neighbors() {
        let mut fixture = StepContextFixture::<3>::new(HeatCapacity::new::<joule_per_kelvin>(500.0));
        fixture.conductance = ThermalConductance::new::<watt_per_kelvin>(5.0);

        let frozen = [t_k(340.0), t_k(320.0), t_k(300.0)];
        let [top, middle, bottom] = build(&fixture.context::<0>([]), &frozen);

        assert_relative_eq!(top.a.value, -0.01);
        assert_relative_eq!(top.b.value, 5.0 * 320.0 / 500.0);
        assert_relative_eq!(middle.a.value, -0.02);
        assert_relative_eq!(middle.b.value, 5.0 * (340.0 + 300.0) / 500.0);
        assert_relative_eq!(bottom.a.value, -0.01);
        assert_relative_eq!(bottom.b.value, 5.0 * 320.0 / 500.0);
    }

    #[test]
    fn advection_carries_upstream_temperatures() {
        let fixture = StepContextFixture::<2>::new(HeatCapacity::new::<joule_per_kelvin>(4180.0));
        let port = PortDistribution::new(
            PortNodes {
                inlet: 1,
                outlet: 0,
            },
            MassRate::new::<kilogram_per_second>(0.01),
            t_k(290.0),
        );

        let frozen = [t_k(330.0), t_k(310.0)];
        let [top, bottom] = build(&fixture.context([port]), &frozen);

        // ṁ·cp/C = 0.01 · 4180 / 4180
        assert_relative_eq!(top.a.value, -0.01);
        assert_relative_eq!(bottom.a.value, -0.01);

        // Top receives water from the bottom node; bottom receives mains water.
        assert_relative_eq!(top.b.value, 0.01 * 310.0, max_relative = 1e-12);
        assert_relative_eq!(bottom.b.value, 0.01 * 290.0, max_relative = 1e-12);

        // With no other terms each node relaxes toward its inflow temperature.
        assert_relative_eq!(
            -bottom.b.value / bottom.a.value,
            t_k(290.0).get::<kelvin>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn ports_sharing_nodes_add_their_terms() {
        let fixture = StepContextFixture::<3>::new(HeatCapacity::new::<joule_per_kelvin>(4180.0));
        let draw = PortDistribution::new(
            PortNodes {
                inlet: 2,
                outlet: 0,
            },
            MassRate::new::<kilogram_per_second>(0.01),
            t_k(290.0),
        );
        let recirculation = PortDistribution::new(
            PortNodes {
                inlet: 0,
                outlet: 2,
            },
            MassRate::new::<kilogram_per_second>(0.02),
            t_k(350.0),
        );

        let frozen = [t_k(340.0), t_k(325.0), t_k(300.0)];
        let draw_only = build(&fixture.context([draw]), &frozen);
        let recirculation_only = build(&fixture.context([recirculation]), &frozen);
        let both = build(&fixture.context([draw, recirculation]), &frozen);

        for j in 0..3 {
            assert_relative_eq!(
                both[j].a.value,
                draw_only[j].a.value + recirculation_only[j].a.value,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                both[j].b.value,
                draw_only[j].b.value + recirculation_only[j].b.value,
                max_relative = 1e-12
            );
        }

        // Every node carries both flows: 0.03 kg/s · cp / C.
        for c in both {
            assert_relative_eq!(c.a.value, -0.03, max_relative = 1e-12);
        }
    }
}
