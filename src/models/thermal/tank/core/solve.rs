//! Per-step solve of the tank's nodal energy balance.

mod coefficients;
mod flow;
mod integrate;
mod mixing;

pub(crate) use flow::{PortDistribution, PortNodes};

use tracing::{debug, warn};
use uom::{
    ConstZero,
    si::{
        f64::{
            Energy, Power, SpecificHeatCapacity, ThermalConductance, ThermodynamicTemperature,
            Time,
        },
        thermodynamic_temperature::kelvin,
    },
};

use crate::support::units::TemperatureDifference;

use super::{
    EnergyBalance, NodeGeometry, SolverConfig, StepError, StepInput, StepResults, Surfaces, Tank,
    results::state_of_charge,
};

use coefficients::Coefficients;
use integrate::NodeTemperatures;

/// Everything a step needs that stays fixed across convergence passes.
pub(crate) struct StepContext<'a, const N: usize, const P: usize> {
    pub nodes: &'a [NodeGeometry; N],
    pub loss_conductances: &'a [Surfaces<ThermalConductance>; N],

    /// Conductance between adjacent nodes.
    pub conductance: ThermalConductance,

    pub specific_heat: SpecificHeatCapacity,
    pub environment: Surfaces<ThermodynamicTemperature>,

    /// Total heater power in each node.
    pub heat_input: [Power; N],

    pub ports: [PortDistribution<N>; P],
}

/// States of the convergence loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    BuildCoefficients,
    Integrate,
    Check,
    Converged,
    IterationLimit,
}

/// Node state after the convergence loop stops.
#[derive(Debug, Clone, Copy)]
struct Solution<const N: usize> {
    coefficients: [Coefficients; N],
    nodes: [NodeTemperatures; N],

    /// Temperatures the final coefficients were built from.
    frozen: [ThermodynamicTemperature; N],

    iterations: usize,
    limit_reached: bool,
}

/// Advances a tank by one step.
///
/// # Errors
///
/// Returns [`StepError`] if an input temperature is not finite or the
/// solved state can't produce a valid state of charge.
pub(super) fn step<const N: usize, const P: usize, const Q: usize, const S: usize>(
    tank: &Tank<N, P, Q, S>,
    input: &StepInput<N, P, Q>,
) -> Result<StepResults<N, P, S>, StepError> {
    input.check_finite()?;
    let dt = input.timestep.into_inner();

    let mut heat_input = [Power::ZERO; N];
    for (&node, power) in tank.heaters.iter().zip(&input.heater_powers) {
        heat_input[node] += power.into_inner();
    }

    let ports = std::array::from_fn(|p| {
        let flow = input.port_flows[p];
        PortDistribution::new(
            tank.ports[p],
            flow.mass_rate.into_inner(),
            flow.inlet_temperature,
        )
    });

    let context = StepContext {
        nodes: &tank.geometry.nodes,
        loss_conductances: &tank.loss_conductances,
        conductance: tank.conductance,
        specific_heat: tank.specific_heat,
        environment: input.environment,
        heat_input,
        ports,
    };

    let Solution {
        coefficients,
        mut nodes,
        frozen,
        iterations,
        limit_reached,
    } = converge(&input.temperatures, dt, &tank.solver, |frozen| {
        coefficients::build(&context, frozen)
    });

    let capacitances = tank.geometry.nodes.map(|node| node.capacitance);
    let weights = coefficients.map(|c| integrate::average_weight(c.a, dt));
    let mixing_events = mixing::mix(&mut nodes, &capacitances, &weights);

    let temperatures = nodes.map(|node| node.end);
    let energy = energy_balance(&context, &input.temperatures, &nodes, &frozen, dt);
    let state_of_charge =
        state_of_charge(&temperatures, &tank.soc_reference).map_err(StepError::StateOfCharge)?;

    debug!(
        iterations,
        mixing_events,
        residual = energy.residual().value,
        "tank step solved"
    );

    Ok(StepResults {
        temperatures,
        average_temperatures: nodes.map(|node| node.average),
        thermostats: tank.thermostats.map(|j| temperatures[j]),
        state_of_charge,
        mean_temperature: mean(&temperatures),
        energy,
        iterations,
        iteration_limit_reached: limit_reached,
        mixing_events,
    })
}

/// Repeats coefficient building and integration until temperatures settle.
///
/// Every pass integrates from `initial`; only the temperatures that
/// `build` sees change between passes.
/// The loop stops when no node's average temperature moved by more than
/// the tolerance, or after `max_iters` passes.
fn converge<const N: usize>(
    initial: &[ThermodynamicTemperature; N],
    dt: Time,
    config: &SolverConfig,
    mut build: impl FnMut(&[ThermodynamicTemperature; N]) -> [Coefficients; N],
) -> Solution<N> {
    let mut frozen = *initial;
    let mut coefficients = [Coefficients::ZERO; N];
    let mut nodes = initial.map(|t| NodeTemperatures { end: t, average: t });
    let mut iterations = 0;
    let mut phase = Phase::BuildCoefficients;

    loop {
        phase = match phase {
            Phase::BuildCoefficients => {
                coefficients = build(&frozen);
                Phase::Integrate
            }
            Phase::Integrate => {
                nodes = std::array::from_fn(|j| {
                    integrate::integrate(initial[j], coefficients[j], dt)
                });
                iterations += 1;
                Phase::Check
            }
            Phase::Check => {
                let settled = nodes.iter().zip(&frozen).all(|(node, previous)| {
                    node.average.minus(*previous).abs() <= config.temp_tol
                });
                if settled {
                    Phase::Converged
                } else if iterations >= config.max_iters {
                    Phase::IterationLimit
                } else {
                    frozen = nodes.map(|node| node.average);
                    Phase::BuildCoefficients
                }
            }
            Phase::Converged | Phase::IterationLimit => break,
        };
    }

    let limit_reached = phase == Phase::IterationLimit;
    if limit_reached {
        warn!(
            iterations,
            "tank temperatures did not settle before the iteration limit"
        );
    }

    Solution {
        coefficients,
        nodes,
        frozen,
        iterations,
        limit_reached,
    }
}

/// Energy flows over the step, from the mixed node temperatures.
fn energy_balance<const N: usize, const P: usize>(
    context: &StepContext<'_, N, P>,
    initial: &[ThermodynamicTemperature; N],
    nodes: &[NodeTemperatures; N],
    frozen: &[ThermodynamicTemperature; N],
    dt: Time,
) -> EnergyBalance<P> {
    let cp = context.specific_heat;

    let delivered = context.ports.each_ref().map(|port| {
        let t_mains = port.mains_temperature.above_absolute_zero();
        let inbound = port.inbound_temperatures(frozen);
        let rate: Power = port
            .nodes
            .iter()
            .zip(nodes)
            .zip(&inbound)
            .map(|((flow, node), t_in)| {
                flow.outbound * cp * node.average.above_absolute_zero()
                    - flow.mains * cp * t_mains
                    - flow.inbound * cp * t_in.above_absolute_zero()
            })
            .sum();
        rate * dt
    });

    let losses = nodes
        .iter()
        .zip(context.loss_conductances)
        .map(|(node, ua)| {
            ua.zip_with(context.environment, |ua, t_ambient| -> Energy {
                ua * node.average.minus(t_ambient) * dt
            })
        })
        .fold(Surfaces::uniform(Energy::ZERO), |total, node| total + node);

    let stored_change = nodes
        .iter()
        .zip(initial)
        .zip(context.nodes)
        .map(|((node, t0), geometry)| -> Energy { geometry.capacitance * node.end.minus(*t0) })
        .sum();

    EnergyBalance {
        delivered,
        heater_input: context.heat_input.iter().copied().sum::<Power>() * dt,
        losses,
        stored_change,
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean<const N: usize>(temperatures: &[ThermodynamicTemperature; N]) -> ThermodynamicTemperature {
    let total: f64 = temperatures.iter().map(|t| t.get::<kelvin>()).sum();
    ThermodynamicTemperature::new::<kelvin>(total / N as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::TemperatureInterval, temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::degree_celsius, time::second,
    };

    use crate::support::units::InverseTime;

    use super::super::test_support::t_c;

    fn config(max_iters: usize) -> SolverConfig {
        SolverConfig {
            max_iters,
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-6),
        }
    }

    fn warming() -> Coefficients {
        Coefficients {
            a: InverseTime::ZERO,
            b: TemperatureInterval::new::<delta_kelvin>(1.0) / Time::new::<second>(100.0),
        }
    }

    #[test]
    fn fixed_coefficients_settle_on_second_pass() {
        let dt = Time::new::<second>(100.0);
        let mut builds = 0;

        let solution = converge(&[t_c(40.0); 3], dt, &config(20), |_| {
            builds += 1;
            [warming(); 3]
        });

        assert_eq!(solution.iterations, 2);
        assert_eq!(builds, 2);
        assert!(!solution.limit_reached);
        for node in solution.nodes {
            assert!((node.end.get::<degree_celsius>() - 41.0).abs() < 1e-9);
            assert!((node.average.get::<degree_celsius>() - 40.5).abs() < 1e-9);
        }
    }

    #[test]
    fn single_pass_limit_is_reported() {
        let dt = Time::new::<second>(100.0);

        let solution = converge(&[t_c(40.0); 2], dt, &config(1), |_| [warming(); 2]);

        assert_eq!(solution.iterations, 1);
        assert!(solution.limit_reached);
        assert_eq!(solution.frozen, [t_c(40.0); 2]);
    }

    #[test]
    fn frozen_temperatures_feed_the_next_pass() {
        let dt = Time::new::<second>(100.0);
        let mut seen = Vec::new();

        converge(&[t_c(40.0)], dt, &config(20), |frozen| {
            seen.push(frozen[0].get::<degree_celsius>());
            [warming()]
        });

        assert_eq!(seen.len(), 2);
        assert!((seen[0] - 40.0).abs() < 1e-9);
        assert!((seen[1] - 40.5).abs() < 1e-9);
    }

    #[test]
    fn mean_of_node_temperatures() {
        let mean = mean(&[t_c(60.0), t_c(50.0), t_c(40.0), t_c(30.0)]);
        assert!((mean.get::<degree_celsius>() - 45.0).abs() < 1e-9);
    }
}
