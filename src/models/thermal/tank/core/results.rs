use uom::{
    ConstZero,
    si::{
        f64::{Energy, Ratio, ThermodynamicTemperature},
        energy::joule,
        ratio::ratio,
    },
};

use crate::support::{
    constraint::{Constrained, ConstraintError, UnitInterval},
    units::TemperatureDifference,
};

use super::{SocReference, Surfaces};

/// Results of advancing a tank by one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResults<const N: usize, const P: usize, const S: usize> {
    /// Node temperatures at the end of the step, top to bottom.
    ///
    /// These are never inverted: each node is at least as warm as the node below.
    pub temperatures: [ThermodynamicTemperature; N],

    /// Node temperatures averaged over the step.
    pub average_temperatures: [ThermodynamicTemperature; N],

    /// End-of-step temperature at each thermostat.
    pub thermostats: [ThermodynamicTemperature; S],

    pub state_of_charge: Constrained<Ratio, UnitInterval>,

    /// Arithmetic mean of the end-of-step node temperatures.
    pub mean_temperature: ThermodynamicTemperature,

    pub energy: EnergyBalance<P>,

    /// Coefficient/integration passes performed.
    pub iterations: usize,

    /// Whether the step stopped at the iteration limit before temperatures settled.
    pub iteration_limit_reached: bool,

    /// Number of inverted node blocks mixed.
    pub mixing_events: usize,
}

/// Energy flows over one step.
///
/// Signs follow the tank's point of view: heater input adds energy,
/// losses and delivered heat remove it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBalance<const P: usize> {
    /// Heat carried out by each port's flow, relative to its mains water.
    pub delivered: [Energy; P],

    pub heater_input: Energy,

    /// Heat lost to ambient through each surface.
    pub losses: Surfaces<Energy>,

    /// Change in stored energy, `Σ C·(T_end - T_start)`.
    pub stored_change: Energy,
}

impl<const P: usize> EnergyBalance<P> {
    /// Total heat delivered by all ports.
    #[must_use]
    pub fn total_delivered(&self) -> Energy {
        self.delivered.iter().copied().sum()
    }

    /// Imbalance relative to the largest energy term.
    ///
    /// Computes `stored + losses + delivered - heater` divided by the
    /// largest magnitude among those four terms, or zero if all are zero.
    /// This is a diagnostic; a converged step stays well under 1%.
    #[must_use]
    pub fn residual(&self) -> Ratio {
        let losses = self.losses.total();
        let delivered = self.total_delivered();
        let net = self.stored_change + losses + delivered - self.heater_input;

        let scale = [self.stored_change, losses, delivered, self.heater_input]
            .into_iter()
            .map(|term| term.get::<joule>().abs())
            .fold(0.0, f64::max);

        if scale > 0.0 {
            Ratio::new::<ratio>(net.get::<joule>() / scale)
        } else {
            Ratio::ZERO
        }
    }
}

/// Fraction of the usable energy stored, relative to a fully charged tank.
///
/// Sums each node's excess over the consumption temperature, divides by
/// `N·(T_max - T_consumption)`, and clamps the total to `[0, 1]`.
/// Nodes below the consumption temperature contribute nothing, and a node
/// above `T_max` offsets cooler nodes.
pub(super) fn state_of_charge<const N: usize>(
    temperatures: &[ThermodynamicTemperature; N],
    reference: &SocReference,
) -> Result<Constrained<Ratio, UnitInterval>, ConstraintError> {
    let span = reference.max.minus(reference.consumption);
    let charged: f64 = temperatures
        .iter()
        .map(|t| {
            let excess = (t.minus(reference.consumption) / span).get::<ratio>();
            // NaN passes through so the range check can reject it.
            if excess < 0.0 { 0.0 } else { excess }
        })
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let soc = (charged / N as f64).clamp(0.0, 1.0);
    UnitInterval::new(Ratio::new::<ratio>(soc))
}
