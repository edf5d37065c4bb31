//! Buoyancy mixing of temperature inversions.

use uom::si::{
    f64::{HeatCapacity, ThermodynamicTemperature},
    heat_capacity::joule_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use super::integrate::NodeTemperatures;

/// Mixes inverted node blocks until the stack cools monotonically downward.
///
/// Starting at the first node colder than the node below it, a block grows
/// downward while the next node is hotter than the block's capacitance-weighted
/// temperature. The block is then set to that temperature, which conserves
/// `Σ C·T`. Scanning restarts from the top until no inversion remains.
///
/// Each node's step-average temperature moves by its end-temperature change
/// times `average_weights[k]`.
///
/// Returns the number of blocks mixed.
pub(super) fn mix<const N: usize>(
    nodes: &mut [NodeTemperatures; N],
    capacitances: &[HeatCapacity; N],
    average_weights: &[f64; N],
) -> usize {
    let mut end = nodes.map(|node| node.end.get::<kelvin>());
    let mut average = nodes.map(|node| node.average.get::<kelvin>());
    let capacitance = capacitances.map(|c| c.get::<joule_per_kelvin>());

    let mut events = 0;
    while let Some(start) = (0..N.saturating_sub(1)).find(|&j| end[j] < end[j + 1]) {
        let mut last = start;
        let mut energy = end[start] * capacitance[start];
        let mut total = capacitance[start];

        while last + 1 < N && end[last + 1] > energy / total {
            last += 1;
            energy += end[last] * capacitance[last];
            total += capacitance[last];
        }

        let mixed = energy / total;
        for k in start..=last {
            average[k] += (mixed - end[k]) * average_weights[k];
            end[k] = mixed;
        }
        events += 1;
    }

    for (node, (end, average)) in nodes.iter_mut().zip(end.into_iter().zip(average)) {
        node.end = ThermodynamicTemperature::new::<kelvin>(end);
        node.average = ThermodynamicTemperature::new::<kelvin>(average);
    }
    events
}
