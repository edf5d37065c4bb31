//! Port flow paths through the node stack.

use std::cmp::Ordering;

use uom::{
    ConstZero,
    si::{
        f64::{MassRate, ThermodynamicTemperature},
        mass_rate::kilogram_per_second,
        thermodynamic_temperature::kelvin,
    },
};

/// Node indices of a port's inlet and outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PortNodes {
    pub inlet: usize,
    pub outlet: usize,
}

/// Mass flows of a single port through a single node.
///
/// Every node satisfies `mains + inbound = outbound`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NodeFlow {
    /// Water entering from outside the tank.
    pub mains: MassRate,

    /// Water entering from an adjacent node.
    pub inbound: MassRate,

    /// Water leaving to an adjacent node or out of the tank.
    pub outbound: MassRate,
}

impl NodeFlow {
    const IDLE: Self = Self {
        mains: MassRate::ZERO,
        inbound: MassRate::ZERO,
        outbound: MassRate::ZERO,
    };
}

/// The path one port's flow takes through an `N`-node stack.
///
/// Water enters at the inlet node and travels node by node toward the
/// outlet node, where it leaves the tank.
/// Mass flows depend only on the port flow and stay fixed over a step.
/// Inbound temperatures depend on node temperatures and are re-evaluated
/// on every convergence pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PortDistribution<const N: usize> {
    pub nodes: [NodeFlow; N],
    pub mains_temperature: ThermodynamicTemperature,
    outlet: usize,
}

impl<const N: usize> PortDistribution<N> {
    /// Distributes a port's mass flow over the stack.
    pub(crate) fn new(
        port: PortNodes,
        mass_rate: MassRate,
        mains_temperature: ThermodynamicTemperature,
    ) -> Self {
        let PortNodes { inlet, outlet } = port;
        let mut nodes = [NodeFlow::IDLE; N];
        nodes[inlet].mains = mass_rate;

        // Above the outlet, water moves down from the node above.
        for j in 0..outlet {
            let inbound = if j == 0 {
                MassRate::ZERO
            } else {
                nodes[j - 1].outbound
            };
            nodes[j].inbound = inbound;
            nodes[j].outbound = nodes[j].mains + inbound;
        }

        // Below the outlet, water moves up from the node below.
        for j in (outlet + 1..N).rev() {
            let inbound = if j + 1 == N {
                MassRate::ZERO
            } else {
                nodes[j + 1].outbound
            };
            nodes[j].inbound = inbound;
            nodes[j].outbound = nodes[j].mains + inbound;
        }

        let above = outlet
            .checked_sub(1)
            .map_or(MassRate::ZERO, |k| nodes[k].outbound);
        let below = nodes.get(outlet + 1).map_or(MassRate::ZERO, |n| n.outbound);
        nodes[outlet].inbound = above + below;
        nodes[outlet].outbound = mass_rate;

        Self {
            nodes,
            mains_temperature,
            outlet,
        }
    }

    /// Temperature of the water entering each node from its neighbor.
    ///
    /// Nodes at the far ends of the flow path have no upstream neighbor and
    /// report their own temperature.
    /// The outlet node mixes whatever arrives from above and below, weighted
    /// by flow, and reports its own temperature when nothing arrives.
    pub(crate) fn inbound_temperatures(
        &self,
        temps: &[ThermodynamicTemperature; N],
    ) -> [ThermodynamicTemperature; N] {
        std::array::from_fn(|j| match j.cmp(&self.outlet) {
            Ordering::Less => temps[j.saturating_sub(1)],
            Ordering::Greater => temps[(j + 1).min(N - 1)],
            Ordering::Equal => self.outlet_inbound_temperature(temps),
        })
    }

    fn outlet_inbound_temperature(
        &self,
        temps: &[ThermodynamicTemperature; N],
    ) -> ThermodynamicTemperature {
        let o = self.outlet;
        let neighbors = [o.checked_sub(1), Some(o + 1).filter(|&k| k < N)];

        let (flow, weighted) = neighbors
            .into_iter()
            .flatten()
            .fold((0.0, 0.0), |(flow, weighted), k| {
                let m = self.nodes[k].outbound.get::<kilogram_per_second>();
                (flow + m, weighted + m * temps[k].get::<kelvin>())
            });

        if flow > 0.0 {
            ThermodynamicTemperature::new::<kelvin>(weighted / flow)
        } else {
            temps[o]
        }
    }
}
