//! Cylinder discretization for stratified tanks.
//!
//! A vertical cylinder is cut into `N` slices of equal height. Each slice
//! gets its volume, heat capacitance, and exterior loss area; the top and
//! bottom caps belong only to the end nodes.

use std::f64::consts::PI;

use uom::{
    ConstZero,
    si::{
        f64::{
            Area, HeatCapacity, HeatTransfer, Length, ThermalConductance, ThermalConductivity,
            Volume,
        },
        length::meter,
        volume::cubic_meter,
    },
};

use crate::support::constraint::StrictlyPositive;

use super::{Fluid, Surfaces, TankError};

/// Largest supported node count.
pub const MAX_NODES: usize = 50;

/// Fixed properties of a single node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    pub volume: Volume,

    /// Thermal capacitance, `ρ·cp·V`.
    pub capacitance: HeatCapacity,

    /// Exterior area exposed through each surface.
    pub loss_area: Surfaces<Area>,
}

/// Node geometry of a vertical cylinder split into `N` equal slices.
///
/// Node 0 is the top slice and node `N - 1` the bottom slice.
/// Only node 0 has a top loss area and only node `N - 1` has a bottom loss
/// area; a single-node tank has both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry<const N: usize> {
    pub nodes: [NodeGeometry; N],
    pub radius: Length,

    /// Cross-section shared by adjacent nodes.
    pub conduction_area: Area,

    /// Distance between adjacent node centers.
    pub conduction_length: Length,
}

impl<const N: usize> Geometry<N> {
    /// Slices a cylinder of the given volume and height into `N` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::NodeCount`] if `N` is zero or above [`MAX_NODES`],
    /// or [`TankError::Geometry`] if the volume or height is not strictly positive.
    pub fn new(volume: Volume, height: Length, fluid: &Fluid) -> Result<Self, TankError> {
        if N == 0 || N > MAX_NODES {
            return Err(TankError::NodeCount { count: N });
        }

        let volume = StrictlyPositive::new(volume)
            .map_err(|source| TankError::Geometry {
                dimension: "volume",
                source,
            })?
            .into_inner();
        let height = StrictlyPositive::new(height)
            .map_err(|source| TankError::Geometry {
                dimension: "height",
                source,
            })?
            .into_inner();

        #[allow(clippy::cast_precision_loss)]
        let n = N as f64;

        let radius = Length::new::<meter>(
            (volume.get::<cubic_meter>() / (PI * height.get::<meter>())).sqrt(),
        );
        let cross_section: Area = radius * radius * PI;
        let edge: Area = radius * height * (2.0 * PI / n);

        let node_volume = volume / n;
        let capacitance: HeatCapacity = fluid.density * fluid.specific_heat * node_volume;

        let nodes = std::array::from_fn(|j| NodeGeometry {
            volume: node_volume,
            capacitance,
            loss_area: Surfaces {
                top: if j == 0 { cross_section } else { Area::ZERO },
                edge,
                bottom: if j + 1 == N { cross_section } else { Area::ZERO },
            },
        });

        Ok(Self {
            nodes,
            radius,
            conduction_area: cross_section,
            conduction_length: height / n,
        })
    }

    /// Conductance between adjacent node centers, `k·A/L`.
    #[must_use]
    pub fn conductance(&self, conductivity: ThermalConductivity) -> ThermalConductance {
        conductivity * self.conduction_area / self.conduction_length
    }

    /// Loss conductance `U·A` of each node's surfaces.
    #[must_use]
    pub fn loss_conductances(
        &self,
        loss_coefficients: Surfaces<HeatTransfer>,
    ) -> [Surfaces<ThermalConductance>; N] {
        self.nodes
            .map(|node| loss_coefficients.zip_with(node.loss_area, |u, area| u * area))
    }

    /// Sum of node volumes.
    #[must_use]
    pub fn total_volume(&self) -> Volume {
        self.nodes.iter().map(|node| node.volume).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter, heat_capacity::joule_per_kelvin,
        heat_transfer::watt_per_square_meter_kelvin, thermal_conductance::watt_per_kelvin,
        thermal_conductivity::watt_per_meter_kelvin, volume::liter,
    };

    fn cylinder<const N: usize>() -> Geometry<N> {
        // r = 0.25 m, H = 1.6 m
        let volume = Volume::new::<cubic_meter>(PI * 0.25 * 0.25 * 1.6);
        Geometry::new(volume, Length::new::<meter>(1.6), &Fluid::water()).unwrap()
    }

    #[test]
    fn slices_cylinder_evenly() {
        let geometry = cylinder::<4>();

        assert_relative_eq!(geometry.radius.get::<meter>(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(geometry.conduction_length.get::<meter>(), 0.4);
        assert_relative_eq!(
            geometry.conduction_area.get::<square_meter>(),
            PI * 0.0625,
            epsilon = 1e-12
        );

        let expected_edge = 2.0 * PI * 0.25 * 1.6 / 4.0;
        for node in &geometry.nodes {
            assert_relative_eq!(
                node.loss_area.edge.get::<square_meter>(),
                expected_edge,
                epsilon = 1e-12
            );
        }

        // ρ·cp·V per node: 990 kg/m³ · 4180 J/kg·K · V/4
        let node_volume = PI * 0.0625 * 1.6 / 4.0;
        assert_relative_eq!(
            geometry.nodes[2].capacitance.get::<joule_per_kelvin>(),
            990.0 * 4180.0 * node_volume,
            max_relative = 1e-12
        );
    }

    #[test]
    fn node_volumes_sum_to_tank_volume() {
        let volume = Volume::new::<liter>(189.0);
        let height = Length::new::<meter>(1.2);
        let geometry = Geometry::<12>::new(volume, height, &Fluid::water()).unwrap();

        assert_relative_eq!(
            geometry.total_volume().get::<liter>(),
            189.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn only_end_nodes_have_caps() {
        let geometry = cylinder::<3>();
        let cap = geometry.conduction_area;

        assert_eq!(geometry.nodes[0].loss_area.top, cap);
        assert_eq!(geometry.nodes[0].loss_area.bottom, Area::ZERO);
        assert_eq!(geometry.nodes[1].loss_area.top, Area::ZERO);
        assert_eq!(geometry.nodes[1].loss_area.bottom, Area::ZERO);
        assert_eq!(geometry.nodes[2].loss_area.top, Area::ZERO);
        assert_eq!(geometry.nodes[2].loss_area.bottom, cap);
    }

    #[test]
    fn single_node_has_both_caps() {
        let geometry = cylinder::<1>();
        let node = geometry.nodes[0];

        assert_eq!(node.loss_area.top, geometry.conduction_area);
        assert_eq!(node.loss_area.bottom, geometry.conduction_area);
        assert_relative_eq!(
            node.loss_area.edge.get::<square_meter>(),
            2.0 * PI * 0.25 * 1.6,
            epsilon = 1e-12
        );
    }

    #[test]
    fn conductances() {
        let geometry = cylinder::<4>();

        let k = ThermalConductivity::new::<watt_per_meter_kelvin>(0.6);
        assert_relative_eq!(
            geometry.conductance(k).get::<watt_per_kelvin>(),
            0.6 * PI * 0.0625 / 0.4,
            epsilon = 1e-12
        );

        let u = Surfaces::uniform(HeatTransfer::new::<watt_per_square_meter_kelvin>(2.0));
        let ua = geometry.loss_conductances(u);
        assert_relative_eq!(
            ua[0].top.get::<watt_per_kelvin>(),
            2.0 * PI * 0.0625,
            epsilon = 1e-12
        );
        assert_relative_eq!(ua[1].top.get::<watt_per_kelvin>(), 0.0);
    }

    #[test]
    fn rejects_bad_configurations() {
        let fluid = Fluid::water();
        let volume = Volume::new::<liter>(189.0);
        let height = Length::new::<meter>(1.2);

        assert!(matches!(
            Geometry::<0>::new(volume, height, &fluid),
            Err(TankError::NodeCount { count: 0 })
        ));
        assert!(matches!(
            Geometry::<51>::new(volume, height, &fluid),
            Err(TankError::NodeCount { count: 51 })
        ));
        assert!(matches!(
            Geometry::<4>::new(Volume::ZERO, height, &fluid),
            Err(TankError::Geometry {
                dimension: "volume",
                ..
            })
        ));
        assert!(matches!(
            Geometry::<4>::new(volume, Length::new::<meter>(-1.0), &fluid),
            Err(TankError::Geometry {
                dimension: "height",
                ..
            })
        ));
    }
}
