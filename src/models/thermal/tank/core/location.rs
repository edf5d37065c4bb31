use super::error::LocationError;

/// Vertical placement of a port, heater, or thermostat.
///
/// - `HeightFraction(f)`: a fraction of the tank height measured from the
///   bottom, where `0.0` is the bottom and `1.0` the top.
///   Fractions at or above `1.0` map to the top node.
/// - `Node(index)`: a node index directly, where node 0 is the top node.
///
/// Constructors do not check invariants.
/// Locations are validated when the tank is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Location {
    HeightFraction(f64),
    Node(usize),
}

impl Location {
    /// The top of the tank.
    #[must_use]
    pub fn tank_top() -> Self {
        Self::HeightFraction(1.0)
    }

    /// The bottom of the tank.
    #[must_use]
    pub fn tank_bottom() -> Self {
        Self::HeightFraction(0.0)
    }

    /// Returns the index of the node containing this location.
    ///
    /// Node `i` spans the height fractions `[1 - (i+1)/N, 1 - i/N)`, so every
    /// fraction in `[0, 1)` lands in exactly one node.
    pub(super) fn node_index<const N: usize>(self) -> Result<usize, LocationError> {
        match self {
            Self::Node(node) if node < N => Ok(node),
            Self::Node(node) => Err(LocationError::NodeOutOfRange { node, count: N }),
            Self::HeightFraction(fraction) => node_at_fraction::<N>(fraction),
        }
    }
}

/// Locations of a port's inlet and outlet.
///
/// Mains water enters at the inlet node and the same mass flow leaves at
/// the outlet node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortLocation {
    pub inlet: Location,
    pub outlet: Location,
}

/// Height fraction of the upper edge of node `i`.
#[allow(clippy::cast_precision_loss)]
fn upper_edge<const N: usize>(i: usize) -> f64 {
    1.0 - i as f64 / N as f64
}

fn node_at_fraction<const N: usize>(fraction: f64) -> Result<usize, LocationError> {
    if fraction.is_nan() || fraction < 0.0 || N == 0 {
        return Err(LocationError::InvalidFraction(fraction));
    }
    if fraction >= 1.0 {
        return Ok(0);
    }
    (0..N)
        .find(|&i| upper_edge::<N>(i + 1) <= fraction && fraction < upper_edge::<N>(i))
        .ok_or(LocationError::InvalidFraction(fraction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_and_bottom() {
        assert_eq!(Location::tank_top().node_index::<10>(), Ok(0));
        assert_eq!(Location::tank_bottom().node_index::<10>(), Ok(9));
        assert_eq!(Location::HeightFraction(1.5).node_index::<10>(), Ok(0));
    }

    #[test]
    fn boundaries_belong_to_the_lower_node() {
        // Node 0 of a 4-node tank spans [0.75, 1.0).
        assert_eq!(Location::HeightFraction(0.75).node_index::<4>(), Ok(0));
        assert_eq!(Location::HeightFraction(0.7499).node_index::<4>(), Ok(1));
        assert_eq!(Location::HeightFraction(0.5).node_index::<4>(), Ok(1));
        assert_eq!(Location::HeightFraction(0.25).node_index::<4>(), Ok(2));
        assert_eq!(Location::HeightFraction(0.1).node_index::<4>(), Ok(3));
    }

    #[test]
    fn every_fraction_maps_to_a_node() {
        for step in 0..=1000 {
            let fraction = f64::from(step) / 1000.0;
            let node = Location::HeightFraction(fraction).node_index::<7>().unwrap();
            assert!(node < 7, "fraction {fraction} mapped to node {node}");
        }
    }

    #[test]
    fn single_node_holds_everything() {
        for fraction in [0.0, 0.3, 0.999, 1.0] {
            assert_eq!(Location::HeightFraction(fraction).node_index::<1>(), Ok(0));
        }
    }

    #[test]
    fn explicit_nodes() {
        assert_eq!(Location::Node(3).node_index::<5>(), Ok(3));
        assert_eq!(
            Location::Node(5).node_index::<5>(),
            Err(LocationError::NodeOutOfRange { node: 5, count: 5 })
        );
    }

    #[test]
    fn rejects_invalid_fractions() {
        assert!(Location::HeightFraction(-0.1).node_index::<4>().is_err());
        assert!(Location::HeightFraction(f64::NAN).node_index::<4>().is_err());
        assert!(Location::HeightFraction(0.5).node_index::<0>().is_err());
    }
}
