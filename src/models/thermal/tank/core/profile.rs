use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

/// Starting temperature profile for the first step of a simulation.
///
/// Profiles are built between a minimum and maximum temperature.
///
/// ```
/// use twine_tank::models::thermal::tank::InitialProfile;
/// use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};
///
/// let cold = ThermodynamicTemperature::new::<degree_celsius>(15.0);
/// let hot = ThermodynamicTemperature::new::<degree_celsius>(65.0);
///
/// let profile = InitialProfile::LinearStratified.temperatures::<3>(cold, hot);
/// assert!(profile[0] > profile[1] && profile[1] > profile[2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialProfile {
    /// Every node at the maximum temperature.
    UniformMax,

    /// Every node at the minimum temperature.
    UniformMin,

    /// Linear from the maximum at the top node to the minimum at the bottom node.
    LinearStratified,

    /// Linear from the minimum at the top node to the maximum at the bottom node.
    LinearInverted,

    /// Independent uniform draws in `[min, max]`, reproducible from `seed`.
    RandomUniform { seed: u64 },
}

impl InitialProfile {
    /// Builds the node temperatures for this profile, top to bottom.
    ///
    /// A single-node tank takes the top value of linear profiles.
    #[must_use]
    pub fn temperatures<const N: usize>(
        self,
        min: ThermodynamicTemperature,
        max: ThermodynamicTemperature,
    ) -> [ThermodynamicTemperature; N] {
        let lo = min.get::<kelvin>();
        let hi = max.get::<kelvin>();

        #[allow(clippy::cast_precision_loss)]
        let depth = |j: usize| {
            if N > 1 {
                j as f64 / (N - 1) as f64
            } else {
                0.0
            }
        };

        let values: [f64; N] = match self {
            Self::UniformMax => [hi; N],
            Self::UniformMin => [lo; N],
            Self::LinearStratified => std::array::from_fn(|j| hi + (lo - hi) * depth(j)),
            Self::LinearInverted => std::array::from_fn(|j| lo + (hi - lo) * depth(j)),
            Self::RandomUniform { seed } => {
                let mut rng = Pcg64::seed_from_u64(seed);
                std::array::from_fn(|_| lo + (hi - lo) * rng.random::<f64>())
            }
        };

        values.map(ThermodynamicTemperature::new::<kelvin>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    fn t(celsius: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(celsius)
    }

    fn celsius<const N: usize>(temps: [ThermodynamicTemperature; N]) -> [f64; N] {
        temps.map(|t| t.get::<degree_celsius>())
    }

    #[test]
    fn uniform_profiles() {
        let max = InitialProfile::UniformMax.temperatures::<4>(t(20.0), t(60.0));
        let min = InitialProfile::UniformMin.temperatures::<4>(t(20.0), t(60.0));
        for (hot, cold) in celsius(max).into_iter().zip(celsius(min)) {
            assert_relative_eq!(hot, 60.0, epsilon = 1e-9);
            assert_relative_eq!(cold, 20.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn linear_profiles() {
        let stratified =
            celsius(InitialProfile::LinearStratified.temperatures::<5>(t(20.0), t(60.0)));
        let inverted =
            celsius(InitialProfile::LinearInverted.temperatures::<5>(t(20.0), t(60.0)));

        for (actual, expected) in stratified.into_iter().zip([60.0, 50.0, 40.0, 30.0, 20.0]) {
            assert_relative_eq!(actual, expected, epsilon = 1e-9);
        }
        for (actual, expected) in inverted.into_iter().zip([20.0, 30.0, 40.0, 50.0, 60.0]) {
            assert_relative_eq!(actual, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn single_node_linear_profile_is_top_value() {
        let [only] = InitialProfile::LinearStratified.temperatures::<1>(t(20.0), t(60.0));
        assert_relative_eq!(only.get::<degree_celsius>(), 60.0, epsilon = 1e-9);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn random_profile_is_bounded_and_reproducible() {
        let profile = InitialProfile::RandomUniform { seed: 42 };
        let first = celsius(profile.temperatures::<20>(t(20.0), t(60.0)));
        let again = celsius(profile.temperatures::<20>(t(20.0), t(60.0)));
        let other =
            celsius(InitialProfile::RandomUniform { seed: 7 }.temperatures::<20>(t(20.0), t(60.0)));

        assert_eq!(first, again);
        assert_ne!(first, other);
        assert!(first.iter().all(|&c| (20.0 - 1e-9..=60.0 + 1e-9).contains(&c)));
    }
}
