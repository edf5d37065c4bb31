//! Type-level numeric constraints.
//!
//! Tank inputs carry physical sign restrictions: a port flow can't run
//! backwards through its inlet, a heater can't extract heat, and a timestep
//! must move forward. This module expresses those restrictions as types so
//! values are checked once at construction and trusted afterward.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater (mass flows, heater powers, loss coefficients)
//! - [`StrictlyPositive`]: Greater than zero (timesteps, tank volume and height)
//! - [`UnitInterval`]: Closed unit interval `0 ≤ x ≤ 1` (state of charge)
//!
//! Each marker is used with the generic [`Constrained<T, C>`] wrapper,
//! where `C` is the marker type implementing [`Constraint<T>`].
//! Each marker also provides an associated `new()` constructor
//! (e.g., `StrictlyPositive::new(5.0)`).
//!
//! # Extending
//!
//! Custom invariants can be added by implementing [`Constraint<T>`]
//! for a zero-sized marker type.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::{iter::Sum, marker::PhantomData, ops::Add};

use num_traits::Zero;
use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval};

/// A trait for enforcing numeric invariants at construction time.
///
/// Implement this trait for any marker type representing a numeric constraint,
/// such as [`NonNegative`] or [`StrictlyPositive`].
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
///
/// This enum is marked `#[non_exhaustive]` and may include additional variants
/// in future releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A wrapper enforcing a numeric constraint at construction time.
///
/// Combine this with one of the provided marker types (such as [`NonNegative`])
/// or your own [`Constraint<T>`] implementation.
///
/// # Example
///
/// ```
/// use twine_tank::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{f64::Time, time::second};
///
/// let dt = Constrained::<_, StrictlyPositive>::new(Time::new::<second>(60.0)).unwrap();
/// assert_eq!(dt.into_inner().get::<second>(), 60.0);
///
/// assert!(StrictlyPositive::new(Time::new::<second>(0.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Returns a reference to the inner unconstrained value.
impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Sums constrained values for which addition is valid.
///
/// Applies to all constraints that are preserved under addition.
impl<T, C> Sum for Constrained<T, C>
where
    C: Constraint<T>,
    Constrained<T, C>: Add<Output = Self> + Zero,
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |a, b| a + b)
    }
}
