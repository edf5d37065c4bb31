use std::ops::Add;

/// A value for each of the tank's three exterior surfaces.
///
/// Used for ambient temperatures, loss coefficients, loss areas, and the
/// per-surface energy lost over a step.
///
/// ```
/// use twine_tank::models::thermal::tank::Surfaces;
///
/// let nodes = Surfaces { top: 1, edge: 6, bottom: 1 };
/// assert_eq!(nodes.total(), 8);
/// assert_eq!(Surfaces::uniform(2).map(|x| x * 3), Surfaces::uniform(6));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Surfaces<T> {
    pub top: T,
    pub edge: T,
    pub bottom: T,
}

impl<T: Copy> Surfaces<T> {
    /// Uses the same value for every surface.
    #[must_use]
    pub fn uniform(value: T) -> Self {
        Self {
            top: value,
            edge: value,
            bottom: value,
        }
    }

    /// Applies `f` to each surface's value.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Surfaces<U> {
        Surfaces {
            top: f(self.top),
            edge: f(self.edge),
            bottom: f(self.bottom),
        }
    }

    /// Combines two per-surface values surface by surface.
    #[must_use]
    pub fn zip_with<U, R>(
        self,
        other: Surfaces<U>,
        mut f: impl FnMut(T, U) -> R,
    ) -> Surfaces<R> {
        Surfaces {
            top: f(self.top, other.top),
            edge: f(self.edge, other.edge),
            bottom: f(self.bottom, other.bottom),
        }
    }

    /// Pairs each value with the surface name, top to bottom.
    pub(crate) fn named(self) -> [(&'static str, T); 3] {
        [("top", self.top), ("edge", self.edge), ("bottom", self.bottom)]
    }
}

impl<T: Add<Output = T>> Surfaces<T> {
    /// Returns the sum over all three surfaces.
    pub fn total(self) -> T {
        self.top + self.edge + self.bottom
    }
}

impl<T: Add<Output = T>> Add for Surfaces<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            top: self.top + rhs.top,
            edge: self.edge + rhs.edge,
            bottom: self.bottom + rhs.bottom,
        }
    }
}
