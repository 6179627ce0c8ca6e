use crate::core::cell::UnitCell;
use thiserror::Error;

/// Upper bound on the number of grid points a checked resize accepts.
pub const MAX_GRID_POINTS: usize = 1 << 25;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("Grid spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64),

    #[error("Grid of {nu} x {nv} x {nw} points exceeds the limit of {}", MAX_GRID_POINTS)]
    TooLarge { nu: usize, nv: usize, nw: usize },
}

/// Total number of points of a `nu x nv x nw` grid, if it stays within
/// [`MAX_GRID_POINTS`].
pub fn checked_point_count(nu: usize, nv: usize, nw: usize) -> Result<usize, GridError> {
    nu.checked_mul(nv)
        .and_then(|n| n.checked_mul(nw))
        .filter(|&n| n <= MAX_GRID_POINTS)
        .ok_or(GridError::TooLarge { nu, nv, nw })
}

/// How to round when deriving axis counts from a target spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRounding {
    /// Round counts down: every cell is at least as wide as the spacing.
    Coarser,
    /// Round counts up: every cell is at most as wide as the spacing.
    Denser,
}

/// Dense periodic 3D grid covering one unit cell.
///
/// Values are stored in a flat vector with `u` running fastest. Element
/// `(u, v, w)` covers the fractional box `[u/nu, (u+1)/nu) x ...`.
#[derive(Debug, Clone, Default)]
pub struct Grid<T> {
    pub nu: usize,
    pub nv: usize,
    pub nw: usize,
    pub data: Vec<T>,
    pub unit_cell: UnitCell,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(unit_cell: UnitCell) -> Self {
        Self {
            nu: 0,
            nv: 0,
            nw: 0,
            data: Vec::new(),
            unit_cell,
        }
    }

    /// Resizes the grid, resetting every element to `T::default()`.
    ///
    /// The product of the counts must fit in memory; use
    /// [`Grid::try_set_size`] for counts derived from user input.
    pub fn set_size_without_checking(&mut self, nu: usize, nv: usize, nw: usize) {
        self.nu = nu;
        self.nv = nv;
        self.nw = nw;
        self.data.clear();
        self.data.resize(nu * nv * nw, T::default());
    }

    /// Resizes the grid like [`Grid::set_size_without_checking`], after
    /// checking the point count.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TooLarge`] if the product of the counts overflows
    /// or exceeds [`MAX_GRID_POINTS`]. The grid is left unchanged.
    pub fn try_set_size(&mut self, nu: usize, nv: usize, nw: usize) -> Result<(), GridError> {
        checked_point_count(nu, nv, nw)?;
        self.set_size_without_checking(nu, nv, nw);
        Ok(())
    }

    /// Chooses axis counts so that cells measure roughly `spacing` across.
    ///
    /// The width of an axis is the perpendicular distance between the
    /// corresponding faces of the unit cell. Every axis gets at least one cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidSpacing`] if `spacing` is not a positive
    /// finite number, and [`GridError::TooLarge`] if the resulting grid would
    /// be too big.
    pub fn set_size_from_spacing(
        &mut self,
        spacing: f64,
        rounding: SizeRounding,
    ) -> Result<(), GridError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(GridError::InvalidSpacing(spacing));
        }
        let [su, sv, sw] = self.unit_cell.plane_spacings();
        let count = |width: f64| {
            let n = match rounding {
                SizeRounding::Coarser => (width / spacing).floor(),
                SizeRounding::Denser => (width / spacing).ceil(),
            };
            (n as usize).max(1)
        };
        self.try_set_size(count(su), count(sv), count(sw))
    }

    /// Clears every element without changing the grid size.
    pub fn fill_default(&mut self) {
        for value in &mut self.data {
            *value = T::default();
        }
    }
}

impl<T> Grid<T> {
    pub fn point_count(&self) -> usize {
        self.nu * self.nv * self.nw
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Index of `(u, v, w)`; the coordinates must already lie within the grid.
    #[inline]
    pub fn index_n(&self, u: usize, v: usize, w: usize) -> usize {
        debug_assert!(u < self.nu && v < self.nv && w < self.nw);
        (w * self.nv + v) * self.nu + u
    }

    /// Index of `(u, v, w)` after wrapping each coordinate into the grid.
    #[inline]
    pub fn index_q(&self, u: isize, v: isize, w: isize) -> usize {
        let wrap = |x: isize, n: usize| x.rem_euclid(n as isize) as usize;
        self.index_n(wrap(u, self.nu), wrap(v, self.nv), wrap(w, self.nw))
    }

    pub fn get(&self, u: isize, v: isize, w: isize) -> &T {
        &self.data[self.index_q(u, v, w)]
    }

    pub fn get_mut(&mut self, u: isize, v: isize, w: isize) -> &mut T {
        let idx = self.index_q(u, v, w);
        &mut self.data[idx]
    }
}
