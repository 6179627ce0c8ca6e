use super::config::IndexConfig;
use super::error::SearchError;
use super::record::Record;
use crate::core::cell::{Fractional, UnitCell};
use crate::core::grid::{Grid, SizeRounding};
use crate::core::models::atom::Atom;
use crate::core::models::model::{AtomRef, Model};
use nalgebra::Vector3;
use tracing::{debug, info};

/// Minimum number of buckets along each axis. Queries visit a 3x3x3 stencil
/// of buckets, which must not wrap onto itself.
pub const MIN_BUCKETS_PER_AXIS: usize = 3;

/// Margin added around a non-crystal model, in multiples of the maximum radius.
const NON_CRYSTAL_MARGIN_FACTOR: f64 = 4.0;

/// Lifecycle of a [`NeighborIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexState {
    /// No model attached; every operation except initialization fails.
    #[default]
    Uninitialized,
    /// Grid sized for a model; buckets are empty.
    Sized,
    /// Buckets hold the records of every indexed atom and its images.
    Populated,
}

/// A cell-linked-list index over the atoms of a [`Model`].
///
/// The unit cell is divided into a uniform grid of buckets at least
/// `radius_specified` wide. Every atom is stored once per image (its own
/// position plus each symmetry image of the cell), wrapped into the cell.
///
/// The index borrows the model for its whole lifetime, so the model cannot be
/// structurally modified while the index exists. To annotate atoms, collect
/// references with [`NeighborIndex::contacts`] and apply them through
/// [`Model::atom_mut`] after the index is dropped.
#[derive(Debug, Default)]
pub struct NeighborIndex<'m> {
    model: Option<&'m Model>,
    grid: Grid<Vec<Record>>,
    radius_specified: f32,
    state: IndexState,
}

impl<'m> NeighborIndex<'m> {
    /// Creates an index sized for `model` but not yet populated.
    ///
    /// # Errors
    ///
    /// See [`NeighborIndex::initialize`].
    pub fn new(model: &'m Model, cell: &UnitCell, max_radius: f32) -> Result<Self, SearchError> {
        let mut index = Self::default();
        index.initialize(model, cell, max_radius)?;
        Ok(index)
    }

    /// Creates and populates an index in one step.
    pub fn build(model: &'m Model, cell: &UnitCell, config: &IndexConfig) -> Result<Self, SearchError> {
        let mut index = Self::new(model, cell, config.max_radius)?;
        index.populate(config.include_hydrogens)?;
        Ok(index)
    }

    /// Attaches a model and sizes the grid for queries up to `max_radius`.
    ///
    /// A crystal cell is used as is. Otherwise an orthorhombic box is
    /// synthesized from the model's bounding box enlarged by four times
    /// `max_radius` along every axis, so that periodic wrapping never brings
    /// two atoms spuriously close. Any previous contents are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRadius`] if `max_radius` is not a
    /// positive finite number.
    pub fn initialize(
        &mut self,
        model: &'m Model,
        cell: &UnitCell,
        max_radius: f32,
    ) -> Result<(), SearchError> {
        if !max_radius.is_finite() || max_radius <= 0.0 {
            return Err(SearchError::InvalidRadius(max_radius));
        }

        let unit_cell = if cell.is_crystal() {
            cell.clone()
        } else {
            let margin = NON_CRYSTAL_MARGIN_FACTOR * max_radius as f64;
            let size = model
                .bounding_box()
                .map_or_else(Vector3::zeros, |bbox| bbox.size())
                .add_scalar(margin);
            debug!(
                "Model has no crystal cell; using a {:.2} x {:.2} x {:.2} box.",
                size.x, size.y, size.z
            );
            UnitCell::orthorhombic(size.x, size.y, size.z)?
        };

        let mut grid = Grid::new(unit_cell);
        grid.set_size_from_spacing(max_radius as f64, SizeRounding::Coarser)?;
        if grid.nu < MIN_BUCKETS_PER_AXIS
            || grid.nv < MIN_BUCKETS_PER_AXIS
            || grid.nw < MIN_BUCKETS_PER_AXIS
        {
            let (nu, nv, nw) = (
                grid.nu.max(MIN_BUCKETS_PER_AXIS),
                grid.nv.max(MIN_BUCKETS_PER_AXIS),
                grid.nw.max(MIN_BUCKETS_PER_AXIS),
            );
            grid.try_set_size(nu, nv, nw)?;
        }
        debug!(
            "Neighbor grid: {} x {} x {} buckets for radius {:.2}.",
            grid.nu, grid.nv, grid.nw, max_radius
        );

        self.model = Some(model);
        self.grid = grid;
        self.radius_specified = max_radius;
        self.state = IndexState::Sized;
        Ok(())
    }

    /// Fills the buckets with one record per atom and image.
    ///
    /// Existing records are cleared first, so calling this again rebuilds the
    /// index from the model. Returns the number of records inserted.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotInitialized`] if no model is attached.
    pub fn populate(&mut self, include_hydrogens: bool) -> Result<usize, SearchError> {
        let model = self.model.ok_or(SearchError::NotInitialized("populate"))?;
        let grid = &mut self.grid;
        grid.fill_default();

        let images = grid.unit_cell.images().to_vec();
        let mut count = 0;
        for (aref, atom) in model.atom_refs() {
            if !include_hydrogens && atom.is_hydrogen() {
                continue;
            }
            let frac0 = grid.unit_cell.fractionalize(&atom.position);
            insert(grid, frac0.wrap_to_unit(), atom, 0, aref);
            for (n, image) in images.iter().enumerate() {
                insert(grid, image.apply(&frac0).wrap_to_unit(), atom, n + 1, aref);
            }
            count += 1 + images.len();
        }

        info!(
            "Indexed {} record(s) from {} atom(s) with {} symmetry image(s).",
            count,
            model.atom_count(),
            images.len()
        );
        self.state = IndexState::Populated;
        Ok(count)
    }

    pub fn state(&self) -> IndexState {
        self.state
    }

    pub fn grid(&self) -> &Grid<Vec<Record>> {
        &self.grid
    }

    pub fn unit_cell(&self) -> &UnitCell {
        &self.grid.unit_cell
    }

    /// The radius the grid was sized for. Queries with a larger radius may
    /// miss atoms.
    pub fn radius_specified(&self) -> f32 {
        self.radius_specified
    }

    pub fn model(&self) -> Option<&'m Model> {
        self.model
    }

    pub fn record_count(&self) -> usize {
        self.grid.data.iter().map(Vec::len).sum()
    }

    pub(crate) fn require_model(&self, operation: &'static str) -> Result<&'m Model, SearchError> {
        self.model.ok_or(SearchError::NotInitialized(operation))
    }
}

/// Bucket coordinate of a wrapped fractional coordinate.
///
/// Wrapping can round a tiny negative value up to exactly 1.0, which is
/// clamped into the last bucket.
#[inline]
pub(crate) fn bucket_of(f: f64, n: usize) -> usize {
    ((f * n as f64) as usize).min(n - 1)
}

fn insert(grid: &mut Grid<Vec<Record>>, frac: Fractional, atom: &Atom, image: usize, aref: AtomRef) {
    let pos = grid.unit_cell.orthogonalize(&frac);
    let idx = grid.index_n(
        bucket_of(frac.x(), grid.nu),
        bucket_of(frac.y(), grid.nv),
        bucket_of(frac.z(), grid.nw),
    );
    grid.data[idx].push(Record::new(&pos, atom, image, aref));
}
