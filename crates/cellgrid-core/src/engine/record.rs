use crate::core::models::atom::{Atom, is_same_conformer};
use crate::core::models::element::Element;
use crate::core::models::model::{AtomRef, Cra, Model, ModelError};
use nalgebra::Point3;

/// A compact snapshot of one atom (or one of its symmetry images) stored in
/// a grid bucket.
///
/// The position is a single-precision copy of the image position, wrapped
/// into the unit cell. The atom itself is reached through `aref`, which is
/// only meaningful for the model the index was built from and only until that
/// model's containers are resized or reordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub altloc: Option<char>,
    pub element: Element,
    /// 0 for the atom's own position, `n` for the n-th symmetry image of the cell.
    pub image: usize,
    pub aref: AtomRef,
}

impl Record {
    pub(crate) fn new(pos: &Point3<f64>, atom: &Atom, image: usize, aref: AtomRef) -> Self {
        Self {
            x: pos.x as f32,
            y: pos.y as f32,
            z: pos.z as f32,
            altloc: atom.altloc,
            element: atom.element,
            image,
            aref,
        }
    }

    pub fn pos(&self) -> Point3<f64> {
        Point3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Plain (non-periodic) squared distance to `p`.
    #[inline]
    pub fn dist_sq(&self, p: &Point3<f64>) -> f32 {
        (self.pos() - p).norm_squared() as f32
    }

    pub fn is_same_conformer(&self, altloc: Option<char>) -> bool {
        is_same_conformer(self.altloc, altloc)
    }

    /// Resolves the record against the model it was built from.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the reference no longer fits the model.
    pub fn resolve<'a>(&self, model: &'a Model) -> Result<Cra<'a>, ModelError> {
        model.cra(self.aref)
    }

    /// Resolves the record into mutable access to its atom.
    ///
    /// Only atom-level fields may be changed; resizing or reordering the
    /// model's containers invalidates every record of an index built from it.
    pub fn resolve_mut<'a>(&self, model: &'a mut Model) -> Result<&'a mut Atom, ModelError> {
        model.atom_mut(self.aref)
    }
}
