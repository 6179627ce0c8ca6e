use super::error::SearchError;
use super::index::{IndexState, NeighborIndex, bucket_of};
use super::record::Record;
use crate::core::models::atom::Atom;
use nalgebra::{Point3, Vector3};

/// Lattice shift of the periodic copy a stencil bucket belongs to.
#[inline]
fn lattice_shift(coord: isize, n: usize) -> f64 {
    if coord >= n as isize {
        -1.0
    } else if coord < 0 {
        1.0
    } else {
        0.0
    }
}

impl<'m> NeighborIndex<'m> {
    /// Calls `visit` with every record closer than `radius` to `pos` and
    /// compatible with `altloc`, together with its squared distance.
    ///
    /// Distances follow the minimum-image convention of the unit cell. Only
    /// the 27 buckets around the point are scanned, so results are complete
    /// only for `radius <= radius_specified()`. A non-positive radius yields
    /// nothing. The order of visits is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotInitialized`] if the index has no model.
    pub fn for_each<'s, F>(
        &'s self,
        pos: &Point3<f64>,
        altloc: Option<char>,
        radius: f32,
        mut visit: F,
    ) -> Result<(), SearchError>
    where
        F: FnMut(&'s Record, f32),
    {
        self.try_for_each(pos, altloc, radius, |record, dist_sq| {
            visit(record, dist_sq);
            Ok::<(), SearchError>(())
        })
    }

    /// Fallible form of [`NeighborIndex::for_each`]; the first error returned
    /// by `visit` stops the scan and is propagated.
    pub(crate) fn try_for_each<'s, F, E>(
        &'s self,
        pos: &Point3<f64>,
        altloc: Option<char>,
        radius: f32,
        mut visit: F,
    ) -> Result<(), E>
    where
        F: FnMut(&'s Record, f32) -> Result<(), E>,
        E: From<SearchError>,
    {
        if self.state() == IndexState::Uninitialized {
            return Err(SearchError::NotInitialized("a proximity query").into());
        }
        if radius.is_nan() || radius <= 0.0 {
            return Ok(());
        }

        let grid = self.grid();
        let fr = grid.unit_cell.fractionalize(pos).wrap_to_unit();
        let u0 = bucket_of(fr.x(), grid.nu) as isize;
        let v0 = bucket_of(fr.y(), grid.nv) as isize;
        let w0 = bucket_of(fr.z(), grid.nw) as isize;
        let radius_sq = radius * radius;

        for w in w0 - 1..=w0 + 1 {
            let dw = lattice_shift(w, grid.nw);
            for v in v0 - 1..=v0 + 1 {
                let dv = lattice_shift(v, grid.nv);
                for u in u0 - 1..=u0 + 1 {
                    let du = lattice_shift(u, grid.nu);
                    let bucket = &grid.data[grid.index_q(u, v, w)];
                    if bucket.is_empty() {
                        continue;
                    }
                    let reference = grid
                        .unit_cell
                        .orthogonalize(&(fr + Vector3::new(du, dv, dw)));
                    for record in bucket {
                        let dist_sq = record.dist_sq(&reference);
                        if dist_sq < radius_sq && record.is_same_conformer(altloc) {
                            visit(record, dist_sq)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Collects every record within `radius` of `pos`.
    pub fn find_atoms(
        &self,
        pos: &Point3<f64>,
        altloc: Option<char>,
        radius: f32,
    ) -> Result<Vec<&Record>, SearchError> {
        let mut found = Vec::new();
        self.try_for_each(pos, altloc, radius, |record, _| {
            found.push(record);
            Ok::<(), SearchError>(())
        })?;
        Ok(found)
    }

    /// Collects records around `atom` whose distance lies in
    /// `(min_dist, max_dist)`, honouring the atom's altloc.
    ///
    /// With `min_dist` of zero the atom itself (at distance zero) is excluded.
    pub fn find_neighbors(
        &self,
        atom: &Atom,
        min_dist: f32,
        max_dist: f32,
    ) -> Result<Vec<&Record>, SearchError> {
        let min_dist_sq = min_dist * min_dist;
        let mut found = Vec::new();
        self.try_for_each(&atom.position, atom.altloc, max_dist, |record, dist_sq| {
            if dist_sq > min_dist_sq {
                found.push(record);
            }
            Ok::<(), SearchError>(())
        })?;
        Ok(found)
    }

    /// Finds the record closest to `pos` within `radius_specified()`.
    ///
    /// Altlocs are ignored. Among equally distant records the first one
    /// scanned wins. Returns `None` if nothing lies within the radius.
    pub fn find_nearest_atom(&self, pos: &Point3<f64>) -> Result<Option<&Record>, SearchError> {
        let mut best: Option<&Record> = None;
        let mut best_dist_sq = self.radius_specified() * self.radius_specified();
        self.try_for_each(pos, None, self.radius_specified(), |record, dist_sq| {
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best = Some(record);
            }
            Ok::<(), SearchError>(())
        })?;
        Ok(best)
    }

    /// Squared periodic distance between two points in the index's unit cell,
    /// including symmetry images.
    pub fn dist_sq(&self, pos1: &Point3<f64>, pos2: &Point3<f64>) -> f64 {
        self.unit_cell().distance_sq(pos1, pos2)
    }

    pub fn dist(&self, pos1: &Point3<f64>, pos2: &Point3<f64>) -> f64 {
        self.dist_sq(pos1, pos2).sqrt()
    }
}
