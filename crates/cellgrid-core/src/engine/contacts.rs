use super::config::ContactConfig;
use super::error::SearchError;
use super::index::NeighborIndex;
use super::progress::{Progress, ProgressReporter};
use super::record::Record;
use crate::core::models::model::{AtomRef, Cra, Model};
use std::cmp::Ordering;

/// Atoms processed between two progress events.
const PROGRESS_BATCH: u64 = 256;

/// A contact between two atoms, kept as positional references.
///
/// `second` may be a symmetry image (`image > 0`) of the atom it refers to.
/// References are resolved against the model with [`Model::cra`] or
/// [`Model::atom_mut`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPair {
    pub first: AtomRef,
    pub second: AtomRef,
    pub image: usize,
    pub dist_sq: f32,
}

impl ContactPair {
    pub fn dist(&self) -> f32 {
        self.dist_sq.sqrt()
    }
}

/// Decides whether a raw hit found around the atom `current` is reported.
///
/// Pairs inside one residue are skipped when requested (unless the partner is
/// a symmetry image), each unordered pair is kept only from its lower-ordered
/// atom, and an atom meeting its own image closer than the special-position
/// cutoff is dropped.
fn is_reported(current: AtomRef, hit: &Record, dist_sq: f32, config: &ContactConfig) -> bool {
    if config.skip_intra_residue_links && hit.image == 0 && hit.aref.same_residue(&current) {
        return false;
    }
    match hit.aref.cmp(&current) {
        Ordering::Less => false,
        Ordering::Equal => dist_sq >= config.special_pos_cutoff_sq,
        Ordering::Greater => true,
    }
}

impl<'m> NeighborIndex<'m> {
    fn scan_contacts<F>(
        &self,
        config: &ContactConfig,
        reporter: &ProgressReporter,
        mut visit: F,
    ) -> Result<(), SearchError>
    where
        F: FnMut(&'m Model, AtomRef, &Record, f32) -> Result<(), SearchError>,
    {
        let model = self.require_model("contact search")?;
        reporter.report(Progress::TaskStart {
            total_steps: model.atom_count() as u64,
        });

        let mut pending = 0;
        for (current, atom) in model.atom_refs() {
            self.try_for_each(
                &atom.position,
                atom.altloc,
                config.search_radius,
                |hit, dist_sq| {
                    if is_reported(current, hit, dist_sq, config) {
                        visit(model, current, hit, dist_sq)?;
                    }
                    Ok::<(), SearchError>(())
                },
            )?;

            pending += 1;
            if pending == PROGRESS_BATCH {
                reporter.report(Progress::TaskAdvance { steps: pending });
                pending = 0;
            }
        }
        if pending > 0 {
            reporter.report(Progress::TaskAdvance { steps: pending });
        }
        reporter.report(Progress::TaskFinish);
        Ok(())
    }

    /// Calls `visit` once for every pair of atoms closer than
    /// `config.search_radius`, with the resolved atoms, the image index of the
    /// second atom and the squared distance.
    ///
    /// Atoms are scanned in model order. The search radius should not exceed
    /// [`radius_specified`](NeighborIndex::radius_specified).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotInitialized`] without a model, and
    /// [`SearchError::Model`] if a stored reference no longer resolves.
    pub fn for_each_contact<F>(&self, config: &ContactConfig, visit: F) -> Result<(), SearchError>
    where
        F: FnMut(Cra<'m>, Cra<'m>, usize, f32),
    {
        self.for_each_contact_reported(config, &ProgressReporter::new(), visit)
    }

    /// Like [`for_each_contact`](NeighborIndex::for_each_contact), emitting
    /// task progress per scanned atom.
    pub fn for_each_contact_reported<F>(
        &self,
        config: &ContactConfig,
        reporter: &ProgressReporter,
        mut visit: F,
    ) -> Result<(), SearchError>
    where
        F: FnMut(Cra<'m>, Cra<'m>, usize, f32),
    {
        self.scan_contacts(config, reporter, |model, current, hit, dist_sq| {
            let first = model.cra(current)?;
            let second = hit.resolve(model)?;
            visit(first, second, hit.image, dist_sq);
            Ok(())
        })
    }

    /// Collects all contacts as positional references.
    pub fn contacts(&self, config: &ContactConfig) -> Result<Vec<ContactPair>, SearchError> {
        let mut pairs = Vec::new();
        self.scan_contacts(config, &ProgressReporter::new(), |_, current, hit, dist_sq| {
            pairs.push(ContactPair {
                first: current,
                second: hit.aref,
                image: hit.image,
                dist_sq,
            });
            Ok(())
        })?;
        Ok(pairs)
    }
}
