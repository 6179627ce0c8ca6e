use super::atom::Atom;
use super::chain::Chain;
use super::residue::Residue;
use crate::core::cell::UnitCell;
use nalgebra::{Point3, Vector3};
use std::fmt;
use thiserror::Error;

/// Errors raised when a positional reference does not resolve against a model.
///
/// These usually mean that the model was structurally modified after an
/// index referring to it was built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Chain index {index} is out of range (model has {len} chains)")]
    ChainOutOfRange { index: usize, len: usize },

    #[error("Residue index {index} is out of range in chain {chain} ({len} residues)")]
    ResidueOutOfRange {
        chain: usize,
        index: usize,
        len: usize,
    },

    #[error("Atom index {index} is out of range in residue {chain}/{residue} ({len} atoms)")]
    AtomOutOfRange {
        chain: usize,
        residue: usize,
        index: usize,
        len: usize,
    },
}

/// Positional handle to an atom: indices of its chain, residue and the atom itself.
///
/// The derived ordering is lexicographic over (chain, residue, atom), which is
/// also the model's iteration order. A handle stays valid only while the
/// chain, residue and atom containers of the model are neither resized nor
/// reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AtomRef {
    pub chain: usize,
    pub residue: usize,
    pub atom: usize,
}

impl AtomRef {
    pub fn new(chain: usize, residue: usize, atom: usize) -> Self {
        Self {
            chain,
            residue,
            atom,
        }
    }

    /// Returns `true` if both handles point into the same residue.
    pub fn same_residue(&self, other: &AtomRef) -> bool {
        self.chain == other.chain && self.residue == other.residue
    }
}

/// A resolved chain/residue/atom triple borrowed from a [`Model`].
#[derive(Debug, Clone, Copy)]
pub struct Cra<'a> {
    pub chain: &'a Chain,
    pub residue: &'a Residue,
    pub atom: &'a Atom,
}

impl fmt::Display for Cra<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.chain.name, self.residue, self.atom.name)?;
        if let Some(altloc) = self.atom.altloc {
            write!(f, ":{}", altloc)?;
        }
        Ok(())
    }
}

/// Axis-aligned bounding box of a set of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn from_point(point: Point3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn add(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }
}

/// One model of a structure: an ordered list of chains.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub number: i32,
    pub chains: Vec<Chain>,
}

impl Model {
    pub fn new(number: i32) -> Self {
        Self {
            number,
            chains: Vec::new(),
        }
    }

    pub fn with_chains(mut self, chains: Vec<Chain>) -> Self {
        self.chains = chains;
        self
    }

    /// Retrieves a chain by position.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ChainOutOfRange`] if `index` is past the end.
    pub fn chain(&self, index: usize) -> Result<&Chain, ModelError> {
        self.chains.get(index).ok_or(ModelError::ChainOutOfRange {
            index,
            len: self.chains.len(),
        })
    }

    /// Retrieves a residue by chain and residue position.
    pub fn residue(&self, chain: usize, residue: usize) -> Result<&Residue, ModelError> {
        let c = self.chain(chain)?;
        c.residues.get(residue).ok_or(ModelError::ResidueOutOfRange {
            chain,
            index: residue,
            len: c.residues.len(),
        })
    }

    /// Retrieves an atom through a positional handle.
    pub fn atom(&self, aref: AtomRef) -> Result<&Atom, ModelError> {
        self.cra(aref).map(|cra| cra.atom)
    }

    /// Retrieves a mutable atom through a positional handle.
    ///
    /// Only atom-level fields may be changed through the returned reference;
    /// the containers themselves stay untouched, so other handles remain valid.
    pub fn atom_mut(&mut self, aref: AtomRef) -> Result<&mut Atom, ModelError> {
        let n_chains = self.chains.len();
        let chain = self
            .chains
            .get_mut(aref.chain)
            .ok_or(ModelError::ChainOutOfRange {
                index: aref.chain,
                len: n_chains,
            })?;
        let n_residues = chain.residues.len();
        let residue =
            chain
                .residues
                .get_mut(aref.residue)
                .ok_or(ModelError::ResidueOutOfRange {
                    chain: aref.chain,
                    index: aref.residue,
                    len: n_residues,
                })?;
        let n_atoms = residue.atoms.len();
        residue
            .atoms
            .get_mut(aref.atom)
            .ok_or(ModelError::AtomOutOfRange {
                chain: aref.chain,
                residue: aref.residue,
                index: aref.atom,
                len: n_atoms,
            })
    }

    /// Resolves a positional handle into borrowed chain, residue and atom.
    pub fn cra(&self, aref: AtomRef) -> Result<Cra<'_>, ModelError> {
        let chain = self.chain(aref.chain)?;
        let residue = self.residue(aref.chain, aref.residue)?;
        let atom = residue
            .atoms
            .get(aref.atom)
            .ok_or(ModelError::AtomOutOfRange {
                chain: aref.chain,
                residue: aref.residue,
                index: aref.atom,
                len: residue.atoms.len(),
            })?;
        Ok(Cra {
            chain,
            residue,
            atom,
        })
    }

    /// Iterates over all atoms in chain, residue, atom order.
    pub fn atom_refs(&self) -> impl Iterator<Item = (AtomRef, &Atom)> {
        self.chains.iter().enumerate().flat_map(|(n_ch, chain)| {
            chain
                .residues
                .iter()
                .enumerate()
                .flat_map(move |(n_res, residue)| {
                    residue
                        .atoms
                        .iter()
                        .enumerate()
                        .map(move |(n_atom, atom)| (AtomRef::new(n_ch, n_res, n_atom), atom))
                })
        })
    }

    pub fn atom_count(&self) -> usize {
        self.chains.iter().map(Chain::atom_count).sum()
    }

    /// Bounding box of all atom positions, or `None` for an empty model.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut atoms = self.atom_refs().map(|(_, atom)| atom.position);
        let first = atoms.next()?;
        let mut bbox = BoundingBox::from_point(first);
        for position in atoms {
            bbox.add(&position);
        }
        Some(bbox)
    }
}

/// A structure as read from a coordinate file: models plus crystal information.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub name: String,
    pub models: Vec<Model>,
    pub cell: UnitCell,
    pub space_group: Option<String>,
}

impl Structure {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Finds a model by its model number.
    pub fn find_model(&self, number: i32) -> Option<&Model> {
        self.models.iter().find(|m| m.number == number)
    }
}
