use super::atom::Atom;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub name: String,         // Residue name (e.g., "ALA", "HOH")
    pub seq_num: isize,       // Sequence number from the source file
    pub icode: Option<char>,  // Insertion code
    pub atoms: Vec<Atom>,     // Ordered atoms; positions are part of AtomRef
}

impl Residue {
    pub fn new(name: &str, seq_num: isize) -> Self {
        Self {
            name: name.to_string(),
            seq_num,
            icode: None,
            atoms: Vec::new(),
        }
    }

    pub fn with_atoms(mut self, atoms: Vec<Atom>) -> Self {
        self.atoms = atoms;
        self
    }

    pub fn find_atom(&self, name: &str, altloc: Option<char>) -> Option<&Atom> {
        self.atoms
            .iter()
            .find(|atom| atom.name == name && (altloc.is_none() || atom.altloc == altloc))
    }

    /// Returns `true` if this residue carries the given sequence identity.
    pub(crate) fn matches_seq_id(&self, name: &str, seq_num: isize, icode: Option<char>) -> bool {
        self.seq_num == seq_num && self.icode == icode && self.name == name
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.seq_num)?;
        if let Some(icode) = self.icode {
            write!(f, "{}", icode)?;
        }
        Ok(())
    }
}
