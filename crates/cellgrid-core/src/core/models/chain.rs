use super::residue::Residue;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub name: String,           // Chain identifier (e.g., "A", "AB")
    pub residues: Vec<Residue>, // Ordered residues belonging to this chain
}

impl Chain {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            residues: Vec::new(),
        }
    }

    pub fn with_residues(mut self, residues: Vec<Residue>) -> Self {
        self.residues = residues;
        self
    }

    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(|r| r.atoms.len()).sum()
    }
}
