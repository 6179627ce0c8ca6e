#![allow(dead_code)]

use cellgrid::core::models::atom::Atom;
use cellgrid::core::models::chain::Chain;
use cellgrid::core::models::element::Element;
use cellgrid::core::models::model::Model;
use cellgrid::core::models::residue::Residue;
use nalgebra::Point3;

/// Deterministic linear congruential generator for reproducible coordinates.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

pub fn atom(name: &str, element: Element, x: f64, y: f64, z: f64) -> Atom {
    Atom::new(name, element, Point3::new(x, y, z))
}

/// A single-chain model with one residue per atom.
pub fn one_atom_per_residue(positions: &[[f64; 3]]) -> Model {
    let residues = positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Residue::new("HOH", i as isize + 1).with_atoms(vec![atom(
                &format!("O{}", i),
                Element::O,
                p[0],
                p[1],
                p[2],
            )])
        })
        .collect();
    Model::new(1).with_chains(vec![Chain::new("W").with_residues(residues)])
}

/// Random positions inside a box of the given edges, spread over `chains`
/// chains of residues holding up to three atoms each.
pub fn random_model(rng: &mut Lcg, n_atoms: usize, edges: [f64; 3], chains: usize) -> Model {
    let mut model = Model::new(1);
    let per_chain = n_atoms.div_ceil(chains);
    let mut serial = 0;
    for c in 0..chains {
        let mut chain = Chain::new(&format!("{}", (b'A' + c as u8) as char));
        let mut remaining = per_chain.min(n_atoms - serial);
        let mut seq = 1;
        while remaining > 0 {
            let size = remaining.min(3);
            let atoms = (0..size)
                .map(|k| {
                    let mut a = atom(
                        &format!("X{}", k),
                        Element::C,
                        rng.next_f64() * edges[0],
                        rng.next_f64() * edges[1],
                        rng.next_f64() * edges[2],
                    );
                    a.serial = serial as i32 + k as i32;
                    a
                })
                .collect();
            chain.residues.push(Residue::new("UNK", seq).with_atoms(atoms));
            serial += size;
            remaining -= size;
            seq += 1;
        }
        model.chains.push(chain);
    }
    model
}
