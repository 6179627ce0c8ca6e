use super::element::Element;
use nalgebra::Point3;

/// Represents an atom of a macromolecular model.
///
/// Atoms are stored by value inside their parent [`Residue`](super::residue::Residue)
/// and are addressed positionally through an [`AtomRef`](super::model::AtomRef).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The chemical element.
    pub element: Element,
    /// Alternate location indicator. `None` means the atom has no alternative
    /// conformers and is compatible with every altloc.
    pub altloc: Option<char>,
    /// The 3D coordinates of the atom in Angstroms (orthogonal frame).
    pub position: Point3<f64>,
    /// Site occupancy in the range [0, 1].
    pub occupancy: f32,
    /// Isotropic displacement parameter in square Angstroms.
    pub b_iso: f32,
    /// Serial number from the source file, or zero.
    pub serial: i32,
}

impl Atom {
    /// Creates a new `Atom` with default values for the crystallographic fields.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `element` - The chemical element.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, element: Element, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element,
            altloc: None,
            position,
            occupancy: 1.0,
            b_iso: 0.0,
            serial: 0,
        }
    }

    /// Sets the alternate location indicator, consuming and returning the atom.
    pub fn with_altloc(mut self, altloc: char) -> Self {
        self.altloc = Some(altloc);
        self
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element.is_hydrogen()
    }
}

/// Returns `true` if two altloc tags may belong to the same conformer.
///
/// Tags are compatible when either one is unset or both are equal.
pub fn is_same_conformer(a: Option<char>, b: Option<char>) -> bool {
    match (a, b) {
        (None, _) | (_, None) => true,
        (Some(a), Some(b)) => a == b,
    }
}
