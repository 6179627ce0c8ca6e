use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

/// Chemical element of an atom.
///
/// Only elements that commonly occur in macromolecular models are listed
/// explicitly; anything else is represented by [`Element::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Element {
    H,
    D,
    He,
    Li,
    B,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    K,
    Ca,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Se,
    Br,
    Cd,
    I,
    Pt,
    Au,
    Hg,
    #[default]
    Unknown,
}

static ELEMENT_SYMBOLS: Map<&'static str, Element> = phf_map! {
    "H" => Element::H,
    "D" => Element::D,
    "HE" => Element::He,
    "LI" => Element::Li,
    "B" => Element::B,
    "C" => Element::C,
    "N" => Element::N,
    "O" => Element::O,
    "F" => Element::F,
    "NA" => Element::Na,
    "MG" => Element::Mg,
    "AL" => Element::Al,
    "SI" => Element::Si,
    "P" => Element::P,
    "S" => Element::S,
    "CL" => Element::Cl,
    "K" => Element::K,
    "CA" => Element::Ca,
    "MN" => Element::Mn,
    "FE" => Element::Fe,
    "CO" => Element::Co,
    "NI" => Element::Ni,
    "CU" => Element::Cu,
    "ZN" => Element::Zn,
    "SE" => Element::Se,
    "BR" => Element::Br,
    "CD" => Element::Cd,
    "I" => Element::I,
    "PT" => Element::Pt,
    "AU" => Element::Au,
    "HG" => Element::Hg,
};

impl Element {
    /// Looks up an element by its symbol, ignoring case and surrounding whitespace.
    ///
    /// Unrecognized symbols map to [`Element::Unknown`].
    pub fn from_symbol(symbol: &str) -> Self {
        let key = symbol.trim().to_ascii_uppercase();
        ELEMENT_SYMBOLS
            .get(key.as_str())
            .copied()
            .unwrap_or(Element::Unknown)
    }

    /// Returns `true` for hydrogen and deuterium.
    pub fn is_hydrogen(self) -> bool {
        matches!(self, Element::H | Element::D)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Element::H => "H",
            Element::D => "D",
            Element::He => "He",
            Element::Li => "Li",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::Al => "Al",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Mn => "Mn",
            Element::Fe => "Fe",
            Element::Co => "Co",
            Element::Ni => "Ni",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
            Element::Se => "Se",
            Element::Br => "Br",
            Element::Cd => "Cd",
            Element::I => "I",
            Element::Pt => "Pt",
            Element::Au => "Au",
            Element::Hg => "Hg",
            Element::Unknown => "X",
        }
    }
}

impl FromStr for Element {
    type Err = ();

    /// Strict parsing: unlike [`Element::from_symbol`], unknown symbols are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Element::from_symbol(s) {
            Element::Unknown => Err(()),
            element => Ok(element),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
