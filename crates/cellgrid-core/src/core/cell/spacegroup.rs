use super::CellError;
use super::transform::FTransform;
use phf::{Map, phf_map};

// Keys are upper-case Hermann-Mauguin symbols with whitespace removed.
// Centring translations are already expanded into the operator lists.
static SPACE_GROUP_OPERATORS: Map<&'static str, &'static [&'static str]> = phf_map! {
    "P1" => &["x,y,z"],
    "P-1" => &["x,y,z", "-x,-y,-z"],
    "P121" => &["x,y,z", "-x,y,-z"],
    "P2" => &["x,y,z", "-x,y,-z"],
    "P1211" => &["x,y,z", "-x,y+1/2,-z"],
    "P21" => &["x,y,z", "-x,y+1/2,-z"],
    "C121" => &["x,y,z", "-x,y,-z", "x+1/2,y+1/2,z", "-x+1/2,y+1/2,-z"],
    "C2" => &["x,y,z", "-x,y,-z", "x+1/2,y+1/2,z", "-x+1/2,y+1/2,-z"],
    "P121/C1" => &["x,y,z", "-x,y+1/2,-z+1/2", "-x,-y,-z", "x,-y+1/2,z+1/2"],
    "P21/C" => &["x,y,z", "-x,y+1/2,-z+1/2", "-x,-y,-z", "x,-y+1/2,z+1/2"],
    "P222" => &["x,y,z", "-x,-y,z", "-x,y,-z", "x,-y,-z"],
    "P21212" => &["x,y,z", "-x,-y,z", "-x+1/2,y+1/2,-z", "x+1/2,-y+1/2,-z"],
    "P212121" => &["x,y,z", "-x+1/2,-y,z+1/2", "-x,y+1/2,-z+1/2", "x+1/2,-y+1/2,-z"],
    "C2221" => &[
        "x,y,z", "-x,-y,z+1/2", "-x,y,-z+1/2", "x,-y,-z",
        "x+1/2,y+1/2,z", "-x+1/2,-y+1/2,z+1/2", "-x+1/2,y+1/2,-z+1/2", "x+1/2,-y+1/2,-z",
    ],
    "I222" => &[
        "x,y,z", "-x,-y,z", "-x,y,-z", "x,-y,-z",
        "x+1/2,y+1/2,z+1/2", "-x+1/2,-y+1/2,z+1/2", "-x+1/2,y+1/2,-z+1/2", "x+1/2,-y+1/2,-z+1/2",
    ],
};

fn normalize_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Returns the symmetry operators of a space group, identity first.
///
/// # Errors
///
/// Returns [`CellError::UnknownSpaceGroup`] if the symbol is not tabulated.
pub fn space_group_operators(symbol: &str) -> Result<Vec<FTransform>, CellError> {
    let triplets = SPACE_GROUP_OPERATORS
        .get(normalize_symbol(symbol).as_str())
        .ok_or_else(|| CellError::UnknownSpaceGroup(symbol.trim().to_string()))?;
    triplets
        .iter()
        .map(|triplet| FTransform::parse_triplet(triplet))
        .collect()
}
