use super::CellError;
use super::fractional::Fractional;
use nalgebra::{Matrix3, Vector3};
use std::fmt;
use std::str::FromStr;

const IDENTITY_TOLERANCE: f64 = 1e-9;

/// Affine transformation of fractional coordinates (a symmetry operator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FTransform {
    pub mat: Matrix3<f64>,
    pub vec: Vector3<f64>,
}

impl Default for FTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl FTransform {
    pub fn new(mat: Matrix3<f64>, vec: Vector3<f64>) -> Self {
        Self { mat, vec }
    }

    pub fn identity() -> Self {
        Self {
            mat: Matrix3::identity(),
            vec: Vector3::zeros(),
        }
    }

    pub fn is_identity(&self) -> bool {
        (self.mat - Matrix3::identity()).abs().max() < IDENTITY_TOLERANCE
            && self.vec.abs().max() < IDENTITY_TOLERANCE
    }

    pub fn apply(&self, f: &Fractional) -> Fractional {
        Fractional(self.mat * f.0 + self.vec)
    }

    /// Parses a coordinate triplet such as `-x,y+1/2,-z+1/2`.
    ///
    /// Each of the three comma-separated expressions is a sum of terms; a
    /// term is an optional sign, an optional integer, decimal or fractional
    /// coefficient and an optional axis letter. Parsing is case-insensitive
    /// and ignores whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidTriplet`] if the string is malformed.
    pub fn parse_triplet(triplet: &str) -> Result<Self, CellError> {
        let invalid = |reason: &str| CellError::InvalidTriplet {
            triplet: triplet.to_string(),
            reason: reason.to_string(),
        };

        let rows: Vec<&str> = triplet.split(',').collect();
        if rows.len() != 3 {
            return Err(invalid("expected three comma-separated expressions"));
        }

        let mut mat = Matrix3::zeros();
        let mut vec = Vector3::zeros();
        for (row, expr) in rows.iter().enumerate() {
            let (coefs, shift) = parse_expression(expr).map_err(|reason| invalid(&reason))?;
            for (col, coef) in coefs.iter().enumerate() {
                mat[(row, col)] = *coef;
            }
            vec[row] = shift;
        }
        Ok(Self { mat, vec })
    }

    /// Formats the operator back as a coordinate triplet.
    pub fn to_triplet(&self) -> String {
        (0..3)
            .map(|row| format_expression(&self.mat.row(row).transpose(), self.vec[row]))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for FTransform {
    type Err = CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_triplet(s)
    }
}

impl fmt::Display for FTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_triplet())
    }
}

fn parse_expression(expr: &str) -> Result<([f64; 3], f64), String> {
    let cleaned: Vec<char> = expr
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.is_empty() {
        return Err("empty expression".to_string());
    }

    let mut coefs = [0.0; 3];
    let mut shift = 0.0;
    let mut pos = 0;
    let mut first = true;

    while pos < cleaned.len() {
        let sign = match cleaned[pos] {
            '+' => {
                pos += 1;
                1.0
            }
            '-' => {
                pos += 1;
                -1.0
            }
            _ if first => 1.0,
            c => return Err(format!("unexpected character '{}'", c)),
        };
        first = false;

        let number = parse_number(&cleaned, &mut pos)?;
        let axis = match cleaned.get(pos) {
            Some('x') => Some(0),
            Some('y') => Some(1),
            Some('z') => Some(2),
            _ => None,
        };

        if let Some(col) = axis {
            pos += 1;
            let mut coef = sign * number.unwrap_or(1.0);
            if cleaned.get(pos) == Some(&'/') {
                // forms like x/2
                pos += 1;
                let denom = parse_number(&cleaned, &mut pos)?
                    .ok_or_else(|| "missing denominator".to_string())?;
                if denom == 0.0 {
                    return Err("division by zero".to_string());
                }
                coef /= denom;
            }
            coefs[col] += coef;
            continue;
        }

        match number {
            Some(value) => shift += sign * value,
            None => {
                return Err(match cleaned.get(pos) {
                    Some(c) => format!("unexpected character '{}'", c),
                    None => "dangling sign".to_string(),
                });
            }
        }
    }

    Ok((coefs, shift))
}

fn parse_number(chars: &[char], pos: &mut usize) -> Result<Option<f64>, String> {
    let start = *pos;
    while *pos < chars.len() && (chars[*pos].is_ascii_digit() || chars[*pos] == '.') {
        *pos += 1;
    }
    if *pos == start {
        return Ok(None);
    }
    let text: String = chars[start..*pos].iter().collect();
    let mut value: f64 = text
        .parse()
        .map_err(|_| format!("invalid number '{}'", text))?;

    if chars.get(*pos) == Some(&'/') && chars.get(*pos + 1).is_some_and(|c| c.is_ascii_digit()) {
        *pos += 1;
        let denom_start = *pos;
        while *pos < chars.len() && chars[*pos].is_ascii_digit() {
            *pos += 1;
        }
        let denom_text: String = chars[denom_start..*pos].iter().collect();
        let denom: f64 = denom_text
            .parse()
            .map_err(|_| format!("invalid denominator '{}'", denom_text))?;
        if denom == 0.0 {
            return Err("division by zero".to_string());
        }
        value /= denom;
    }
    Ok(Some(value))
}

fn format_expression(coefs: &Vector3<f64>, shift: f64) -> String {
    let mut out = String::new();
    for (coef, axis) in coefs.iter().zip(['x', 'y', 'z']) {
        if coef.abs() < IDENTITY_TOLERANCE {
            continue;
        }
        if *coef < 0.0 {
            out.push('-');
        } else if !out.is_empty() {
            out.push('+');
        }
        if (coef.abs() - 1.0).abs() > IDENTITY_TOLERANCE {
            out.push_str(&format_fraction(coef.abs()));
        }
        out.push(axis);
    }
    if shift.abs() > IDENTITY_TOLERANCE {
        if shift < 0.0 {
            out.push('-');
        } else if !out.is_empty() {
            out.push('+');
        }
        out.push_str(&format_fraction(shift.abs()));
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

fn format_fraction(value: f64) -> String {
    for denom in [1u32, 2, 3, 4, 6, 8, 12] {
        let numer = value * denom as f64;
        if (numer - numer.round()).abs() < 1e-6 {
            let numer = numer.round() as i64;
            return if denom == 1 {
                numer.to_string()
            } else {
                format!("{}/{}", numer, denom)
            };
        }
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Fractional, b: &Fractional) {
        assert!((a.0 - b.0).norm() < 1e-12, "{:?} != {:?}", a, b);
    }

    #[test]
    fn parses_identity() {
        let op = FTransform::parse_triplet("x,y,z").unwrap();
        assert!(op.is_identity());
        assert_eq!(op, FTransform::identity());
    }

    #[test]
    fn parses_screw_axis_with_translation() {
        let op = FTransform::parse_triplet("-x, y+1/2, -z").unwrap();
        let out = op.apply(&Fractional::new(0.1, 0.2, 0.3));
        assert_close(&out, &Fractional::new(-0.1, 0.7, -0.3));
        assert!(!op.is_identity());
    }

    #[test]
    fn parses_leading_translation_and_uppercase() {
        let op = FTransform::parse_triplet("1/2+X,1/2-Y,-Z").unwrap();
        let out = op.apply(&Fractional::new(0.1, 0.2, 0.3));
        assert_close(&out, &Fractional::new(0.6, 0.3, -0.3));
    }

    #[test]
    fn parses_mixed_axes_and_decimals() {
        let op = FTransform::parse_triplet("x-y,x,z+0.25").unwrap();
        let out = op.apply(&Fractional::new(0.5, 0.25, 0.0));
        assert_close(&out, &Fractional::new(0.25, 0.5, 0.25));
    }

    #[test]
    fn rejects_malformed_triplets() {
        for bad in ["x,y", "x,y,z,x", "x,,z", "x,y,q", "x,y,z+", "x,y,1/0", "x*y,y,z"] {
            assert!(
                matches!(
                    FTransform::parse_triplet(bad),
                    Err(CellError::InvalidTriplet { .. })
                ),
                "accepted '{}'",
                bad
            );
        }
    }

    #[test]
    fn formats_back_to_canonical_triplet() {
        let op: FTransform = "-x+1/2,-y,z+1/2".parse().unwrap();
        assert_eq!(op.to_string(), "-x+1/2,-y,z+1/2");
        assert_eq!(FTransform::identity().to_triplet(), "x,y,z");
    }
}
