use super::CellError;
use super::fractional::Fractional;
use super::spacegroup::space_group_operators;
use super::transform::FTransform;
use nalgebra::{Matrix3, Point3, Vector3};

/// Crystallographic unit cell with its equivalent-position images.
///
/// Orthogonalization follows the PDB convention: the `a` axis lies along x
/// and the `b` axis lies in the xy plane. The `images` are the non-identity
/// symmetry operators of the crystal, in the order they were provided.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
    orth: Matrix3<f64>,
    frac: Matrix3<f64>,
    crystal: bool,
    images: Vec<FTransform>,
}

impl Default for UnitCell {
    /// A placeholder 1 Å cube for structures without crystal information.
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 1.0,
            c: 1.0,
            alpha: 90.0,
            beta: 90.0,
            gamma: 90.0,
            orth: Matrix3::identity(),
            frac: Matrix3::identity(),
            crystal: false,
            images: Vec::new(),
        }
    }
}

fn cos_sin_deg(angle: f64) -> (f64, f64) {
    if angle == 90.0 {
        (0.0, 1.0)
    } else {
        let rad = angle.to_radians();
        (rad.cos(), rad.sin())
    }
}

impl UnitCell {
    /// Creates a crystal cell from lengths (Å) and angles (degrees).
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidParameters`] for non-positive lengths,
    /// angles outside (0, 180) or a combination of angles with no volume.
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Self, CellError> {
        for (name, length) in [("a", a), ("b", b), ("c", c)] {
            if !length.is_finite() || length <= 0.0 {
                return Err(CellError::InvalidParameters(format!(
                    "cell length {} must be positive, got {}",
                    name, length
                )));
            }
        }
        for (name, angle) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !angle.is_finite() || angle <= 0.0 || angle >= 180.0 {
                return Err(CellError::InvalidParameters(format!(
                    "cell angle {} must be within (0, 180), got {}",
                    name, angle
                )));
            }
        }

        let (cos_a, _) = cos_sin_deg(alpha);
        let (cos_b, _) = cos_sin_deg(beta);
        let (cos_g, sin_g) = cos_sin_deg(gamma);
        let volume_factor =
            1.0 - cos_a * cos_a - cos_b * cos_b - cos_g * cos_g + 2.0 * cos_a * cos_b * cos_g;
        if volume_factor <= 0.0 {
            return Err(CellError::InvalidParameters(format!(
                "angles {}, {}, {} do not form a cell",
                alpha, beta, gamma
            )));
        }
        let volume = a * b * c * volume_factor.sqrt();

        #[rustfmt::skip]
        let orth = Matrix3::new(
            a,   b * cos_g, c * cos_b,
            0.0, b * sin_g, c * (cos_a - cos_b * cos_g) / sin_g,
            0.0, 0.0,       volume / (a * b * sin_g),
        );
        let frac = orth.try_inverse().ok_or(CellError::SingularMatrix)?;

        Ok(Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
            orth,
            frac,
            crystal: true,
            images: Vec::new(),
        })
    }

    /// Creates an orthorhombic crystal cell.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<Self, CellError> {
        Self::new(a, b, c, 90.0, 90.0, 90.0)
    }

    pub fn is_crystal(&self) -> bool {
        self.crystal
    }

    /// Cell parameters as `[a, b, c, alpha, beta, gamma]`.
    pub fn parameters(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.alpha, self.beta, self.gamma]
    }

    pub fn volume(&self) -> f64 {
        self.orth.determinant().abs()
    }

    pub fn images(&self) -> &[FTransform] {
        &self.images
    }

    /// Replaces the symmetry images. Identity operators are skipped, so a
    /// complete space-group operator list can be passed directly.
    pub fn set_images(&mut self, operators: impl IntoIterator<Item = FTransform>) {
        self.images = operators.into_iter().filter(|op| !op.is_identity()).collect();
    }

    /// Sets the images from a tabulated space group.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::UnknownSpaceGroup`] for symbols missing from the table.
    pub fn set_space_group(&mut self, symbol: &str) -> Result<(), CellError> {
        let operators = space_group_operators(symbol)?;
        self.set_images(operators);
        Ok(())
    }

    pub fn fractionalize(&self, pos: &Point3<f64>) -> Fractional {
        Fractional(self.frac * pos.coords)
    }

    pub fn orthogonalize(&self, f: &Fractional) -> Point3<f64> {
        Point3::from(self.orth * f.0)
    }

    pub fn orthogonalize_difference(&self, delta: &Vector3<f64>) -> Vector3<f64> {
        self.orth * delta
    }

    /// Perpendicular distances between opposite faces of the cell.
    ///
    /// These are the widths a grid axis has to cover, which for oblique cells
    /// are shorter than the cell edges.
    pub fn plane_spacings(&self) -> [f64; 3] {
        let va = self.orth.column(0).into_owned();
        let vb = self.orth.column(1).into_owned();
        let vc = self.orth.column(2).into_owned();
        let volume = self.volume();
        [
            volume / vb.cross(&vc).norm(),
            volume / vc.cross(&va).norm(),
            volume / va.cross(&vb).norm(),
        ]
    }

    /// Squared distance between two points, taking the nearest periodic copy
    /// of the second point among all translations and symmetry images.
    ///
    /// For non-crystal cells this is the plain Euclidean distance.
    pub fn distance_sq(&self, pos1: &Point3<f64>, pos2: &Point3<f64>) -> f64 {
        if !self.crystal {
            return (pos1 - pos2).norm_squared();
        }
        let f1 = self.fractionalize(pos1);
        let f2 = self.fractionalize(pos2);
        let nearest = |other: Fractional| {
            let diff = (f1 - other).wrap_to_zero();
            self.orthogonalize_difference(&diff.0).norm_squared()
        };
        self.images
            .iter()
            .map(|image| nearest(image.apply(&f2)))
            .fold(nearest(f2), f64::min)
    }
}
