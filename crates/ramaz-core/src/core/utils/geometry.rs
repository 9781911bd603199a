use nalgebra::{Point3, Vector3};

/// Computes the dihedral angle defined by four points, in degrees.
///
/// The result lies in `(-180, 180]` and follows the IUPAC sign convention:
/// looking down the `p1 -> p2` bond, a clockwise rotation of `p0` onto `p3`
/// is positive.
///
/// # Return
///
/// Returns `None` when the central bond has zero length or either outer
/// bond is collinear with it.
pub fn dihedral(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> Option<f64> {
    let b0 = p0 - p1;
    let b1 = p2 - p1;
    let b2 = p3 - p2;

    let b1_norm = b1.norm();
    if b1_norm < f64::EPSILON {
        return None;
    }
    let b1 = b1 / b1_norm;

    let v = b0 - b1 * b0.dot(&b1);
    let w = b2 - b1 * b2.dot(&b1);
    if v.norm() < 1e-10 || w.norm() < 1e-10 {
        return None;
    }

    let x = v.dot(&w);
    let y = b1.cross(&v).dot(&w);
    Some(y.atan2(x).to_degrees())
}

/// Places an atom `d` from three reference atoms using internal coordinates.
///
/// `d` is put at `bond_length` from `c`, with the angle `b-c-d` equal to
/// `bond_angle` and the dihedral `a-b-c-d` equal to `torsion` (both in degrees).
pub fn place_atom(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    bond_length: f64,
    bond_angle: f64,
    torsion: f64,
) -> Point3<f64> {
    let bc = (c - b).normalize();
    let n = (b - a).cross(&bc).normalize();
    let m = n.cross(&bc);

    let theta = bond_angle.to_radians();
    let phi = torsion.to_radians();
    let d = Vector3::new(
        -bond_length * theta.cos(),
        bond_length * theta.sin() * phi.cos(),
        bond_length * theta.sin() * phi.sin(),
    );

    c + bc * d.x + m * d.y + n * d.z
}

/// Smallest absolute difference between two angles in degrees.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}
