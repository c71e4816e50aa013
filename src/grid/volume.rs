//! Cell volume formulas.
//!
//! The generic formula decomposes the hexahedron spanned by the 8 cell
//! corners into tetrahedra (Grandy, "Efficient Computation of Volume of
//! Hexahedral Cells"). Corner `c` of a cell carries the binary index
//! (i, j, k) = (c & 1, c >> 1 & 1, c >> 2), which is exactly the layout
//! the ZCORN mapper produces, so the determinants can be written
//! directly against the corner arrays. Cylindrical grids use the
//! analytic sector formula instead.

#[inline]
fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Volume of the hexahedron given by 8 corner positions in the ZCORN
/// corner numbering. Orientation-independent (absolute value).
pub fn hexahedron_volume(x: &[f64; 8], y: &[f64; 8], z: &[f64; 8]) -> f64 {
    let p = |n: usize| [x[n], y[n], z[n]];

    let x3mx0 = sub(p(3), p(0));
    let x5mx0 = sub(p(5), p(0));
    let x6mx0 = sub(p(6), p(0));
    let x7mx1 = sub(p(7), p(1));
    let x7mx2 = sub(p(7), p(2));
    let x7mx4 = sub(p(7), p(4));

    let det1 = dot(add(x7mx1, x6mx0), cross(x7mx2, x3mx0));
    let det2 = dot(x6mx0, cross(add(x7mx2, x5mx0), x7mx4));
    let det3 = dot(x7mx1, cross(x5mx0, add(x7mx4, x3mx0)));

    ((det1 + det2 + det3) / 12.0).abs()
}

/// Volume of a cylindrical-grid cell: the sector between radii `r1`
/// and `r2` spanning `dtheta` degrees, of height `dz`.
pub fn cylindrical_cell_volume(r1: f64, r2: f64, dtheta: f64, dz: f64) -> f64 {
    (0.5 * (r2 * r2 - r1 * r1) * dtheta.to_radians().sin() * dz).abs()
}
