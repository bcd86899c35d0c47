//! Finite-difference primitives shared by both integrators.
//!
//! Only interior points are ever written by the stencils here; boundary
//! entries are left to the caller's boundary policy.

use ndarray as nd;
use crate::Arr1;

/// Apply `f(out[i], f[i - 1], f[i], f[i + 1])` for every interior point `i`,
/// leaving `out[0]` and `out[n - 1]` untouched.
///
/// *Panics if `f` and `out` have different lengths or fewer than 3 points*.
pub(crate) fn for_each_interior<S, T, F>(f: &Arr1<S>, out: &mut Arr1<T>, mut op: F)
where
    S: nd::Data<Elem = f64>,
    T: nd::DataMut<Elem = f64>,
    F: FnMut(&mut f64, f64, f64, f64),
{
    let n = out.len();
    nd::Zip::from(out.slice_mut(nd::s![1..n - 1]))
        .and(f.windows(3))
        .for_each(|outk, w| op(outk, w[0], w[1], w[2]));
}

/// Second-order central difference `(f[i + 1] + f[i - 1] - 2 f[i]) / dx²`.
///
/// The returned array has the same length as `f`; its endpoints are zero.
///
/// *Panics if `f` has fewer than 3 points*.
pub fn laplacian<S>(f: &Arr1<S>, dx: f64) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let mut lap: nd::Array1<f64> = nd::Array1::zeros(f.len());
    let dx2 = dx.powi(2);
    for_each_interior(f, &mut lap, |lk, fm, f0, fp| {
        *lk = (fp + fm - 2.0 * f0) / dx2;
    });
    lap
}

/// First derivative by central differences in the interior and first-order
/// one-sided differences at the two endpoints.
///
/// *Panics if `f` has fewer than 2 points*.
pub fn gradient<S>(f: &Arr1<S>, dx: f64) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let n = f.len();
    let mut df: nd::Array1<f64> = nd::Array1::zeros(n);
    if n >= 3 {
        for_each_interior(f, &mut df, |dk, fm, _, fp| {
            *dk = (fp - fm) / (2.0 * dx);
        });
    }
    df[0] = (f[1] - f[0]) / dx;
    df[n - 1] = (f[n - 1] - f[n - 2]) / dx;
    df
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn laplacian_of_parabola_is_constant() {
        let dx = 0.1;
        let f: nd::Array1<f64> = (0..10).map(|i| (i as f64 * dx).powi(2)).collect();
        let lap = laplacian(&f, dx);
        assert_eq!(lap[0], 0.0);
        assert_eq!(lap[9], 0.0);
        lap.slice(nd::s![1..9]).iter()
            .for_each(|&lk| assert_abs_diff_eq!(lk, 2.0, epsilon = 1e-9));
    }

    #[test]
    fn gradient_of_line() {
        let dx = 0.25;
        let f: nd::Array1<f64> = (0..6).map(|i| 3.0 * i as f64 * dx + 1.0).collect();
        gradient(&f, dx).iter()
            .for_each(|&dk| assert_abs_diff_eq!(dk, 3.0, epsilon = 1e-12));
    }

    #[test]
    fn gradient_edges_are_one_sided() {
        let f = nd::array![0.0, 1.0, 4.0, 9.0];
        let df = gradient(&f, 1.0);
        assert_eq!(df, nd::array![1.0, 2.0, 4.0, 5.0]);
    }
}
