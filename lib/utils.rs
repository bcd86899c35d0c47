//! Miscellaneous tools.

use ndarray::{ self as nd, Ix1, concatenate };
use num_traits::Float;
use rustfft as fft;
use num_complex::Complex64 as C64;

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    (dx / two) * (y[0] + two * y.slice(nd::s![1..n - 1]).sum() + y[n - 1])
}

/// Spatial frequencies (cycles per unit length) of the `n` bins of an FFT over
/// a mesh with spacing `dx`, in FFT order: non-negative frequencies first.
pub fn fft_freq(n: usize, dx: f64) -> nd::Array1<f64> {
    let span = n as f64 * dx;
    let split = (n + 1) / 2;
    (0..n)
        .map(|j| if j < split { j as f64 } else { j as f64 - n as f64 })
        .map(|k| k / span)
        .collect()
}

/// Perform the one-dimensional, complex-valued FFT.
pub fn fft<S>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let n: usize = x.len();
    let mut buf: Vec<C64> = x.iter().copied().collect();
    let mut plan = fft::FftPlanner::new();
    let fft_plan = plan.plan_fft_forward(n);
    fft_plan.process(&mut buf);
    nd::Array1::from_vec(buf)
}

/// Reorder an array in FFT order so that the negative-frequency half comes
/// first, giving ascending wavenumbers.
pub fn fft_shift<S, A>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    let (p, m) = x.view().split_at(nd::Axis(0), (x.len() + 1) / 2);
    concatenate!(nd::Axis(0), m.into_owned(), p.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn trapz_of_line() {
        let y = nd::array![0.0, 1.0, 2.0, 3.0];
        assert_abs_diff_eq!(trapz(&y, 1.0), 4.5);
    }

    #[test]
    fn frequencies_in_fft_order() {
        assert_eq!(fft_freq(4, 0.25), nd::array![0.0, 1.0, -2.0, -1.0]);
        assert_eq!(fft_freq(5, 0.2), nd::array![0.0, 1.0, 2.0, -2.0, -1.0]);
    }

    #[test]
    fn shifted_frequencies_ascend() {
        for n in [6, 7] {
            let f = fft_shift(&fft_freq(n, 0.5));
            assert!(f.iter().zip(f.iter().skip(1)).all(|(a, b)| a < b));
        }
    }

    #[test]
    fn fft_of_plane_wave_has_single_peak() {
        let n = 16;
        let x: nd::Array1<C64>
            = (0..n)
            .map(|j| C64::cis(std::f64::consts::TAU * 3.0 * j as f64 / n as f64))
            .collect();
        let xk = fft(&x);
        assert_abs_diff_eq!(xk[3].norm(), n as f64, epsilon = 1e-9);
        xk.iter().enumerate()
            .filter(|(k, _)| *k != 3)
            .for_each(|(_, v)| assert_abs_diff_eq!(v.norm(), 0.0, epsilon = 1e-9));
    }
}
