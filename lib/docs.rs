//! Theoretical background.
//!
//! # Contents
//! - [Discretization](#discretization)
//! - [Wave equation](#wave-equation)
//! - [Schrödinger equation](#schrödinger-equation)
//! - [Stability](#stability)
//! - [Conservation](#conservation)
//!
//! # Discretization
//! Both equations are solved on the same kind of grid: *N* points spaced by
//! *δx* = *L* / *N*,
//! ```text
//! x[i] = i δx, i ∊ {0, ..., N - 1}
//! f[i] = f(x[i])
//! ```
//! with the second spatial derivative replaced by the three-point central
//! difference
//! ```text
//! ∂²f           f[i + 1] + f[i - 1] - 2 f[i]
//! ---  (x[i]) ≈ ----------------------------  + O(δx²)
//! ∂x²                       δx²
//! ```
//! This is only defined for interior points 0 < *i* < *N* - 1, so the two
//! endpoints of every field are instead assigned by a boundary policy after
//! each step. Time is discretized with a constant step *δt*, and
//! *f*<sup>*n*</sup>\[*i*\] denotes the field at *t* = *n* *δt*.
//!
//! # Wave equation
//! For
//! ```text
//! ∂²φ      ∂²φ
//! --- = c² ---
//! ∂t²      ∂x²
//! ```
//! the second time derivative is treated with the same central difference as
//! the spatial one, giving the explicit three-level ("leapfrog") scheme
//! ```text
//! φⁿ⁺¹[i] = 2 φⁿ[i] - φⁿ⁻¹[i] + C² (φⁿ[i + 1] + φⁿ[i - 1] - 2 φⁿ[i])
//!
//! C = c δt / δx
//! ```
//! where *C* is the Courant number. Both ends are held at zero, which models a
//! string with fixed ends.
//!
//! Since the scheme needs two levels to start, the second level is built from
//! the initial profile *φ*⁰ and an initial velocity *v* with a single
//! forward-Euler step, *φ*¹ = *φ*⁰ + *δt* *v*. Here the velocity is taken to
//! be *v* = -(*c*/2) ∂*φ*⁰/∂*x*, i.e. half the velocity a profile travelling
//! rigidly to the right would have.
//!
//! # Schrödinger equation
//! For a free particle,
//! ```text
//!    ∂ψ      ħ² ∂²ψ
//! iħ -- = - --- ---
//!    ∂t     2 m ∂x²
//! ```
//! writing *ψ* = *φ*<sub>R</sub> + *i* *φ*<sub>I</sub> separates the equation
//! into two real equations, each driven by the curvature of the other part:
//! ```text
//! ∂φ_R      ħ  ∂²φ_I
//! ---- = - --- -----
//!  ∂t      2 m  ∂x²
//!
//! ∂φ_I      ħ  ∂²φ_R
//! ---- =   --- -----
//!  ∂t      2 m  ∂x²
//! ```
//! These are integrated in a staggered fashion[^2]: first the real part is
//! pushed forward using the current imaginary part, and then the imaginary part
//! is pushed forward using the *new* real part,
//! ```text
//! φ_Rⁿ⁺¹[i] = φ_Rⁿ[i] - r (φ_Iⁿ[i + 1] + φ_Iⁿ[i - 1] - 2 φ_Iⁿ[i])
//! φ_Iⁿ⁺¹[i] = φ_Iⁿ[i] + r (φ_Rⁿ⁺¹[i + 1] + φ_Rⁿ⁺¹[i - 1] - 2 φ_Rⁿ⁺¹[i])
//!
//! r = ħ δt / (2 m δx²)
//! ```
//! Using the updated real part is what makes the scheme conditionally stable at
//! all; a plain forward-Euler update of both parts from the same level is
//! unconditionally unstable. The real part is held at zero at both ends, the
//! imaginary part at zero on the right and equal to its pre-step neighbor on
//! the left.
//!
//! The observable is the probability density
//! *ρ*\[*i*\] = *φ*<sub>R</sub>\[*i*\]² + *φ*<sub>I</sub>\[*i*\]², which is
//! recomputed from the two parts after every step.
//!
//! # Stability
//! Both schemes are analyzed by inserting a single Fourier mode
//! *f*<sup>*n*</sup>\[*i*\] = *g*<sup>*n*</sup> *e*<sup>*i* *κ* *i* *δx*</sup>
//! and asking when the amplification factor satisfies |*g*| ≤ 1 for every mode
//! the grid supports. Writing *μ* = 4 sin²(*κ* *δx* / 2) ∊ \[0, 4\], the
//! discrete Laplacian acts on the mode as multiplication by -*μ* / *δx*².
//!
//! For the leapfrog wave scheme,
//! ```text
//! g² - (2 - C² μ) g + 1 = 0
//! ```
//! whose roots have unit modulus exactly when |2 - *C*² *μ*| ≤ 2, i.e. for all
//! modes when *C* ≤ 1. This is the CFL condition[^1]; the step is therefore
//! chosen as
//! ```text
//! δt = buffer δx / c
//! ```
//! so that *C* = buffer. Above 1 the highest mode grows by a factor approaching
//! 4 *C*² - 2 per step.
//!
//! For the staggered Schrödinger scheme, a mode (*R*, *I*) is advanced by
//! ```text
//! [R]      [ 1        a    ] [R]
//! [I]  →   [-a     1 - a²  ] [I]       a = r μ
//! ```
//! This matrix has unit determinant, so both eigenvalues stay on the unit
//! circle as long as its trace satisfies |2 - *a*²| ≤ 2, i.e. *a* ≤ 2. For all
//! modes this requires *r* ≤ 1/2. The step is chosen as
//! ```text
//! δt = buffer 2 m δx² / ħ
//! ```
//! so that *r* = buffer. The quadratic dependence on *δx* is characteristic of
//! explicit schemes for diffusion-like operators: halving the grid spacing
//! quarters the allowed step.
//!
//! The limits are exposed as
//! [`WAVE_CFL_LIMIT`][crate::stability::WAVE_CFL_LIMIT] and
//! [`SCHRODINGER_CFL_LIMIT`][crate::stability::SCHRODINGER_CFL_LIMIT]; a
//! configuration that exceeds them is handled according to its
//! [`StabilityPolicy`][crate::stability::StabilityPolicy].
//!
//! # Conservation
//! The continuous Schrödinger equation conserves the total probability
//! ∫|*ψ*|² d*x*. The staggered scheme does not conserve Σ *ρ*\[*i*\] exactly;
//! instead, because the real and imaginary parts live at effectively
//! interleaved times, a slightly modified quadratic form is conserved, and the
//! plain sum oscillates about its initial value with an amplitude that shrinks
//! with *r*. The boundary policy adds a small loss or gain whenever the wave
//! packets reach the ends. For stable, well-resolved runs the sum should stay
//! close to its initial value; steady growth signals an unstable step.
//!
//! [^1]: R. Courant, K. Friedrichs, and H. Lewy, "Über die partiellen
//! Differenzengleichungen der mathematischen Physik." Mathematische Annalen
//! **100** 32-74 (1928).
//!
//! [^2]: P. B. Visscher, "A fast explicit algorithm for the time-dependent
//! Schrödinger equation." Computers in Physics **5** 596-598 (1991).
