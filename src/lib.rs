//! # orthobasis
//!
//! Orthonormal bases for square real matrices, two ways: classical
//! Gram-Schmidt and accumulated Householder reflections. Both return a `Q`
//! of the input's shape with `QᵗQ ≈ I` whose columns span the input's
//! column space, and both can be checked against a reference QR.
//! No-std compatible (needs `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use orthobasis::{gram_schmidt, householder, DynMatrix};
//! use orthobasis::verify::{is_orthonormal, matches_up_to_sign};
//!
//! let a = DynMatrix::from_rows(3, 3, &[
//!     2.0_f64, -1.0, 0.0,
//!     -1.0, 2.0, -1.0,
//!     0.0, -1.0, 2.0,
//! ]);
//!
//! let q_gs = gram_schmidt(&a).unwrap();
//! let q_hh = householder(&a).unwrap();
//!
//! assert!(is_orthonormal(&q_gs, 1e-10));
//! assert!(is_orthonormal(&q_hh, 1e-10));
//! // Same basis, possibly with different column signs.
//! assert!(matches_up_to_sign(&q_gs, &q_hh, 1e-10));
//! ```
//!
//! ## Modules
//!
//! - [`ortho`] — The two orthogonalizers ([`gram_schmidt`], [`householder`]),
//!   the [`Orthogonalize`] trait they share, [`OrthoError`], and the
//!   [`DEGENERACY_THRESHOLD`] below which a norm counts as zero.
//!
//! - [`dynmatrix`] — Heap-allocated column-major [`DynMatrix<T>`] and owned
//!   [`DynVector<T>`]: constructors, indexing, products, norms, blocks.
//!
//! - [`linalg`] — Reference packed Householder QR ([`linalg::QrDecomposition`]).
//!
//! - [`verify`] — Orthonormality defect and column-sign-insensitive
//!   comparison against the reference QR.
//!
//! - [`measure`] — Wall-time / peak-heap decorator around a call. Requires the
//!   `measure` feature.
//!
//! - [`traits`] — Element traits [`Scalar`] and [`FloatScalar`], and the
//!   [`MatrixRef`] / [`MatrixMut`] access traits used by the QR kernel.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Implies `alloc`. Hardware FPU via system libm, `std::error::Error` impls |
//! | `alloc`   | via std  | `DynMatrix` / `DynVector` (required) |
//! | `libm`    | no       | Pure-Rust software float fallback for `no_std` |
//! | `measure` | no       | Timing / peak-memory measurement (implies `std`) |
//! | `all`     | no       | All features: `std` + `measure` |

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "alloc"))]
compile_error!("orthobasis requires the `alloc` feature");

extern crate alloc;

pub mod dynmatrix;
pub mod linalg;
#[cfg(feature = "measure")]
pub mod measure;
pub mod ortho;
pub mod traits;
pub mod verify;

pub use dynmatrix::{DynMatrix, DynVector};
pub use ortho::{
    gram_schmidt, householder, householder_qr, GramSchmidt, Householder, HouseholderState,
    OrthoError, Orthogonalize, DEGENERACY_THRESHOLD,
};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
