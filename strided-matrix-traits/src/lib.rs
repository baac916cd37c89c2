//! Element-type bounds for the strided-matrix ecosystem.
//!
//! The bounds live in their own crate so that downstream storage crates can
//! implement them for their own scalar types (or write blanket impls over
//! them) without orphan rule violations.

pub mod scalar;

pub use scalar::{Scalar, ScalarMul, SignedScalar};
