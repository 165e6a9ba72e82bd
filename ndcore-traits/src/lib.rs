//! Shared traits for the ndcore crates.
//!
//! This crate provides the element contracts used by `ndcore-view`,
//! `ndcore-perm` and `ndcore-kernel`, plus the scalar-operation contract
//! through which elementwise kernels are lifted over arrays:
//!
//! - [`Element`]: what an array may store
//! - [`ReduceOp`] and its markers ([`Sum`], [`Prod`], [`Min`], [`Max`]):
//!   type-level binary reductions with an optional identity
//! - [`OpTable`] / [`HasOpTable`]: the name → scalar function table, built
//!   once per element type

pub mod op_table;
pub mod reduce_op;
pub mod scalar;

pub use op_table::{BinaryFn, CompareFn, HasOpTable, OpTable, UnaryFn};
pub use reduce_op::{Max, Min, Prod, ReduceOp, Sum};
pub use scalar::Element;
