//! Code-fix fixture checks for `Name.Fixed.cs` files.

pub mod check;

pub use check::{compare_fix_output, remaining_noncompliant, FixCheck, FixDifference};
