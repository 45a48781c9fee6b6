//! Raw binary structure definitions for the NRO container and its asset block.
//!
//! This module contains zero-copy struct definitions using the `zerocopy` crate.
//! All structures are defined with `#[repr(C)]` over unaligned little-endian integers,
//! so field offsets are the running sum of the preceding field widths.
//!
//! For loading with validation, see the `read` module.

pub mod fixed_str;
pub mod nacp;
pub mod nro;

pub use self::{
    fixed_str::{FixedStr, FixedStrError},
    nro::AssetKind,
};
