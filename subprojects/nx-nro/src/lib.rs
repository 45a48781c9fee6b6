//! # nx-nro
//! Reading and in-place editing of Nintendo Switch NRO homebrew executables.
//!
//! This crate provides three layers:
//! - `raw`: Low-level binary structure definitions using `zerocopy`
//! - `read`: Loading an NRO file and its asset block into owned, validated values
//! - `write`: Bounded edits to the NACP text fields, in-place writers and payload extraction
//!
//! Only NROs carrying an asset block (`ASET`) are supported. The icon and RomFS
//! payloads are treated as opaque blobs.
//!
//! # Example
//!
//! ```no_run
//! use nx_nro::Nro;
//!
//! let mut nro = Nro::open("hello.nro")?;
//! nro.set_name("Hello")?;
//! nro.set_display_version("1.0.0")?;
//! nro.save_control()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # References
//! - [switchbrew NRO](https://switchbrew.org/wiki/NRO)
//! - [switchbrew NACP](https://switchbrew.org/wiki/NACP)

pub mod raw;
pub mod read;
pub mod write;

pub use self::{
    raw::{AssetKind, FixedStr, FixedStrError},
    read::{Language, LanguageFlags, LoadError, MagicKind, Nacp, Nro, UnknownLanguageError},
    write::{EditError, ExtractError, SaveError, TextField},
};
