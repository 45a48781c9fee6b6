//! Bounded edits and in-place writes for loaded NROs.
//!
//! Edits only touch the in-memory NACP; nothing reaches the file until one of the
//! writers runs:
//!
//! 1. Edit the NACP text fields with `set_name`, `set_publisher` and `set_display_version`
//! 2. Persist them with [`Nro::save_control`], which rewrites exactly the control section
//! 3. Use [`Nro::save`] only after changing the headers themselves
//!
//! Payloads can be copied out with the `extract_*` methods.
//!
//! # Example
//!
//! ```no_run
//! use nx_nro::Nro;
//!
//! let mut nro = Nro::open("app.nro")?;
//! nro.set_publisher("Someone")?;
//! nro.save_control()?;
//! nro.extract_icon("icon.jpg")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Nro::save`]: crate::Nro::save
//! [`Nro::save_control`]: crate::Nro::save_control

mod extract;
mod nacp;
mod nro;

pub use self::{
    extract::ExtractError,
    nacp::{EditError, TextField},
    nro::SaveError,
};
