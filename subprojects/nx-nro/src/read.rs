//! Loading of NRO files into validated, owned values.
//!
//! [`Nro::open`] validates both magics, resolves each asset section to an absolute
//! byte range and copies the payloads into memory. The parsed NACP is exposed
//! through [`Nacp`].

mod nacp;
mod nro;

pub use self::{
    nacp::{
        FromBytesError as NacpFromBytesError, Language, LanguageFlags, Nacp, UnknownLanguageError,
    },
    nro::{LoadError, MagicKind, Nro},
};
