//! NACP text field editor.

use core::fmt;

use crate::{
    raw::{
        FixedStr, FixedStrError,
        nacp::{NACP_DISPLAY_VERSION_LEN, NACP_NAME_LEN, NACP_PUBLISHER_LEN},
    },
    read::Nacp,
};

impl Nacp {
    /// Set the application name for all languages.
    pub fn set_name(&mut self, name: &str) -> Result<(), EditError> {
        let name = FixedStr::<NACP_NAME_LEN>::new(name).map_err(TextField::Name.rejected())?;
        for entry in &mut self.raw_mut().lang {
            entry.name = name;
        }
        Ok(())
    }

    /// Set the publisher for all languages.
    pub fn set_publisher(&mut self, publisher: &str) -> Result<(), EditError> {
        let publisher = FixedStr::<NACP_PUBLISHER_LEN>::new(publisher)
            .map_err(TextField::Publisher.rejected())?;
        for entry in &mut self.raw_mut().lang {
            entry.publisher = publisher;
        }
        Ok(())
    }

    /// Set the display version string (shown in UI).
    pub fn set_display_version(&mut self, version: &str) -> Result<(), EditError> {
        self.raw_mut().display_version = FixedStr::<NACP_DISPLAY_VERSION_LEN>::new(version)
            .map_err(TextField::DisplayVersion.rejected())?;
        Ok(())
    }
}

/// Editable NACP text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// Application name (0x200 bytes, every language)
    Name,
    /// Publisher (0x100 bytes, every language)
    Publisher,
    /// Display version (0x10 bytes)
    DisplayVersion,
}

impl TextField {
    /// Field width in bytes.
    pub fn capacity(self) -> usize {
        match self {
            TextField::Name => NACP_NAME_LEN,
            TextField::Publisher => NACP_PUBLISHER_LEN,
            TextField::DisplayVersion => NACP_DISPLAY_VERSION_LEN,
        }
    }

    fn rejected(self) -> impl FnOnce(FixedStrError) -> EditError {
        move |err| match err {
            FixedStrError::TooLong { len, capacity } => EditError::TooLong {
                field: self,
                len,
                max: capacity,
            },
            FixedStrError::InteriorNul { position } => EditError::InteriorNul {
                field: self,
                position,
            },
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextField::Name => "name",
            TextField::Publisher => "publisher",
            TextField::DisplayVersion => "display version",
        })
    }
}

/// Error returned by the NACP setters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Encoded text exceeds the field width.
    #[error("{field} too long: {len} bytes (max {max:#x})")]
    TooLong {
        /// Field being edited
        field: TextField,
        /// Encoded length in bytes
        len: usize,
        /// Field width in bytes
        max: usize,
    },
    /// Text contains a NUL byte.
    #[error("{field} contains NUL at byte {position}")]
    InteriorNul {
        /// Field being edited
        field: TextField,
        /// Byte offset of the first NUL
        position: usize,
    },
    /// The NRO has no NACP to edit.
    #[error("no NACP available")]
    Unavailable,
}
