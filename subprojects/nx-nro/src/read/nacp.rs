use core::{fmt, str::FromStr};
use std::{borrow::Cow, vec::Vec};

use zerocopy::{FromBytes, IntoBytes};

use crate::raw::nacp::{NACP_LANGUAGE_COUNT, NacpLanguageEntry, NacpStruct};

/// Owned NACP with language entry access.
///
/// Holds a copy of the record decoupled from the file it was read from. Bytes of the
/// control section beyond the 0x4000-byte record are kept verbatim so the section can
/// be written back at its original size.
#[derive(Clone)]
pub struct Nacp {
    raw: Box<NacpStruct>,
    trailing: Vec<u8>,
}

impl Nacp {
    /// Size of the NACP record in bytes.
    pub const SIZE: usize = size_of::<NacpStruct>();

    /// Parse NACP from bytes with size validation.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, FromBytesError> {
        let (raw, trailing) =
            NacpStruct::read_from_prefix(bytes).map_err(|_| FromBytesError {
                required: Self::SIZE,
                available: bytes.len(),
            })?;

        if !trailing.is_empty() {
            log::warn!(
                "control section is {} bytes, carrying {} bytes past the NACP unchanged",
                bytes.len(),
                trailing.len()
            );
        }

        Ok(Self {
            raw: Box::new(raw),
            trailing: trailing.to_vec(),
        })
    }

    /// Get raw NACP structure.
    pub fn raw(&self) -> &NacpStruct {
        &self.raw
    }

    /// Get mutable raw NACP structure.
    pub fn raw_mut(&mut self) -> &mut NacpStruct {
        &mut self.raw
    }

    /// Serialized length: the NACP record plus any trailing bytes.
    pub fn serialized_len(&self) -> usize {
        Self::SIZE + self.trailing.len()
    }

    /// Serialize the record, followed by any trailing bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.serialized_len());
        buf.extend_from_slice(self.raw.as_bytes());
        buf.extend_from_slice(&self.trailing);
        buf
    }

    /// All language entries, including empty ones.
    pub fn language_entries(&self) -> &[NacpLanguageEntry; NACP_LANGUAGE_COUNT] {
        &self.raw.lang
    }

    /// Get language entry by index (0-15), or None if empty/invalid.
    pub fn language_entry(&self, index: usize) -> Option<&NacpLanguageEntry> {
        let entry = self.raw.lang.get(index)?;
        if entry.name.is_empty() {
            return None;
        }
        Some(entry)
    }

    /// Get language entry for a specific language with fallback to first available.
    pub fn language_entry_for(&self, lang: Language) -> Option<&NacpLanguageEntry> {
        self.language_entry(lang.entry_index())
            .or_else(|| (0..NACP_LANGUAGE_COUNT).find_map(|i| self.language_entry(i)))
    }

    /// Name from the first language entry.
    pub fn name(&self) -> Cow<'_, str> {
        self.raw.lang[0].name.to_string_lossy()
    }

    /// Publisher from the first language entry.
    pub fn publisher(&self) -> Cow<'_, str> {
        self.raw.lang[0].publisher.to_string_lossy()
    }

    /// Display version string, without padding.
    pub fn display_version(&self) -> Cow<'_, str> {
        self.raw.display_version.to_string_lossy()
    }

    /// Languages the application declares support for.
    pub fn supported_languages(&self) -> LanguageFlags {
        LanguageFlags::from_bits_retain(self.raw.supported_language_flag.get())
    }
}

impl fmt::Debug for Nacp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nacp")
            .field("name", &self.name())
            .field("publisher", &self.publisher())
            .field("display_version", &self.display_version())
            .field("trailing", &self.trailing.len())
            .finish_non_exhaustive()
    }
}

/// Error when parsing NACP: buffer is too small
#[derive(Debug, thiserror::Error)]
#[error("buffer too small: need {required} bytes, have {available}")]
pub struct FromBytesError {
    /// Number of bytes required
    pub required: usize,
    /// Number of bytes available
    pub available: usize,
}

bitflags::bitflags! {
    /// NACP supported-language bitmask; bit N corresponds to language entry N.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LanguageFlags: u32 {
        const AMERICAN_ENGLISH = 1 << 0;
        const BRITISH_ENGLISH = 1 << 1;
        const JAPANESE = 1 << 2;
        const FRENCH = 1 << 3;
        const GERMAN = 1 << 4;
        const LATIN_AMERICAN_SPANISH = 1 << 5;
        const SPANISH = 1 << 6;
        const ITALIAN = 1 << 7;
        const DUTCH = 1 << 8;
        const CANADIAN_FRENCH = 1 << 9;
        const PORTUGUESE = 1 << 10;
        const RUSSIAN = 1 << 11;
        const KOREAN = 1 << 12;
        const TRADITIONAL_CHINESE = 1 << 13;
        const SIMPLIFIED_CHINESE = 1 << 14;
        const BRAZILIAN_PORTUGUESE = 1 << 15;
    }
}

impl LanguageFlags {
    /// Language entry index for a single flag.
    pub fn entry_index(self) -> Option<usize> {
        (self.bits().count_ones() == 1).then(|| self.bits().trailing_zeros() as usize)
    }
}

/// System language codes (matches libnx SetLanguage).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Language {
    /// Japanese
    JA = 0,
    /// English (US)
    ENUS = 1,
    /// French
    FR = 2,
    /// German
    DE = 3,
    /// Italian
    IT = 4,
    /// Spanish
    ES = 5,
    /// Chinese (Simplified)
    ZHCN = 6,
    /// Korean
    KO = 7,
    /// Dutch
    NL = 8,
    /// Portuguese
    PT = 9,
    /// Russian
    RU = 10,
    /// Chinese (Traditional)
    ZHTW = 11,
    /// English (UK)
    ENGB = 12,
    /// French (Canada)
    FRCA = 13,
    /// Spanish (Latin America)
    ES419 = 14,
    /// Chinese (Simplified, alternative)
    ZHHANS = 15,
    /// Chinese (Traditional, alternative)
    ZHHANT = 16,
    /// Portuguese (Brazil)
    PTBR = 17,
}

impl Language {
    /// Language code as used by the system settings ("en-US", "ja", ...).
    pub fn code(self) -> &'static str {
        LANGUAGES[self as usize].1
    }

    /// NACP language entry index this language reads from.
    pub fn entry_index(self) -> usize {
        LANGUAGES[self as usize].2
    }
}

impl FromStr for Language {
    type Err = UnknownLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LANGUAGES
            .iter()
            .find(|(_, code, _)| code.eq_ignore_ascii_case(s))
            .map(|&(lang, _, _)| lang)
            .ok_or_else(|| UnknownLanguageError(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Language code not recognised by [`Language::from_str`].
#[derive(Debug, thiserror::Error)]
#[error("unknown language code: {0:?}")]
pub struct UnknownLanguageError(String);

/// Language, system language code and NACP language entry index, in `Language` order.
const LANGUAGES: [(Language, &str, usize); 18] = [
    (Language::JA, "ja", 2),
    (Language::ENUS, "en-US", 0),
    (Language::FR, "fr", 3),
    (Language::DE, "de", 4),
    (Language::IT, "it", 7),
    (Language::ES, "es", 6),
    (Language::ZHCN, "zh-CN", 14),
    (Language::KO, "ko", 12),
    (Language::NL, "nl", 8),
    (Language::PT, "pt", 10),
    (Language::RU, "ru", 11),
    (Language::ZHTW, "zh-TW", 13),
    (Language::ENGB, "en-GB", 1),
    (Language::FRCA, "fr-CA", 9),
    (Language::ES419, "es-419", 5),
    (Language::ZHHANS, "zh-Hans", 14),
    (Language::ZHHANT, "zh-Hant", 13),
    (Language::PTBR, "pt-BR", 15),
];
