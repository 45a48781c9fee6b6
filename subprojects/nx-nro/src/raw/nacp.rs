use static_assertions::const_assert_eq;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, little_endian::*};

use super::fixed_str::FixedStr;

/// Number of language entries in a NACP.
pub const NACP_LANGUAGE_COUNT: usize = 16;

/// Width of the application name field.
pub const NACP_NAME_LEN: usize = 0x200;

/// Width of the publisher field.
pub const NACP_PUBLISHER_LEN: usize = 0x100;

/// Width of the display version field.
pub const NACP_DISPLAY_VERSION_LEN: usize = 0x10;

/// Language-specific title and publisher information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct NacpLanguageEntry {
    /// Application name
    pub name: FixedStr<NACP_NAME_LEN>,
    /// Publisher/developer name
    pub publisher: FixedStr<NACP_PUBLISHER_LEN>,
}

// Verify struct size - https://switchbrew.org/wiki/NACP#ApplicationTitle
const_assert_eq!(size_of::<NacpLanguageEntry>(), 0x300);

/// Nintendo Application Control Property (NACP) - complete 0x4000-byte structure.
///
/// Fields past `cache_storage_index_max` are carried as one reserved block and are
/// written back unchanged.
///
/// See: <https://switchbrew.org/wiki/NACP>
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct NacpStruct {
    /// Language entries (title/publisher per language)
    pub lang: [NacpLanguageEntry; NACP_LANGUAGE_COUNT],
    /// ISBN code (NUL-terminated string)
    pub isbn: [u8; 0x25],
    /// Startup user account mode
    pub startup_user_account: u8,
    /// User account switch lock mode
    pub user_account_switch_lock: u8,
    /// Add-on content registration type
    pub add_on_content_registration_type: u8,
    /// Application attribute flags
    pub attribute_flag: U32,
    /// Supported language flags (bitmask)
    pub supported_language_flag: U32,
    /// Parental control flags
    pub parental_control_flag: U32,
    /// Screenshot permission
    pub screenshot: u8,
    /// Video capture permission
    pub video_capture: u8,
    /// Data loss confirmation requirement
    pub data_loss_confirmation: u8,
    /// Play log policy
    pub play_log_policy: u8,
    /// Presence group ID
    pub presence_group_id: U64,
    /// Age rating values per region
    pub rating_age: [i8; 0x20],
    /// Display version string
    pub display_version: FixedStr<NACP_DISPLAY_VERSION_LEN>,
    /// Base ID for add-on content
    pub add_on_content_base_id: U64,
    /// Save data owner ID
    pub save_data_owner_id: U64,
    /// User account save data size in bytes
    pub user_account_save_data_size: U64,
    /// User account save data journal size in bytes
    pub user_account_save_data_journal_size: U64,
    /// Device save data size in bytes
    pub device_save_data_size: U64,
    /// Device save data journal size in bytes
    pub device_save_data_journal_size: U64,
    /// BCAT delivery cache storage size in bytes
    pub bcat_delivery_cache_storage_size: U64,
    /// Application error code category
    pub application_error_code_category: U64,
    /// Local communication IDs
    pub local_communication_id: [U64; 0x8],
    /// Logo type
    pub logo_type: u8,
    /// Logo handling mode
    pub logo_handling: u8,
    /// Runtime add-on content install permission
    pub runtime_add_on_content_install: u8,
    /// Reserved (0x30f3)
    _reserved_x30f3: [u8; 0x3],
    /// Crash report mode
    pub crash_report: u8,
    /// HDCP mode
    pub hdcp: u8,
    /// Pseudo device ID seed
    pub pseudo_device_id_seed: U64,
    /// BCAT passphrase (NUL-terminated string)
    pub bcat_passphrase: [u8; 0x41],
    /// Startup user account option flags
    pub startup_user_account_option: u8,
    /// Reserved (0x3142)
    _reserved_x3142: [u8; 0x6],
    /// Maximum user account save data size in bytes
    pub user_account_save_data_size_max: U64,
    /// Maximum user account save data journal size in bytes
    pub user_account_save_data_journal_size_max: U64,
    /// Maximum device save data size in bytes
    pub device_save_data_size_max: U64,
    /// Maximum device save data journal size in bytes
    pub device_save_data_journal_size_max: U64,
    /// Temporary storage size in bytes
    pub temporary_storage_size: U64,
    /// Cache storage size in bytes
    pub cache_storage_size: U64,
    /// Cache storage journal size in bytes
    pub cache_storage_journal_size: U64,
    /// Maximum combined cache storage data and journal size
    pub cache_storage_data_and_journal_size_max: U64,
    /// Maximum cache storage index
    pub cache_storage_index_max: U64,
    /// Reserved (0x3190) up to 0x4000
    _reserved_x3190: [u8; 0xe70],
}

// Verify struct size - https://switchbrew.org/wiki/NACP
const_assert_eq!(size_of::<NacpStruct>(), 0x4000);

// Display version location - https://switchbrew.org/wiki/NACP#ApplicationControlProperty
const_assert_eq!(core::mem::offset_of!(NacpStruct, display_version), 0x3060);
const_assert_eq!(core::mem::offset_of!(NacpStruct, cache_storage_index_max), 0x3188);
