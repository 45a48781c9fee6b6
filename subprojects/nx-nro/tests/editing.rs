//! Tests for NACP edits and the in-place writers.

mod common;

use common::{NroFixture, asset_offset};
use nx_nro::{AssetKind, EditError, Nro, SaveError, TextField};

fn section_bytes(image: &[u8], nro: &Nro, kind: AssetKind) -> Vec<u8> {
    let range = nro.section_range(kind).unwrap();
    image[range.start as usize..range.end as usize].to_vec()
}

#[test]
fn test_save_control_without_edits_is_identity() {
    let dir = tempfile::tempdir().unwrap();
    let path = NroFixture::new().write_to(dir.path(), "app.nro");
    let before = std::fs::read(&path).unwrap();

    let mut nro = Nro::open(&path).unwrap();
    let control = nro.payload(AssetKind::Control).unwrap().into_owned();
    nro.save_control().unwrap();
    drop(nro);

    let after = std::fs::read(&path).unwrap();
    assert_eq!(after, before);

    let nro = Nro::open(&path).unwrap();
    assert_eq!(nro.payload(AssetKind::Control).unwrap(), control);
}

#[test]
fn test_set_name_persists_for_all_languages() {
    let dir = tempfile::tempdir().unwrap();
    let path = NroFixture::new().write_to(dir.path(), "app.nro");

    let mut nro = Nro::open(&path).unwrap();
    nro.set_name("Test").unwrap();
    assert_eq!(nro.name(), "Test");
    nro.save_control().unwrap();
    nro.close().unwrap();

    let nro = Nro::open(&path).unwrap();
    let entries = nro.nacp().unwrap().language_entries();
    assert_eq!(entries.len(), 16);
    for entry in entries {
        assert_eq!(entry.name.to_str().unwrap(), "Test");
        assert_eq!(entry.publisher.to_str().unwrap(), "Sample Author");
    }
}

#[test]
fn test_set_display_version_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = NroFixture::new().write_to(dir.path(), "app.nro");

    let mut nro = Nro::open(&path).unwrap();
    nro.set_display_version("1.0.0").unwrap();
    nro.save_control().unwrap();
    drop(nro);

    let nro = Nro::open(&path).unwrap();
    assert_eq!(nro.display_version(), "1.0.0");
    assert_eq!(nro.to_string(), "Sample App v1.0.0 by Sample Author");
}

#[test]
fn test_publisher_edit_preserves_other_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = NroFixture::new().write_to(dir.path(), "app.nro");

    let mut nro = Nro::open(&path).unwrap();
    let icon_path = dir.path().join("before_icon.jpg");
    let romfs_path = dir.path().join("before.romfs");
    nro.extract_icon(&icon_path).unwrap();
    nro.extract_romfs(&romfs_path).unwrap();

    nro.set_publisher("New Publisher").unwrap();
    nro.save_control().unwrap();
    drop(nro);

    let nro = Nro::open(&path).unwrap();
    assert!(
        nro.nacp()
            .unwrap()
            .language_entries()
            .iter()
            .all(|entry| entry.publisher.to_str() == Ok("New Publisher"))
    );
    assert_eq!(nro.icon(), std::fs::read(&icon_path).unwrap());
    assert_eq!(nro.romfs(), std::fs::read(&romfs_path).unwrap());
}

#[test]
fn test_save_control_writes_only_control_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = NroFixture::new().write_to(dir.path(), "app.nro");
    let before = std::fs::read(&path).unwrap();

    let mut nro = Nro::open(&path).unwrap();
    nro.set_name("Renamed").unwrap();
    nro.set_publisher("Someone Else").unwrap();
    nro.set_display_version("9.9.9").unwrap();
    nro.save_control().unwrap();
    let range = nro.section_range(AssetKind::Control).unwrap();
    drop(nro);

    let after = std::fs::read(&path).unwrap();
    assert_eq!(after.len(), before.len());

    let (start, end) = (range.start as usize, range.end as usize);
    assert_eq!(after[..start], before[..start]);
    assert_eq!(after[end..], before[end..]);
    assert_ne!(after[start..end], before[start..end]);

    // Fields and reserved bytes past the edited text survive the rewrite
    assert_eq!(after[start + 0x3070..end], before[start + 0x3070..end]);
}

#[test]
fn test_too_long_edits_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = NroFixture::new().write_to(dir.path(), "app.nro");

    let mut nro = Nro::open(&path).unwrap();
    assert_eq!(
        nro.set_name(&"n".repeat(513)),
        Err(EditError::TooLong {
            field: TextField::Name,
            len: 513,
            max: 512
        })
    );
    assert!(matches!(
        nro.set_publisher(&"p".repeat(257)),
        Err(EditError::TooLong {
            field: TextField::Publisher,
            ..
        })
    ));
    assert!(matches!(
        nro.set_display_version("10.20.30.40.50.60"),
        Err(EditError::TooLong {
            field: TextField::DisplayVersion,
            ..
        })
    ));

    nro.set_name(&"n".repeat(512)).unwrap();
    nro.set_publisher(&"p".repeat(256)).unwrap();
    nro.set_display_version(&"v".repeat(16)).unwrap();
    nro.save_control().unwrap();
    drop(nro);

    let nro = Nro::open(&path).unwrap();
    assert_eq!(nro.name(), "n".repeat(512));
    assert_eq!(nro.publisher(), "p".repeat(256));
    assert_eq!(nro.display_version(), "v".repeat(16));
}

#[test]
fn test_edits_without_control_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = NroFixture::new()
        .nacp(Vec::new())
        .write_to(dir.path(), "app.nro");

    let mut nro = Nro::open(&path).unwrap();
    assert_eq!(nro.set_name("Test"), Err(EditError::Unavailable));
    assert!(matches!(
        nro.save_control(),
        Err(SaveError::Unavailable {
            section: AssetKind::Control
        })
    ));
}

#[test]
fn test_oversized_control_section_keeps_trailing_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let mut control = common::sample_nacp("Big", "Big Co", "2.0");
    control.extend_from_slice(&[0xc3; 0x40]);
    let path = NroFixture::new()
        .nacp(control)
        .write_to(dir.path(), "app.nro");
    let before = std::fs::read(&path).unwrap();

    let mut nro = Nro::open(&path).unwrap();
    assert_eq!(nro.nacp().unwrap().serialized_len(), 0x4040);
    nro.set_name("Bigger").unwrap();
    nro.save_control().unwrap();
    let range = nro.section_range(AssetKind::Control).unwrap();
    drop(nro);

    let after = std::fs::read(&path).unwrap();
    assert_eq!(after.len(), before.len());
    assert_eq!(
        after[range.end as usize - 0x40..range.end as usize],
        [0xc3; 0x40]
    );
    assert_eq!(after[range.end as usize..], before[range.end as usize..]);
}

#[test]
fn test_save_writes_header_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = NroFixture::new().write_to(dir.path(), "app.nro");
    let before = std::fs::read(&path).unwrap();

    let mut nro = Nro::open(&path).unwrap();
    nro.file_header_mut().header.version = 1u32.into();
    nro.asset_header_mut().version = 7u32.into();
    nro.save().unwrap();
    drop(nro);

    let after = std::fs::read(&path).unwrap();
    assert_eq!(after.len(), before.len());

    let nro = Nro::open(&path).unwrap();
    assert_eq!(nro.header().version.get(), 1);
    assert_eq!(nro.asset_header().version.get(), 7);

    // Only the two version fields differ
    let base = asset_offset(&before);
    let changed: Vec<usize> = (0..before.len())
        .filter(|&i| before[i] != after[i])
        .collect();
    assert_eq!(changed, vec![0x14, base + 4]);
    assert_eq!(section_bytes(&after, &nro, AssetKind::Icon), nro.icon());
}

#[test]
fn test_save_control_uses_range_from_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = NroFixture::new().write_to(dir.path(), "app.nro");

    let mut nro = Nro::open(&path).unwrap();
    let range = nro.section_range(AssetKind::Control).unwrap();
    nro.asset_header_mut().nacp.offset = u64::MAX.into();
    assert_eq!(nro.section_range(AssetKind::Control), None);

    nro.set_name("Moved").unwrap();
    nro.save_control().unwrap();
    drop(nro);

    // The header change was never saved, so the file still loads
    let nro = Nro::open(&path).unwrap();
    assert_eq!(nro.name(), "Moved");
    assert_eq!(nro.section_range(AssetKind::Control), Some(range));
}
