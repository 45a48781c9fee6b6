//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::Context;
use nx_nro::{AssetKind, ExtractError, Language, LanguageFlags, Nro};

use crate::{EditFields, ExtractTargets};

pub fn info(path: &Path, language: Option<Language>) -> anyhow::Result<()> {
    let nro = open(path)?;

    print!("{}", nro.summary());
    println!();
    println!("  Build ID: {}", hex(nro.build_id()));
    for kind in AssetKind::ALL {
        let section = nro.section(kind);
        println!(
            "  {kind} section: offset {:#x}, size {:#x}",
            section.offset.get(),
            section.size.get()
        );
    }

    let Some(nacp) = nro.nacp() else {
        return Ok(());
    };

    println!();
    match language {
        Some(language) => match nacp.language_entry_for(language) {
            Some(entry) => println!("  [{language}] {} by {}", entry.name, entry.publisher),
            None => println!("  [{language}] <not set>"),
        },
        None => {
            for (flag_name, flag) in LanguageFlags::all().iter_names() {
                let Some(entry) = flag.entry_index().and_then(|i| nacp.language_entry(i)) else {
                    continue;
                };
                let supported = if nacp.supported_languages().contains(flag) {
                    ""
                } else {
                    " (not flagged as supported)"
                };
                println!(
                    "  [{flag_name}] {} by {}{supported}",
                    entry.name, entry.publisher
                );
            }
        }
    }

    Ok(())
}

pub fn extract(path: &Path, targets: &ExtractTargets) -> anyhow::Result<()> {
    let nro = open(path)?;

    let mut jobs: Vec<(AssetKind, PathBuf)> = Vec::new();
    if let Some(dir) = &targets.all {
        jobs.extend([
            (AssetKind::Icon, dir.join("icon.jpg")),
            (AssetKind::Control, dir.join("control.nacp")),
            (AssetKind::RomFs, dir.join("romfs.romfs")),
        ]);
    }
    for (kind, dest) in [
        (AssetKind::Icon, &targets.icon),
        (AssetKind::Control, &targets.control),
        (AssetKind::RomFs, &targets.romfs),
    ] {
        if let Some(dest) = dest {
            jobs.push((kind, dest.clone()));
        }
    }

    for (kind, dest) in jobs {
        match nro.extract(kind, &dest) {
            Ok(()) => println!("Extracted {kind} to {}", dest.display()),
            Err(ExtractError::Unavailable { .. }) => log::warn!("No {kind} available"),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to extract {kind} to {}", dest.display()));
            }
        }
    }

    Ok(())
}

pub fn edit(path: &Path, fields: &EditFields) -> anyhow::Result<()> {
    let mut nro = open(path)?;

    if let Some(name) = &fields.name {
        nro.set_name(name).context("cannot set name")?;
    }
    if let Some(publisher) = &fields.publisher {
        nro.set_publisher(publisher)
            .context("cannot set publisher")?;
    }
    if let Some(version) = &fields.display_version {
        nro.set_display_version(version)
            .context("cannot set display version")?;
    }

    nro.save_control()
        .with_context(|| format!("failed to save {}", path.display()))?;
    println!("{nro}");

    nro.close()
        .with_context(|| format!("failed to close {}", path.display()))
}

fn open(path: &Path) -> anyhow::Result<Nro> {
    Nro::open(path).with_context(|| format!("{} is not a usable NRO", path.display()))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
