use std::path::Path;
use std::process::Command;

use crate::utils::plist_parser::{get_string, parse_plist_bytes};

/// Device node (e.g. `/dev/disk4`) of the mounted disk image containing `path`,
/// as reported by `hdiutil info -plist`.
pub fn containing_disk_image_device(path: &Path) -> Option<String> {
    if !path.starts_with("/Volumes") {
        return None;
    }

    let output = Command::new("hdiutil")
        .current_dir("/tmp")
        .args(["info", "-plist"])
        .output()
        .ok()?;
    if !output.status.success() {
        log::debug!(
            "hdiutil info failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    let info = parse_plist_bytes(&output.stdout).ok()?;
    find_device_for_path(&info, path)
}

/// Walk `images[].system-entities[]` looking for a mount point that contains
/// `path`; returns the whole-disk device of that image.
pub fn find_device_for_path(info: &plist::Value, path: &Path) -> Option<String> {
    let images = info.as_dictionary()?.get("images")?.as_array()?;

    for image in images {
        let entities = match image
            .as_dictionary()
            .and_then(|d| d.get("system-entities"))
            .and_then(|e| e.as_array())
        {
            Some(e) => e,
            None => continue,
        };

        let mounted_here = entities.iter().filter_map(|e| e.as_dictionary()).any(|e| {
            get_string(e, "mount-point").map_or(false, |mp| path.starts_with(mp))
        });
        if !mounted_here {
            continue;
        }

        // The whole-disk entry is the shortest dev-entry (/dev/disk4 vs /dev/disk4s1).
        return entities
            .iter()
            .filter_map(|e| e.as_dictionary())
            .filter_map(|e| get_string(e, "dev-entry"))
            .min_by_key(|dev| dev.len());
    }

    None
}
