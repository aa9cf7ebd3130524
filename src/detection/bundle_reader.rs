use std::path::{Path, PathBuf};

use crate::models::BundleInfo;
use crate::utils::plist_parser::{get_string, read_info_plist};
use crate::utils::{AppError, AppResult};

pub fn read_bundle(app_path: &Path) -> Option<BundleInfo> {
    let dict = match read_info_plist(app_path) {
        Ok(d) => d,
        Err(e) => {
            log::debug!("Cannot read Info.plist of {}: {}", app_path.display(), e);
            return None;
        }
    };

    let display_name = get_string(&dict, "CFBundleDisplayName")
        .or_else(|| get_string(&dict, "CFBundleName"))
        .unwrap_or_else(|| bundle_stem(app_path));

    Some(BundleInfo {
        path: app_path.to_path_buf(),
        bundle_id: get_string(&dict, "CFBundleIdentifier"),
        display_name,
        version: get_string(&dict, "CFBundleShortVersionString")
            .or_else(|| get_string(&dict, "CFBundleVersion")),
    })
}

/// Like [`read_bundle`], but never fails: unreadable metadata yields a bundle
/// named after its directory with no version.
pub fn read_bundle_lossy(app_path: &Path) -> BundleInfo {
    read_bundle(app_path).unwrap_or_else(|| {
        log::warn!(
            "Bundle metadata unreadable at {}, version checks will be skipped",
            app_path.display()
        );
        BundleInfo {
            path: app_path.to_path_buf(),
            bundle_id: None,
            display_name: bundle_stem(app_path),
            version: None,
        }
    })
}

/// Resolve the `.app` bundle that contains the running executable.
pub fn current_bundle_path() -> AppResult<PathBuf> {
    let exe = std::env::current_exe()?;
    bundle_path_for_executable(&exe).ok_or_else(|| {
        AppError::Custom(format!("{} is not inside an application bundle", exe.display()))
    })
}

/// exe is `<bundle>.app/Contents/MacOS/<binary>`.
pub fn bundle_path_for_executable(exe: &Path) -> Option<PathBuf> {
    let bundle = exe
        .parent() // MacOS/
        .filter(|p| p.file_name().map_or(false, |n| n == "MacOS"))?
        .parent() // Contents/
        .filter(|p| p.file_name().map_or(false, |n| n == "Contents"))?
        .parent()?; // .app/
    if bundle.extension().map_or(false, |ext| ext == "app") {
        Some(bundle.to_path_buf())
    } else {
        None
    }
}

fn bundle_stem(app_path: &Path) -> String {
    app_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown")
        .to_string()
}

#[cfg(test)]
pub(crate) fn write_test_bundle(dir: &Path, name: &str, version: Option<&str>) -> PathBuf {
    let bundle = dir.join(name);
    let contents = bundle.join("Contents");
    std::fs::create_dir_all(contents.join("MacOS")).unwrap();
    let mut dict = plist::Dictionary::new();
    dict.insert("CFBundleIdentifier".into(), "com.example.demo".into());
    dict.insert("CFBundleName".into(), "Demo".into());
    if let Some(v) = version {
        dict.insert("CFBundleShortVersionString".into(), v.into());
    }
    plist::Value::Dictionary(dict)
        .to_file_xml(contents.join("Info.plist"))
        .unwrap();
    std::fs::write(contents.join("MacOS/Demo"), b"#!/bin/sh\n").unwrap();
    bundle
}
