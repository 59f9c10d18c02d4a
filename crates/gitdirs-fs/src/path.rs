// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use log::warn;
use std::{fs, path::PathBuf};

/// Converts a native UTF-16 path to a portable UTF-8 string with
/// forward-slash separators.
///
/// Only the separators are rewritten: no case folding, no trailing-slash
/// trimming, no collapsing of repeated slashes. Returns `None` (and logs)
/// when the path is not valid UTF-16.
pub fn to_portable(wide: &[u16]) -> Option<String> {
    match String::from_utf16(wide) {
        Ok(path) => Some(path.replace('\\', "/")),
        Err(err) => {
            warn!("unable to convert path to UTF-8: {}", err);
            None
        }
    }
}

/// Converts a native UTF-16 path into an owned [`PathBuf`] for OS calls.
#[cfg(windows)]
pub fn wide_to_path(wide: &[u16]) -> PathBuf {
    use std::{ffi::OsString, os::windows::ffi::OsStringExt};
    PathBuf::from(OsString::from_wide(wide))
}

#[cfg(not(windows))]
pub fn wide_to_path(wide: &[u16]) -> PathBuf {
    PathBuf::from(String::from_utf16_lossy(wide))
}

/// Probes whether anything (file or directory) exists at the native path.
pub fn exists(wide: &[u16]) -> bool {
    fs::metadata(wide_to_path(wide)).is_ok()
}
