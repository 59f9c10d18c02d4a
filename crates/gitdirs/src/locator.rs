// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use gitdirs_core::native_path::{walk_path_list, NativePathBuf, MAX_PATH};
use gitdirs_core::os_environment::Environment;
use gitdirs_fs::path::{exists, to_portable};
use log::trace;

const BACKSLASH: u16 = b'\\' as u16;
const SLASH: u16 = b'/' as u16;

/// How many units the executable's parent segment (`bin\` or `cmd\`)
/// occupies at the end of a hit, including its trailing separator.
const TOOL_SUBDIR_LEN: usize = 4;

/// A directory produced by the walker must be longer than this before the
/// tail substitution is allowed to touch it.
const MIN_DIR_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// The PATH variable itself is absent from the environment.
    NoPathVariable,
    /// PATH was walked to the end without a hit.
    NotFound,
}

/// Walks the PATH list looking for `exe`, and on a hit swaps the
/// executable's conventional `bin\`/`cmd\` parent segment for `subdir`,
/// yielding the sibling install directory in portable form.
///
/// Candidates that cannot take a trailing separator or the executable name
/// without exceeding [`MAX_PATH`] are skipped, never truncated.
pub fn find_tool_in_path(
    environment: &dyn Environment,
    exe: &str,
    subdir: &str,
) -> Result<String, LocateError> {
    let path_var = environment
        .get_env_var("PATH")
        .ok_or(LocateError::NoPathVariable)?;

    let path16: Vec<u16> = path_var.encode_utf16().collect();
    let exe16: Vec<u16> = exe.encode_utf16().collect();
    let subdir16: Vec<u16> = subdir.encode_utf16().collect();

    let mut cursor: &[u16] = &path16;
    let mut dir = NativePathBuf::new();

    while let Some(rest) = walk_path_list(cursor, &mut dir) {
        cursor = rest;
        if dir.is_empty() {
            break;
        }

        match dir.last() {
            Some(SLASH) | Some(BACKSLASH) => {}
            _ => {
                if dir.push(BACKSLASH).is_err() {
                    continue;
                }
            }
        }
        let dir_len = dir.len();

        if dir_len + exe16.len() >= MAX_PATH {
            trace!("skipping PATH entry too long to hold {}", exe);
            continue;
        }
        if dir.push_wide(&exe16).is_err() {
            continue;
        }

        if exists(dir.as_wide()) && dir_len > MIN_DIR_LEN {
            // replace "bin\" or "cmd\" with subdir
            dir.truncate(dir_len - TOOL_SUBDIR_LEN);
            if dir.push_wide(&subdir16).is_err() {
                trace!("skipping hit for {}, subdir does not fit", exe);
                continue;
            }
            if let Some(found) = to_portable(dir.as_wide()) {
                trace!("found {} under {}", exe, found);
                return Ok(found);
            }
        }
    }

    Err(LocateError::NotFound)
}
