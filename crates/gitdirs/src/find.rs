// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use gitdirs_core::native_path::expand_template;
use gitdirs_core::os_environment::Environment;
use gitdirs_core::search_path::SearchPathList;
use gitdirs_fs::path::{exists, to_portable};
use gitdirs_windows_registry::{find_install_location, machine_install_key, user_install_key};
use log::trace;

const PERCENT: u16 = b'%' as u16;

/// Per-user home directory templates, in priority order.
const GLOBAL_TEMPLATES: &[&str] = &["%HOME%\\", "%HOMEDRIVE%%HOMEPATH%\\", "%USERPROFILE%\\"];

/// XDG-style per-user configuration directory templates.
const XDG_TEMPLATES: &[&str] = &[
    "%XDG_CONFIG_HOME%\\git",
    "%APPDATA%\\git",
    "%LOCALAPPDATA%\\git",
    "%HOME%\\.config\\git",
    "%HOMEDRIVE%%HOMEPATH%\\.config\\git",
    "%USERPROFILE%\\.config\\git",
];

/// Machine-wide configuration directory templates.
const PROGRAMDATA_TEMPLATES: &[&str] = &["%PROGRAMDATA%\\Git"];

/// Expands each template in order and joins the ones that resolve to an
/// existing directory onto `out`.
///
/// `out` is cleared first: this recomputes, it never accumulates across
/// calls. Templates that fail to expand, still start with an unresolved `%`,
/// or point at nothing on disk contribute no entry.
pub fn find_existing_dirs(
    environment: &dyn Environment,
    templates: &[&str],
    out: &mut SearchPathList,
) {
    out.clear();

    for template in templates {
        let template16: Vec<u16> = template.encode_utf16().collect();
        let expanded = match expand_template(environment, &template16) {
            Some(expanded) => expanded,
            None => {
                trace!("template {} did not expand", template);
                continue;
            }
        };
        if expanded.as_wide().first() == Some(&PERCENT) {
            trace!("template {} references an undefined variable", template);
            continue;
        }
        if !exists(expanded.as_wide()) {
            trace!("expanded template {} does not exist on disk", template);
            continue;
        }
        if let Some(dir) = to_portable(expanded.as_wide()) {
            if !dir.is_empty() {
                out.join(&dir);
            }
        }
    }
}

/// Directories where git's shared system-level resources may live, derived
/// from PATH (`git.exe`, then `git.cmd`) and the two registry install
/// records. `subdir` is the suffix substituted for the executable's
/// `bin\`/`cmd\` segment, and appended to registry install roots.
///
/// The first source replaces whatever the caller had in `out`; every later
/// hit is joined. With no hits at all, `out` ends up empty.
pub fn find_system_dirs(environment: &dyn Environment, out: &mut SearchPathList, subdir: &str) {
    use crate::locator::find_tool_in_path;

    match find_tool_in_path(environment, "git.exe", subdir) {
        Ok(dir) => out.set(&dir),
        Err(err) => {
            trace!("git.exe not located via PATH, {:?}", err);
            out.clear();
        }
    }

    if let Ok(dir) = find_tool_in_path(environment, "git.cmd", subdir) {
        out.join(&dir);
    }

    if let Some(dir) = find_install_location(&user_install_key(), subdir) {
        out.join(&dir);
    }
    if let Some(dir) = find_install_location(&machine_install_key(), subdir) {
        out.join(&dir);
    }
}

/// Per-user home-based candidate directories.
pub fn find_global_dirs(environment: &dyn Environment, out: &mut SearchPathList) {
    find_existing_dirs(environment, GLOBAL_TEMPLATES, out)
}

/// Per-user XDG/AppData-style configuration directories.
pub fn find_xdg_dirs(environment: &dyn Environment, out: &mut SearchPathList) {
    find_existing_dirs(environment, XDG_TEMPLATES, out)
}

/// The machine-wide ProgramData directory.
pub fn find_programdata_dirs(environment: &dyn Environment, out: &mut SearchPathList) {
    find_existing_dirs(environment, PROGRAMDATA_TEMPLATES, out)
}
