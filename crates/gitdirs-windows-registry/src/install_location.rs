// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use gitdirs_core::native_path::{NativePathBuf, MAX_PATH};
use gitdirs_fs::path::to_portable;
use log::trace;

const GIT_UNINSTALL_SUBKEY: &str =
    "SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Uninstall\\Git_is1";

// A 32-bit process sees the 32-bit registry view directly; a 64-bit process
// has to go through Wow6432Node to reach the same install record.
#[cfg(target_pointer_width = "64")]
const GIT_UNINSTALL_SUBKEY_MACHINE: &str =
    "SOFTWARE\\Wow6432Node\\Microsoft\\Windows\\CurrentVersion\\Uninstall\\Git_is1";
#[cfg(not(target_pointer_width = "64"))]
const GIT_UNINSTALL_SUBKEY_MACHINE: &str = GIT_UNINSTALL_SUBKEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryHive {
    CurrentUser,
    LocalMachine,
}

/// Where to look for an `InstallLocation` record.
#[derive(Debug, Clone, Copy)]
pub struct InstallLocationKey {
    pub hive: RegistryHive,
    pub subkey: &'static str,
}

/// The per-user install record.
pub fn user_install_key() -> InstallLocationKey {
    InstallLocationKey {
        hive: RegistryHive::CurrentUser,
        subkey: GIT_UNINSTALL_SUBKEY,
    }
}

/// The machine-wide install record, routed through the registry view that
/// matches this process's bitness.
pub fn machine_install_key() -> InstallLocationKey {
    InstallLocationKey {
        hive: RegistryHive::LocalMachine,
        subkey: GIT_UNINSTALL_SUBKEY_MACHINE,
    }
}

/// Reads the `InstallLocation` string under `key` and appends `subdir`,
/// returning the portable form of the resulting directory.
///
/// Absence of the key or value, a non-string value, and an install location
/// too long to carry the suffix are all "not found" — expected on most
/// machines, never an error. The key handle is released on every path.
#[cfg(windows)]
pub fn find_install_location(key: &InstallLocationKey, subdir: &str) -> Option<String> {
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};
    use winreg::RegKey;

    let hive = match key.hive {
        RegistryHive::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
        RegistryHive::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
    };

    let reg_key = match hive.open_subkey(key.subkey) {
        Ok(reg_key) => reg_key,
        Err(err) => {
            trace!("registry key {} not readable, {:?}", key.subkey, err);
            return None;
        }
    };

    // Fails on anything that is not a string value.
    let install_location: String = match reg_key.get_value("InstallLocation") {
        Ok(value) => value,
        Err(err) => {
            trace!("no InstallLocation under {}, {:?}", key.subkey, err);
            return None;
        }
    };

    install_root_with_suffix(&install_location, subdir)
}

#[cfg(not(windows))]
pub fn find_install_location(_key: &InstallLocationKey, _subdir: &str) -> Option<String> {
    None
}

/// Appends `subdir` to an install root and normalizes the result.
///
/// The capacity check reserves room for the suffix before anything is
/// written: a root of exactly `MAX_PATH - len(subdir) - 1` units fits, one
/// unit more is rejected outright with no partial suffix ever appended.
pub fn install_root_with_suffix(root: &str, subdir: &str) -> Option<String> {
    let root16: Vec<u16> = root.encode_utf16().collect();
    let subdir16: Vec<u16> = subdir.encode_utf16().collect();

    if root16.len() + subdir16.len() >= MAX_PATH {
        trace!("install location {} too long to carry {}", root, subdir);
        return None;
    }

    let mut path = NativePathBuf::new();
    path.push_wide(&root16).ok()?;
    path.push_wide(&subdir16).ok()?;

    to_portable(path.as_wide())
}
