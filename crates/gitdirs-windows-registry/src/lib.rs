// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod install_location;

pub use install_location::{
    find_install_location, install_root_with_suffix, machine_install_key, user_install_key,
    InstallLocationKey, RegistryHive,
};
