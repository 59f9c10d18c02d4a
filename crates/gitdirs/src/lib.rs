// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

pub mod find;
pub mod locator;

pub use find::{find_global_dirs, find_programdata_dirs, find_system_dirs, find_xdg_dirs};
