// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

pub mod native_path;
pub mod os_environment;
pub mod search_path;
