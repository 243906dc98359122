// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

// Env values used by `Config::from_env`.
pub const UPLOADCARE_PUBLIC_KEY: &str = "UPLOADCARE_PUBLIC_KEY";
pub const UPLOADCARE_SECRET_KEY: &str = "UPLOADCARE_SECRET_KEY";
pub const UPLOADCARE_API_BASE: &str = "UPLOADCARE_API_BASE";
pub const UPLOADCARE_UPLOAD_BASE: &str = "UPLOADCARE_UPLOAD_BASE";
pub const UPLOADCARE_API_VERSION: &str = "UPLOADCARE_API_VERSION";
pub const UPLOADCARE_VERIFY_API_SSL: &str = "UPLOADCARE_VERIFY_API_SSL";
pub const UPLOADCARE_VERIFY_UPLOAD_SSL: &str = "UPLOADCARE_VERIFY_UPLOAD_SSL";

// Defaults.
pub const DEFAULT_API_BASE: &str = "https://api.uploadcare.com/";
pub const DEFAULT_UPLOAD_BASE: &str = "https://upload.uploadcare.com/";
pub const DEFAULT_API_VERSION: &str = "0.5";

// Headers and form fields.
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const WARNING: &str = "warning";
pub const PUB_KEY_FIELD: &str = "pub_key";
pub const LEGACY_PUB_KEY_FIELD: &str = "UPLOADCARE_PUB_KEY";
pub const AUTH_SCHEME: &str = "Uploadcare";

pub const CLIENT_USER_AGENT: &str = concat!("uploadcare-rs/", env!("CARGO_PKG_VERSION"));
