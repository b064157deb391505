/*
 * This file is part of msiec.
 *
 * Copyright (C) 2025 msiec contributors
 *
 * msiec is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * msiec is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with msiec. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    EcSys,
    Port,
}

fn default_transport() -> TransportKind {
    TransportKind::EcSys
}

fn default_ec_io_path() -> String {
    crate::transport::EC_SYS_IO_PATH.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SavedConfig {
    #[serde(default = "default_transport")]
    pub transport: TransportKind,
    /// Register file used by the ec_sys transport.
    #[serde(default = "default_ec_io_path")]
    pub ec_io_path: String,
    /// Refuse every write; reads and classification still work.
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub logging: bool,
}

impl Default for SavedConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            ec_io_path: default_ec_io_path(),
            read_only: false,
            logging: false,
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("msiec").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("msiec")
            .join("config.json");
    }
    PathBuf::from("/etc/msiec/config.json")
}

pub fn load_saved_config() -> Option<SavedConfig> {
    let path = config_path();
    let data = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&data).ok()
}

pub fn validate_saved_config(cfg: &SavedConfig) -> Result<(), String> {
    if cfg.ec_io_path.is_empty() {
        return Err("ec_io_path must not be empty".to_string());
    }
    if !cfg.ec_io_path.starts_with('/') {
        return Err(format!("ec_io_path must be absolute: {}", cfg.ec_io_path));
    }
    Ok(())
}
