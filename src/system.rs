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

use std::fs;
use std::process::Command;

fn read_dmi(field: &str) -> Option<String> {
    fs::read_to_string(format!("/sys/devices/virtual/dmi/id/{}", field))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn read_board_vendor() -> Option<String> {
    read_dmi("board_vendor").or_else(|| read_dmi("sys_vendor"))
}

pub fn read_board_name() -> Option<String> {
    read_dmi("board_name").or_else(|| read_dmi("product_name"))
}

/// The register map only holds on MSI firmware; other vendors put
/// different meanings behind the same addresses.
pub fn is_msi_board() -> bool {
    read_board_vendor()
        .map(|v| v.to_lowercase().contains("micro-star") || v.to_lowercase().contains("msi"))
        .unwrap_or(false)
}

/// Load the ec_sys kernel module with write support so the debugfs
/// register file exists and accepts writes. Best effort; the transport
/// open reports the real failure if this did not help.
pub fn load_ec_module() {
    let _ = Command::new("modprobe")
        .args(["-q", "ec_sys", "write_support=1"])
        .output();
}
