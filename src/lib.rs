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

//! msiec - userspace control for the MSI laptop embedded controller
//!
//! This library talks to the EC register space (through ec_sys debugfs or
//! the raw ACPI EC port protocol) and translates register bytes into named
//! hardware modes: performance presets, fan behavior, battery charge
//! ceiling, keyboard backlight, key-swap position and firmware identity.

pub mod attrs;
pub mod config;
pub mod ec;
pub mod firmware;
pub mod logger;
pub mod modes;
pub mod preset;
pub mod registers;
pub mod system;
pub mod telemetry;
pub mod transport;

#[cfg(test)]
pub mod test_utils;
