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

//! EC register map for the MSI Modern 15 (A11M) generation.
//!
//! Addresses and bit positions are hardware facts; everything here is
//! constant data consumed by the codec, mode encoders and preset engine.

pub const WEBCAM_ADDRESS: u8 = 0x2e;
pub const WEBCAM_BIT: u8 = 1;

/// Single bit shared by the fn_key and win_key views: set means the
/// function key sits on the left, clear means the windows key does.
pub const FN_WIN_ADDRESS: u8 = 0xe8;
pub const FN_WIN_BIT: u8 = 4;

pub const BATTERY_MODE_ADDRESS: u8 = 0xd7;
pub const BATTERY_MODE_MAX_CHARGE: u8 = 0xe4;
pub const BATTERY_MODE_MEDIUM_CHARGE: u8 = 0xd0;
pub const BATTERY_MODE_MIN_CHARGE: u8 = 0xbc;

pub const COOLER_BOOST_ADDRESS: u8 = 0x98;
pub const COOLER_BOOST_BIT: u8 = 7;

pub const SHIFT_MODE_ADDRESS: u8 = 0xd2;
pub const SHIFT_MODE_OVERCLOCK: u8 = 0xc4;
pub const SHIFT_MODE_BALANCED: u8 = 0xc1;
pub const SHIFT_MODE_ECO: u8 = 0xc2;
pub const SHIFT_MODE_OFF: u8 = 0x80;

// The fan mode byte carries three mutually exclusive flags plus bits the
// firmware uses for its own purposes; only these three are decoded.
pub const FAN_MODE_ADDRESS: u8 = 0xd4;
pub const FAN_MODE_SILENT_BIT: u8 = 4;
pub const FAN_MODE_BASIC_BIT: u8 = 6;
pub const FAN_MODE_ADVANCED_BIT: u8 = 7;

pub const SUPER_BATTERY_ADDRESS: u8 = 0xeb;
pub const SUPER_BATTERY_ON: u8 = 0x0f;
pub const SUPER_BATTERY_OFF: u8 = 0x00;

pub const KBD_BACKLIGHT_ADDRESS: u8 = 0xd3;
/// Raw bytes written for levels 0..=3; the low two bits encode the level.
pub const KBD_BACKLIGHT_STATES: [u8; 4] = [0x80, 0x81, 0x82, 0x83];
pub const KBD_BACKLIGHT_STATE_MASK: u8 = 0x03;

pub const MICMUTE_LED_ADDRESS: u8 = 0x2c;
pub const MICMUTE_LED_BIT: u8 = 2;

pub const MUTE_LED_ADDRESS: u8 = 0x2d;
pub const MUTE_LED_BIT: u8 = 1;

pub const POWER_STATUS_ADDRESS: u8 = 0x30;
pub const POWER_AC_CONNECTED_BIT: u8 = 0;
pub const POWER_LID_OPEN_BIT: u8 = 1;

pub const CPU_TEMPERATURE_ADDRESS: u8 = 0x68;
pub const CPU_FAN_SPEED_ADDRESS: u8 = 0x71;
/// Calibrated raw range of the CPU fan speed register; readings are
/// rescaled linearly so MIN reads as 0% and MAX as 100%.
pub const CPU_FAN_SPEED_MIN: u8 = 0x19;
pub const CPU_FAN_SPEED_MAX: u8 = 0x37;

pub const GPU_TEMPERATURE_ADDRESS: u8 = 0x80;
pub const GPU_FAN_SPEED_ADDRESS: u8 = 0x89;

pub const FW_VERSION_ADDRESS: u8 = 0xa0;
pub const FW_VERSION_LENGTH: usize = 12;
pub const FW_DATE_ADDRESS: u8 = 0xac;
pub const FW_DATE_LENGTH: usize = 8;
pub const FW_TIME_ADDRESS: u8 = 0xb4;
pub const FW_TIME_LENGTH: usize = 8;
