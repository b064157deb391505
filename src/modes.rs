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

//! One encoder per semantic mode. Each knows its register address(es),
//! its legal value set and the textual vocabulary exposed to callers.
//!
//! Decoding is total: bytes outside the known value set come back as an
//! `Unknown(raw)` variant so read paths never fail on odd hardware state.
//! Writes reject out-of-vocabulary requests before touching the EC.

use std::fmt;

use crate::ec::{EcDevice, EcError};
use crate::registers::*;

/// Plain on/off toggle backed by a single bit (webcam, cooler boost,
/// mute/micmute LEDs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn as_str(self) -> &'static str {
        match self {
            Switch::On => "on",
            Switch::Off => "off",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EcError> {
        match s {
            "on" => Ok(Switch::On),
            "off" => Ok(Switch::Off),
            other => Err(EcError::InvalidRequest(format!(
                "expected on/off, got {:?}",
                other
            ))),
        }
    }

    fn from_bit(set: bool) -> Self {
        if set {
            Switch::On
        } else {
            Switch::Off
        }
    }

    fn bit(self) -> bool {
        self == Switch::On
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn webcam(ec: &EcDevice) -> Result<Switch, EcError> {
    Ok(Switch::from_bit(ec.read_bit(WEBCAM_ADDRESS, WEBCAM_BIT)?))
}

pub fn set_webcam(ec: &EcDevice, state: Switch) -> Result<(), EcError> {
    ec.write_bit(WEBCAM_ADDRESS, WEBCAM_BIT, state.bit())
}

pub fn cooler_boost(ec: &EcDevice) -> Result<Switch, EcError> {
    Ok(Switch::from_bit(
        ec.read_bit(COOLER_BOOST_ADDRESS, COOLER_BOOST_BIT)?,
    ))
}

pub fn set_cooler_boost(ec: &EcDevice, state: Switch) -> Result<(), EcError> {
    ec.write_bit(COOLER_BOOST_ADDRESS, COOLER_BOOST_BIT, state.bit())
}

pub fn mute_led(ec: &EcDevice) -> Result<Switch, EcError> {
    Ok(Switch::from_bit(ec.read_bit(MUTE_LED_ADDRESS, MUTE_LED_BIT)?))
}

pub fn set_mute_led(ec: &EcDevice, state: Switch) -> Result<(), EcError> {
    ec.write_bit(MUTE_LED_ADDRESS, MUTE_LED_BIT, state.bit())
}

pub fn micmute_led(ec: &EcDevice) -> Result<Switch, EcError> {
    Ok(Switch::from_bit(
        ec.read_bit(MICMUTE_LED_ADDRESS, MICMUTE_LED_BIT)?,
    ))
}

pub fn set_micmute_led(ec: &EcDevice, state: Switch) -> Result<(), EcError> {
    ec.write_bit(MICMUTE_LED_ADDRESS, MICMUTE_LED_BIT, state.bit())
}

/// Which side of the keyboard a key sits on. fn_key and win_key are two
/// views over the same bit: moving one necessarily moves the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySide {
    Left,
    Right,
}

impl KeySide {
    pub fn as_str(self) -> &'static str {
        match self {
            KeySide::Left => "left",
            KeySide::Right => "right",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EcError> {
        match s {
            "left" => Ok(KeySide::Left),
            "right" => Ok(KeySide::Right),
            other => Err(EcError::InvalidRequest(format!(
                "expected left/right, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for KeySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn fn_key(ec: &EcDevice) -> Result<KeySide, EcError> {
    let set = ec.read_bit(FN_WIN_ADDRESS, FN_WIN_BIT)?;
    Ok(if set { KeySide::Left } else { KeySide::Right })
}

pub fn set_fn_key(ec: &EcDevice, side: KeySide) -> Result<(), EcError> {
    ec.write_bit(FN_WIN_ADDRESS, FN_WIN_BIT, side == KeySide::Left)
}

pub fn win_key(ec: &EcDevice) -> Result<KeySide, EcError> {
    let set = ec.read_bit(FN_WIN_ADDRESS, FN_WIN_BIT)?;
    Ok(if set { KeySide::Right } else { KeySide::Left })
}

pub fn set_win_key(ec: &EcDevice, side: KeySide) -> Result<(), EcError> {
    ec.write_bit(FN_WIN_ADDRESS, FN_WIN_BIT, side == KeySide::Right)
}

/// Battery charge ceiling. The register holds one of three magic bytes;
/// anything else is reported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryChargeMode {
    Max,
    Medium,
    Min,
    Unknown(u8),
}

impl BatteryChargeMode {
    pub fn decode(raw: u8) -> Self {
        match raw {
            BATTERY_MODE_MAX_CHARGE => BatteryChargeMode::Max,
            BATTERY_MODE_MEDIUM_CHARGE => BatteryChargeMode::Medium,
            BATTERY_MODE_MIN_CHARGE => BatteryChargeMode::Min,
            other => BatteryChargeMode::Unknown(other),
        }
    }

    pub fn encode(self) -> Result<u8, EcError> {
        match self {
            BatteryChargeMode::Max => Ok(BATTERY_MODE_MAX_CHARGE),
            BatteryChargeMode::Medium => Ok(BATTERY_MODE_MEDIUM_CHARGE),
            BatteryChargeMode::Min => Ok(BATTERY_MODE_MIN_CHARGE),
            BatteryChargeMode::Unknown(raw) => Err(EcError::InvalidRequest(format!(
                "cannot write unknown battery mode byte {:#04x}",
                raw
            ))),
        }
    }

    pub fn parse(s: &str) -> Result<Self, EcError> {
        match s {
            "max" => Ok(BatteryChargeMode::Max),
            "medium" => Ok(BatteryChargeMode::Medium),
            "min" => Ok(BatteryChargeMode::Min),
            other => Err(EcError::InvalidRequest(format!(
                "expected max/medium/min, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for BatteryChargeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatteryChargeMode::Max => f.write_str("max"),
            BatteryChargeMode::Medium => f.write_str("medium"),
            BatteryChargeMode::Min => f.write_str("min"),
            BatteryChargeMode::Unknown(raw) => write!(f, "unknown ({})", raw),
        }
    }
}

pub fn battery_charge_mode(ec: &EcDevice) -> Result<BatteryChargeMode, EcError> {
    Ok(BatteryChargeMode::decode(ec.read_byte(BATTERY_MODE_ADDRESS)?))
}

pub fn set_battery_charge_mode(ec: &EcDevice, mode: BatteryChargeMode) -> Result<(), EcError> {
    let raw = mode.encode()?;
    ec.write_byte(BATTERY_MODE_ADDRESS, raw)
}

/// CPU/GPU clock governing tier. Byte-equality encoding, injective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftMode {
    Overclock,
    Balanced,
    Eco,
    Off,
    Unknown(u8),
}

impl ShiftMode {
    pub fn decode(raw: u8) -> Self {
        match raw {
            SHIFT_MODE_OVERCLOCK => ShiftMode::Overclock,
            SHIFT_MODE_BALANCED => ShiftMode::Balanced,
            SHIFT_MODE_ECO => ShiftMode::Eco,
            SHIFT_MODE_OFF => ShiftMode::Off,
            other => ShiftMode::Unknown(other),
        }
    }

    pub fn encode(self) -> Result<u8, EcError> {
        match self {
            ShiftMode::Overclock => Ok(SHIFT_MODE_OVERCLOCK),
            ShiftMode::Balanced => Ok(SHIFT_MODE_BALANCED),
            ShiftMode::Eco => Ok(SHIFT_MODE_ECO),
            ShiftMode::Off => Ok(SHIFT_MODE_OFF),
            ShiftMode::Unknown(raw) => Err(EcError::InvalidRequest(format!(
                "cannot write unknown shift mode byte {:#04x}",
                raw
            ))),
        }
    }

    pub fn parse(s: &str) -> Result<Self, EcError> {
        match s {
            "overclock" => Ok(ShiftMode::Overclock),
            "balanced" => Ok(ShiftMode::Balanced),
            "eco" => Ok(ShiftMode::Eco),
            "off" => Ok(ShiftMode::Off),
            other => Err(EcError::InvalidRequest(format!(
                "expected overclock/balanced/eco/off, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for ShiftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftMode::Overclock => f.write_str("overclock"),
            ShiftMode::Balanced => f.write_str("balanced"),
            ShiftMode::Eco => f.write_str("eco"),
            ShiftMode::Off => f.write_str("off"),
            ShiftMode::Unknown(raw) => write!(f, "unknown ({})", raw),
        }
    }
}

pub fn shift_mode(ec: &EcDevice) -> Result<ShiftMode, EcError> {
    Ok(ShiftMode::decode(ec.read_byte(SHIFT_MODE_ADDRESS)?))
}

pub fn set_shift_mode(ec: &EcDevice, mode: ShiftMode) -> Result<(), EcError> {
    let raw = mode.encode()?;
    ec.write_byte(SHIFT_MODE_ADDRESS, raw)
}

/// Fan behavior. Three mutually exclusive flags live in one byte; if the
/// firmware ever asserts more than one, decoding resolves the conflict by
/// the fixed priority silent > advanced > basic. No flag set means auto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanMode {
    Auto,
    Silent,
    Basic,
    Advanced,
}

impl FanMode {
    pub fn decode(raw: u8) -> Self {
        if crate::ec::is_bit_set(FAN_MODE_SILENT_BIT, raw) {
            FanMode::Silent
        } else if crate::ec::is_bit_set(FAN_MODE_ADVANCED_BIT, raw) {
            FanMode::Advanced
        } else if crate::ec::is_bit_set(FAN_MODE_BASIC_BIT, raw) {
            FanMode::Basic
        } else {
            FanMode::Auto
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FanMode::Auto => "auto",
            FanMode::Silent => "silent",
            FanMode::Basic => "basic",
            FanMode::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EcError> {
        match s {
            "auto" => Ok(FanMode::Auto),
            "silent" => Ok(FanMode::Silent),
            "basic" => Ok(FanMode::Basic),
            "advanced" => Ok(FanMode::Advanced),
            other => Err(EcError::InvalidRequest(format!(
                "expected auto/silent/basic/advanced, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for FanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn fan_mode(ec: &EcDevice) -> Result<FanMode, EcError> {
    Ok(FanMode::decode(ec.read_byte(FAN_MODE_ADDRESS)?))
}

/// Rewrites all three flag bits so exactly the requested mode remains
/// asserted. The three RMWs run under one lock acquisition so another
/// writer cannot observe or clobber a half-updated flag set.
pub fn set_fan_mode(ec: &EcDevice, mode: FanMode) -> Result<(), EcError> {
    let result = ec.with_transport(|t| {
        crate::ec::transport_write_bit(
            t,
            FAN_MODE_ADDRESS,
            FAN_MODE_BASIC_BIT,
            mode == FanMode::Basic,
        )?;
        crate::ec::transport_write_bit(
            t,
            FAN_MODE_ADDRESS,
            FAN_MODE_ADVANCED_BIT,
            mode == FanMode::Advanced,
        )?;
        crate::ec::transport_write_bit(
            t,
            FAN_MODE_ADDRESS,
            FAN_MODE_SILENT_BIT,
            mode == FanMode::Silent,
        )
    });
    Ok(result?)
}

/// Keyboard backlight level; four steps mapped through a fixed state
/// table. The low two bits of the register encode the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KbdBacklight {
    Off,
    On,
    Half,
    Full,
}

impl KbdBacklight {
    pub fn level(self) -> u8 {
        match self {
            KbdBacklight::Off => 0,
            KbdBacklight::On => 1,
            KbdBacklight::Half => 2,
            KbdBacklight::Full => 3,
        }
    }

    pub fn from_level(level: u8) -> Result<Self, EcError> {
        match level {
            0 => Ok(KbdBacklight::Off),
            1 => Ok(KbdBacklight::On),
            2 => Ok(KbdBacklight::Half),
            3 => Ok(KbdBacklight::Full),
            other => Err(EcError::InvalidRequest(format!(
                "backlight level {} out of range 0..={}",
                other,
                KBD_BACKLIGHT_STATES.len() - 1
            ))),
        }
    }

    pub fn decode(raw: u8) -> Self {
        // Masking keeps this total; undocumented high bits are ignored.
        match raw & KBD_BACKLIGHT_STATE_MASK {
            0 => KbdBacklight::Off,
            1 => KbdBacklight::On,
            2 => KbdBacklight::Half,
            _ => KbdBacklight::Full,
        }
    }

    pub fn encode(self) -> u8 {
        KBD_BACKLIGHT_STATES[self.level() as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KbdBacklight::Off => "off",
            KbdBacklight::On => "on",
            KbdBacklight::Half => "half",
            KbdBacklight::Full => "full",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EcError> {
        match s {
            "off" => Ok(KbdBacklight::Off),
            "on" => Ok(KbdBacklight::On),
            "half" => Ok(KbdBacklight::Half),
            "full" => Ok(KbdBacklight::Full),
            other => match other.parse::<u8>() {
                Ok(level) => Self::from_level(level),
                Err(_) => Err(EcError::InvalidRequest(format!(
                    "expected off/on/half/full or a level 0-3, got {:?}",
                    other
                ))),
            },
        }
    }
}

impl fmt::Display for KbdBacklight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn kbd_backlight(ec: &EcDevice) -> Result<KbdBacklight, EcError> {
    Ok(KbdBacklight::decode(ec.read_byte(KBD_BACKLIGHT_ADDRESS)?))
}

pub fn set_kbd_backlight(ec: &EcDevice, level: KbdBacklight) -> Result<(), EcError> {
    ec.write_byte(KBD_BACKLIGHT_ADDRESS, level.encode())
}

/// The super battery register is byte-valued, not bit-valued: anything
/// other than the exact "on" byte reads as off.
pub fn super_battery(ec: &EcDevice) -> Result<Switch, EcError> {
    let raw = ec.read_byte(SUPER_BATTERY_ADDRESS)?;
    Ok(Switch::from_bit(raw == SUPER_BATTERY_ON))
}

pub fn set_super_battery(ec: &EcDevice, state: Switch) -> Result<(), EcError> {
    let raw = match state {
        Switch::On => SUPER_BATTERY_ON,
        Switch::Off => SUPER_BATTERY_OFF,
    };
    ec.write_byte(SUPER_BATTERY_ADDRESS, raw)
}

pub fn ac_connected(ec: &EcDevice) -> Result<bool, EcError> {
    ec.read_bit(POWER_STATUS_ADDRESS, POWER_AC_CONNECTED_BIT)
}

pub fn lid_open(ec: &EcDevice) -> Result<bool, EcError> {
    ec.read_bit(POWER_STATUS_ADDRESS, POWER_LID_OPEN_BIT)
}
