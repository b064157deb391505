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

//! Flat attribute namespace over the typed accessors.
//!
//! This is the stringly surface the CLI speaks: every readable quantity
//! has a name, every value crosses as text. Writes to read-only names
//! and reads of unknown names fail up front, before any EC traffic.
//! Status bits render as "1"/"0".

use crate::ec::{EcDevice, EcError};
use crate::modes::{
    BatteryChargeMode, FanMode, KbdBacklight, KeySide, ShiftMode, Switch,
};
use crate::{firmware, modes, preset, telemetry};

/// Every attribute name, writable ones first.
pub const ATTRIBUTES: &[&str] = &[
    "preset",
    "webcam",
    "fn_key",
    "win_key",
    "battery_charge_mode",
    "cooler_boost",
    "shift_mode",
    "fan_mode",
    "super_battery",
    "kbd_backlight",
    "micmute_led",
    "mute_led",
    "ac_connected",
    "lid_open",
    "fw_version",
    "fw_release_date",
    "cpu_temperature",
    "cpu_fan_speed",
    "gpu_temperature",
    "gpu_fan_speed",
];

fn digit(flag: bool) -> String {
    if flag { "1" } else { "0" }.to_string()
}

pub fn get(ec: &EcDevice, name: &str) -> Result<String, EcError> {
    match name {
        "preset" => Ok(preset::classify_name(ec).to_string()),
        "webcam" => Ok(modes::webcam(ec)?.to_string()),
        "fn_key" => Ok(modes::fn_key(ec)?.to_string()),
        "win_key" => Ok(modes::win_key(ec)?.to_string()),
        "battery_charge_mode" => Ok(modes::battery_charge_mode(ec)?.to_string()),
        "cooler_boost" => Ok(modes::cooler_boost(ec)?.to_string()),
        "shift_mode" => Ok(modes::shift_mode(ec)?.to_string()),
        "fan_mode" => Ok(modes::fan_mode(ec)?.to_string()),
        "super_battery" => Ok(modes::super_battery(ec)?.to_string()),
        "kbd_backlight" => Ok(modes::kbd_backlight(ec)?.to_string()),
        "micmute_led" => Ok(modes::micmute_led(ec)?.to_string()),
        "mute_led" => Ok(modes::mute_led(ec)?.to_string()),
        "ac_connected" => Ok(digit(modes::ac_connected(ec)?)),
        "lid_open" => Ok(digit(modes::lid_open(ec)?)),
        "fw_version" => firmware::version(ec),
        "fw_release_date" => Ok(firmware::release_date(ec)?.to_string()),
        "cpu_temperature" => Ok(telemetry::cpu_temperature(ec)?.to_string()),
        "cpu_fan_speed" => Ok(telemetry::cpu_fan_speed_percent(ec)?.to_string()),
        "gpu_temperature" => Ok(telemetry::gpu_temperature(ec)?.to_string()),
        "gpu_fan_speed" => Ok(telemetry::gpu_fan_speed_raw(ec)?.to_string()),
        other => Err(EcError::UnknownAttribute(other.to_string())),
    }
}

/// Outcome of a successful [`set`]. Preset application is best-effort,
/// so it can succeed with some columns left unwritten; everything else
/// is all-or-nothing.
#[derive(Debug, PartialEq, Eq)]
pub enum SetStatus {
    Applied,
    Partial { failed_columns: Vec<&'static str> },
}

pub fn set(ec: &EcDevice, name: &str, value: &str) -> Result<SetStatus, EcError> {
    let done = |r: Result<(), EcError>| r.map(|()| SetStatus::Applied);
    match name {
        // Only an unrecognized preset name fails; column write failures
        // are logged and surfaced through the partial status.
        "preset" => {
            let report = preset::apply(ec, preset::Preset::parse(value)?);
            if report.fully_applied() {
                Ok(SetStatus::Applied)
            } else {
                Ok(SetStatus::Partial {
                    failed_columns: report
                        .outcomes
                        .iter()
                        .filter(|o| o.result.is_err())
                        .map(|o| o.column)
                        .collect(),
                })
            }
        }
        "webcam" => done(modes::set_webcam(ec, Switch::parse(value)?)),
        "fn_key" => done(modes::set_fn_key(ec, KeySide::parse(value)?)),
        "win_key" => done(modes::set_win_key(ec, KeySide::parse(value)?)),
        "battery_charge_mode" => {
            done(modes::set_battery_charge_mode(ec, BatteryChargeMode::parse(value)?))
        }
        "cooler_boost" => done(modes::set_cooler_boost(ec, Switch::parse(value)?)),
        "shift_mode" => done(modes::set_shift_mode(ec, ShiftMode::parse(value)?)),
        "fan_mode" => done(modes::set_fan_mode(ec, FanMode::parse(value)?)),
        "super_battery" => done(modes::set_super_battery(ec, Switch::parse(value)?)),
        "kbd_backlight" => done(modes::set_kbd_backlight(ec, KbdBacklight::parse(value)?)),
        "micmute_led" => done(modes::set_micmute_led(ec, Switch::parse(value)?)),
        "mute_led" => done(modes::set_mute_led(ec, Switch::parse(value)?)),
        "ac_connected" => Err(EcError::ReadOnlyAttribute("ac_connected")),
        "lid_open" => Err(EcError::ReadOnlyAttribute("lid_open")),
        "fw_version" => Err(EcError::ReadOnlyAttribute("fw_version")),
        "fw_release_date" => Err(EcError::ReadOnlyAttribute("fw_release_date")),
        "cpu_temperature" => Err(EcError::ReadOnlyAttribute("cpu_temperature")),
        "cpu_fan_speed" => Err(EcError::ReadOnlyAttribute("cpu_fan_speed")),
        "gpu_temperature" => Err(EcError::ReadOnlyAttribute("gpu_temperature")),
        "gpu_fan_speed" => Err(EcError::ReadOnlyAttribute("gpu_fan_speed")),
        other => Err(EcError::UnknownAttribute(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::*;
    use crate::test_utils::test_utils::{create_fake_ec_with_preset, FakeEc};

    #[test]
    fn test_get_set_roundtrip_by_name() {
        let fake = FakeEc::new();
        let ec = fake.device();

        assert_eq!(set(&ec, "webcam", "on").unwrap(), SetStatus::Applied);
        assert_eq!(get(&ec, "webcam").unwrap(), "on");

        set(&ec, "shift_mode", "eco").unwrap();
        assert_eq!(get(&ec, "shift_mode").unwrap(), "eco");
        assert_eq!(fake.reg(SHIFT_MODE_ADDRESS), SHIFT_MODE_ECO);

        set(&ec, "kbd_backlight", "full").unwrap();
        assert_eq!(get(&ec, "kbd_backlight").unwrap(), "full");

        set(&ec, "battery_charge_mode", "medium").unwrap();
        assert_eq!(get(&ec, "battery_charge_mode").unwrap(), "medium");
    }

    #[test]
    fn test_attribute_vocabulary_matches_exposure_names() {
        for name in [
            "battery_charge_mode",
            "super_battery",
            "cpu_temperature",
            "cpu_fan_speed",
            "gpu_temperature",
            "gpu_fan_speed",
        ] {
            assert!(ATTRIBUTES.contains(&name), "missing {}", name);
        }
        // Older working names must stay gone.
        for name in ["battery_mode", "cpu_realtime_temperature", "cpu_realtime_fan_speed"] {
            assert!(!ATTRIBUTES.contains(&name), "stale name {}", name);
        }
    }

    #[test]
    fn test_status_bits_render_as_digits() {
        let fake = FakeEc::new();
        fake.set_reg(POWER_STATUS_ADDRESS, 0b01);
        let ec = fake.device();
        assert_eq!(get(&ec, "ac_connected").unwrap(), "1");
        assert_eq!(get(&ec, "lid_open").unwrap(), "0");

        fake.set_reg(POWER_STATUS_ADDRESS, 0b10);
        assert_eq!(get(&ec, "ac_connected").unwrap(), "0");
        assert_eq!(get(&ec, "lid_open").unwrap(), "1");
    }

    #[test]
    fn test_preset_attribute() {
        let fake = FakeEc::new();
        let ec = fake.device();

        assert_eq!(set(&ec, "preset", "silent").unwrap(), SetStatus::Applied);
        assert_eq!(get(&ec, "preset").unwrap(), "silent");

        fake.set_reg(SHIFT_MODE_ADDRESS, 0x11);
        assert_eq!(get(&ec, "preset").unwrap(), "custom");
    }

    #[test]
    fn test_preset_attribute_reports_partial_application() {
        let fake = FakeEc::new();
        fake.fail_write(SUPER_BATTERY_ADDRESS);
        let ec = fake.device();

        // Best-effort: the set succeeds, names the failed column and the
        // writable columns landed.
        assert_eq!(
            set(&ec, "preset", "balanced").unwrap(),
            SetStatus::Partial {
                failed_columns: vec!["super_battery"]
            }
        );
        assert_eq!(fake.reg(SHIFT_MODE_ADDRESS), SHIFT_MODE_BALANCED);

        assert!(matches!(
            set(&ec, "preset", "turbo"),
            Err(EcError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_unknown_attribute() {
        let ec = FakeEc::new().device();
        assert!(matches!(
            get(&ec, "warp_drive"),
            Err(EcError::UnknownAttribute(_))
        ));
        assert!(matches!(
            set(&ec, "warp_drive", "on"),
            Err(EcError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn test_read_only_attributes_reject_set() {
        let fake = FakeEc::new();
        let ec = fake.device();
        for name in ["fw_version", "cpu_temperature", "ac_connected"] {
            assert!(matches!(
                set(&ec, name, "1"),
                Err(EcError::ReadOnlyAttribute(_))
            ));
        }
        assert!(fake.write_log().is_empty());
    }

    #[test]
    fn test_every_attribute_is_gettable() {
        let fake = create_fake_ec_with_preset(crate::preset::Preset::Balanced);
        fake.set_reg(CPU_FAN_SPEED_ADDRESS, CPU_FAN_SPEED_MIN);
        for (i, b) in b"16S6EMS1.107".iter().enumerate() {
            fake.set_reg(FW_VERSION_ADDRESS + i as u8, *b);
        }
        for (i, b) in b"09152023".iter().enumerate() {
            fake.set_reg(FW_DATE_ADDRESS + i as u8, *b);
        }
        for (i, b) in b"14:30:05".iter().enumerate() {
            fake.set_reg(FW_TIME_ADDRESS + i as u8, *b);
        }
        let ec = fake.device();
        for name in ATTRIBUTES {
            assert!(get(&ec, name).is_ok(), "attribute {}", name);
        }
    }
}
