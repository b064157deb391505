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

//! Table-driven performance presets.
//!
//! A preset is a row over a fixed set of register columns. Classification
//! compares live register state against each row; any state matching no
//! row is "custom", which is a normal answer and never an error.
//! Application replays a row column by column, pressing on past
//! individual column failures and reporting every outcome.

use std::fmt;
use std::io;

use crate::ec::{is_bit_set, transport_write_bit, EcDevice, EcError};
use crate::logger::log_column_failure;
use crate::registers::*;
use crate::transport::EcTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    SuperBattery,
    Silent,
    Balanced,
    HighPerformance,
}

impl Preset {
    /// Classification checks rows in this order and the first full match
    /// wins.
    pub const ALL: [Preset; 4] = [
        Preset::SuperBattery,
        Preset::Silent,
        Preset::Balanced,
        Preset::HighPerformance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::SuperBattery => "super_battery",
            Preset::Silent => "silent",
            Preset::Balanced => "balanced",
            Preset::HighPerformance => "high_performance",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EcError> {
        match s {
            "super_battery" => Ok(Preset::SuperBattery),
            "silent" => Ok(Preset::Silent),
            "balanced" => Ok(Preset::Balanced),
            "high_performance" => Ok(Preset::HighPerformance),
            other => Err(EcError::InvalidRequest(format!(
                "expected super_battery/silent/balanced/high_performance, got {:?}",
                other
            ))),
        }
    }

    fn row(self) -> &'static [u8; 4] {
        match self {
            Preset::SuperBattery => &[SHIFT_MODE_ECO, SUPER_BATTERY_ON, 1, 0x80],
            Preset::Silent => &[SHIFT_MODE_BALANCED, SUPER_BATTERY_OFF, 1, 0x81],
            Preset::Balanced => &[SHIFT_MODE_BALANCED, SUPER_BATTERY_OFF, 0, 0x81],
            Preset::HighPerformance => &[SHIFT_MODE_OVERCLOCK, SUPER_BATTERY_OFF, 0, 0x82],
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a column's target byte relates to the register it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    /// The register must equal the target byte exactly.
    ExactByte,
    /// Only the named bit is compared; target 0 means clear, anything
    /// else means set. The other bits of the register are left alone.
    DerivedBit(u8),
    /// The column is carried in the table for completeness but is never
    /// compared nor written; the register keeps whatever it holds.
    Ignored,
}

pub struct PresetColumn {
    pub name: &'static str,
    pub address: u8,
    pub rule: ColumnRule,
}

/// Column order is also write order during application.
pub const PRESET_COLUMNS: [PresetColumn; 4] = [
    PresetColumn {
        name: "shift_mode",
        address: SHIFT_MODE_ADDRESS,
        rule: ColumnRule::ExactByte,
    },
    PresetColumn {
        name: "super_battery",
        address: SUPER_BATTERY_ADDRESS,
        rule: ColumnRule::ExactByte,
    },
    PresetColumn {
        name: "fan_silent",
        address: FAN_MODE_ADDRESS,
        rule: ColumnRule::DerivedBit(FAN_MODE_SILENT_BIT),
    },
    PresetColumn {
        name: "kbd_backlight",
        address: KBD_BACKLIGHT_ADDRESS,
        rule: ColumnRule::Ignored,
    },
];

/// Result of writing one column (or one consistency fixup) during
/// [`apply`].
pub struct ColumnOutcome {
    pub column: &'static str,
    pub address: u8,
    pub result: Result<(), io::Error>,
}

pub struct PresetApplyReport {
    pub preset: Preset,
    pub outcomes: Vec<ColumnOutcome>,
}

impl PresetApplyReport {
    pub fn fully_applied(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

fn column_matches(
    t: &mut dyn EcTransport,
    column: &PresetColumn,
    target: u8,
) -> io::Result<bool> {
    let raw = t.read_byte(column.address)?;
    Ok(match column.rule {
        ColumnRule::ExactByte => raw == target,
        ColumnRule::DerivedBit(bit) => is_bit_set(bit, raw) == (target != 0),
        ColumnRule::Ignored => true,
    })
}

/// Match the live registers against every preset row. `None` means the
/// state is custom. A read failure rules out only the preset being
/// checked; the remaining rows are still tried, so this never errors.
pub fn classify(ec: &EcDevice) -> Option<Preset> {
    ec.with_transport(|t| {
        'rows: for preset in Preset::ALL {
            let row = preset.row();
            for (column, target) in PRESET_COLUMNS.iter().zip(row) {
                if column.rule == ColumnRule::Ignored {
                    continue;
                }
                match column_matches(t, column, *target) {
                    Ok(true) => {}
                    Ok(false) => continue 'rows,
                    Err(e) => {
                        log_column_failure(
                            "preset_classify_read_failed",
                            preset.as_str(),
                            column.name,
                            column.address,
                            &e.to_string(),
                        );
                        continue 'rows;
                    }
                }
            }
            return Some(preset);
        }
        None
    })
}

/// Write a preset's row to the EC, column by column in table order, then
/// force the basic/advanced fan flags clear so the silent bit is the
/// only fan-mode flag the preset leaves asserted (high_performance keeps
/// its own fan configuration and skips the fixup).
///
/// A failed column is logged and recorded but does not stop the later
/// columns; the whole sequence runs under one lock acquisition.
pub fn apply(ec: &EcDevice, preset: Preset) -> PresetApplyReport {
    let row = preset.row();
    let outcomes = ec.with_transport(|t| {
        let mut outcomes = Vec::new();
        for (column, target) in PRESET_COLUMNS.iter().zip(row) {
            let result = match column.rule {
                ColumnRule::ExactByte => t.write_byte(column.address, *target),
                ColumnRule::DerivedBit(bit) => {
                    transport_write_bit(t, column.address, bit, *target != 0)
                }
                ColumnRule::Ignored => continue,
            };
            if let Err(e) = &result {
                log_column_failure(
                    "preset_column_failed",
                    preset.as_str(),
                    column.name,
                    column.address,
                    &e.to_string(),
                );
            }
            outcomes.push(ColumnOutcome {
                column: column.name,
                address: column.address,
                result,
            });
        }

        if preset != Preset::HighPerformance {
            for (name, bit) in [
                ("fan_basic", FAN_MODE_BASIC_BIT),
                ("fan_advanced", FAN_MODE_ADVANCED_BIT),
            ] {
                let result = transport_write_bit(t, FAN_MODE_ADDRESS, bit, false);
                if let Err(e) = &result {
                    log_column_failure(
                        "preset_column_failed",
                        preset.as_str(),
                        name,
                        FAN_MODE_ADDRESS,
                        &e.to_string(),
                    );
                }
                outcomes.push(ColumnOutcome {
                    column: name,
                    address: FAN_MODE_ADDRESS,
                    result,
                });
            }
        }
        outcomes
    });

    PresetApplyReport { preset, outcomes }
}

/// Convenience for display paths: the preset name, or "custom".
pub fn classify_name(ec: &EcDevice) -> &'static str {
    match classify(ec) {
        Some(preset) => preset.as_str(),
        None => "custom",
    }
}
