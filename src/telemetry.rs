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

//! Realtime thermal readings.
//!
//! Temperatures come back as plain degrees Celsius. The CPU fan register
//! reports a calibrated raw value that is rescaled to a percentage; the
//! GPU fan register has no published calibration, so its reading is
//! passed through raw.

use crate::ec::{EcDevice, EcError};
use crate::registers::*;

pub fn cpu_temperature(ec: &EcDevice) -> Result<u8, EcError> {
    ec.read_byte(CPU_TEMPERATURE_ADDRESS)
}

/// CPU fan speed as a percentage. The register's calibrated span is
/// [`CPU_FAN_SPEED_MIN`]..=[`CPU_FAN_SPEED_MAX`]; readings outside it
/// mean the calibration does not apply and are refused rather than
/// clamped.
pub fn cpu_fan_speed_percent(ec: &EcDevice) -> Result<u8, EcError> {
    let raw = ec.read_byte(CPU_FAN_SPEED_ADDRESS)?;
    if raw < CPU_FAN_SPEED_MIN || raw > CPU_FAN_SPEED_MAX {
        return Err(EcError::OutOfRange {
            value: raw,
            min: CPU_FAN_SPEED_MIN,
            max: CPU_FAN_SPEED_MAX,
        });
    }
    let span = (CPU_FAN_SPEED_MAX - CPU_FAN_SPEED_MIN) as u16;
    let offset = (raw - CPU_FAN_SPEED_MIN) as u16;
    Ok((offset * 100 / span) as u8)
}

pub fn gpu_temperature(ec: &EcDevice) -> Result<u8, EcError> {
    ec.read_byte(GPU_TEMPERATURE_ADDRESS)
}

/// Raw GPU fan register value, uncalibrated.
pub fn gpu_fan_speed_raw(ec: &EcDevice) -> Result<u8, EcError> {
    ec.read_byte(GPU_FAN_SPEED_ADDRESS)
}
