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

//! Firmware identity: version string and build timestamp.
//!
//! The EC stores the build date as "MMDDYYYY" and the build time as
//! "HH:MM:SS", each in its own register run. Both are parsed strictly;
//! bytes that do not fit the layout are a [`EcError::MalformedFirmwareData`],
//! which is a different failure than not being able to read the registers
//! at all.

use std::fmt;

use crate::ec::{EcDevice, EcError};
use crate::registers::*;

/// EC firmware build timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareReleaseDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl fmt::Display for FirmwareReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}/{:02}/{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

fn digits(bytes: &[u8], what: &str) -> Result<u16, EcError> {
    let mut value: u16 = 0;
    for b in bytes {
        if !b.is_ascii_digit() {
            return Err(EcError::MalformedFirmwareData(format!(
                "non-digit byte {:#04x} in {}",
                b, what
            )));
        }
        value = value * 10 + (b - b'0') as u16;
    }
    Ok(value)
}

/// Parse the raw "MMDDYYYY" date and "HH:MM:SS" time register runs.
pub fn parse_release_date(date: &[u8], time: &[u8]) -> Result<FirmwareReleaseDate, EcError> {
    if date.len() != FW_DATE_LENGTH {
        return Err(EcError::MalformedFirmwareData(format!(
            "date block is {} bytes, expected {}",
            date.len(),
            FW_DATE_LENGTH
        )));
    }
    if time.len() != FW_TIME_LENGTH {
        return Err(EcError::MalformedFirmwareData(format!(
            "time block is {} bytes, expected {}",
            time.len(),
            FW_TIME_LENGTH
        )));
    }
    if time[2] != b':' || time[5] != b':' {
        return Err(EcError::MalformedFirmwareData(
            "time block missing ':' separators".to_string(),
        ));
    }

    Ok(FirmwareReleaseDate {
        month: digits(&date[0..2], "month")? as u8,
        day: digits(&date[2..4], "day")? as u8,
        year: digits(&date[4..8], "year")?,
        hour: digits(&time[0..2], "hour")? as u8,
        minute: digits(&time[3..5], "minute")? as u8,
        second: digits(&time[6..8], "second")? as u8,
    })
}

/// EC firmware version string, NUL-trimmed.
pub fn version(ec: &EcDevice) -> Result<String, EcError> {
    let raw = ec.read_seq(FW_VERSION_ADDRESS, FW_VERSION_LENGTH)?;
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
    match std::str::from_utf8(&raw[..end]) {
        Ok(s) => Ok(s.to_string()),
        Err(_) => Err(EcError::MalformedFirmwareData(
            "version block is not valid ASCII".to_string(),
        )),
    }
}

pub fn release_date(ec: &EcDevice) -> Result<FirmwareReleaseDate, EcError> {
    let date = ec.read_seq(FW_DATE_ADDRESS, FW_DATE_LENGTH)?;
    let time = ec.read_seq(FW_TIME_ADDRESS, FW_TIME_LENGTH)?;
    parse_release_date(&date, &time)
}
