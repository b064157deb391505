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

//! Shared EC handle and the bit/byte codec.
//!
//! All register traffic funnels through one [`EcDevice`], which owns the
//! transport behind a single mutex. A read-modify-write of a bit is two
//! transport calls and is only safe because the lock is held across both;
//! the same applies to multi-register preset application.

use std::io;
use std::sync::Mutex;

use thiserror::Error;

use crate::transport::EcTransport;

#[derive(Error, Debug)]
pub enum EcError {
    #[error("EC I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("raw value {value} outside calibrated range [{min}, {max}]")]
    OutOfRange { value: u8, min: u8, max: u8 },
    #[error("malformed firmware data: {0}")]
    MalformedFirmwareData(String),
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
    #[error("attribute {0} is read-only")]
    ReadOnlyAttribute(&'static str),
}

pub fn is_bit_set(index: u8, byte: u8) -> bool {
    (byte >> index) & 1 != 0
}

/// Read a bit through the transport; one transport call.
pub(crate) fn transport_read_bit(
    t: &mut dyn EcTransport,
    addr: u8,
    index: u8,
) -> io::Result<bool> {
    Ok(is_bit_set(index, t.read_byte(addr)?))
}

/// Read-modify-write a single bit, leaving the other bits of the byte
/// untouched. If the read half fails the write is never issued.
pub(crate) fn transport_write_bit(
    t: &mut dyn EcTransport,
    addr: u8,
    index: u8,
    set: bool,
) -> io::Result<()> {
    let current = t.read_byte(addr)?;
    let next = if set {
        current | (1 << index)
    } else {
        current & !(1 << index)
    };
    t.write_byte(addr, next)
}

/// The one handle to the EC register space. Every caller in the process
/// shares it; the mutex is the single mutual-exclusion domain for all
/// register writes.
pub struct EcDevice {
    inner: Mutex<Box<dyn EcTransport>>,
}

impl EcDevice {
    pub fn new(transport: Box<dyn EcTransport>) -> Self {
        Self {
            inner: Mutex::new(transport),
        }
    }

    /// Run `f` with exclusive access to the transport. Multi-call
    /// sequences that must not interleave (bit RMW, preset vectors)
    /// go through here.
    pub(crate) fn with_transport<R>(&self, f: impl FnOnce(&mut dyn EcTransport) -> R) -> R {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(guard.as_mut())
    }

    pub fn read_byte(&self, addr: u8) -> Result<u8, EcError> {
        Ok(self.with_transport(|t| t.read_byte(addr))?)
    }

    pub fn write_byte(&self, addr: u8, value: u8) -> Result<(), EcError> {
        Ok(self.with_transport(|t| t.write_byte(addr, value))?)
    }

    pub fn read_bit(&self, addr: u8, index: u8) -> Result<bool, EcError> {
        Ok(self.with_transport(|t| transport_read_bit(t, addr, index))?)
    }

    pub fn write_bit(&self, addr: u8, index: u8, set: bool) -> Result<(), EcError> {
        Ok(self.with_transport(|t| transport_write_bit(t, addr, index, set))?)
    }

    /// Read `len` consecutive bytes starting at `addr`, one transport call
    /// per byte. The first unreadable byte fails the whole read; a partial
    /// sequence is never returned.
    pub fn read_seq(&self, addr: u8, len: usize) -> Result<Vec<u8>, EcError> {
        let bytes = self.with_transport(|t| {
            let mut out = Vec::with_capacity(len);
            for i in 0..len {
                out.push(t.read_byte(addr.wrapping_add(i as u8))?);
            }
            Ok::<_, io::Error>(out)
        })?;
        Ok(bytes)
    }
}
