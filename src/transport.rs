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

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Default register file exported by the ec_sys kernel module
/// (load with `modprobe ec_sys write_support=1`).
pub const EC_SYS_IO_PATH: &str = "/sys/kernel/debug/ec/ec0/io";

// ACPI embedded controller port protocol.
const EC_DATA_PORT: u64 = 0x62;
const EC_CMD_PORT: u64 = 0x66;
const EC_CMD_READ: u8 = 0x80;
const EC_CMD_WRITE: u8 = 0x81;
const EC_STATUS_OBF: u8 = 1 << 0;
const EC_STATUS_IBF: u8 = 1 << 1;
const EC_HANDSHAKE_TIMEOUT: Duration = Duration::from_millis(100);

/// Single-byte register access to the embedded controller.
///
/// This is the only way the rest of the crate touches hardware. Each call
/// is a short synchronous transaction; failures are surfaced verbatim and
/// never retried here.
#[cfg_attr(test, mockall::automock)]
pub trait EcTransport: Send {
    fn read_byte(&mut self, addr: u8) -> io::Result<u8>;
    fn write_byte(&mut self, addr: u8, value: u8) -> io::Result<()>;
}

/// Transport over the ec_sys debugfs register file, where the EC address
/// space appears as a 256-byte seekable file.
#[derive(Debug)]
pub struct EcSysTransport {
    file: File,
}

impl EcSysTransport {
    pub fn open() -> io::Result<Self> {
        Self::open_path(EC_SYS_IO_PATH)
    }

    pub fn open_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self { file })
    }
}

impl EcTransport for EcSysTransport {
    fn read_byte(&mut self, addr: u8) -> io::Result<u8> {
        self.file.seek(SeekFrom::Start(addr as u64))?;
        let mut buf = [0u8; 1];
        self.file.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, addr: u8, value: u8) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(addr as u64))?;
        self.file.write_all(&[value])
    }
}

/// Transport speaking the raw ACPI EC handshake on ports 0x62/0x66
/// through /dev/port. Works without ec_sys but needs CAP_SYS_RAWIO.
pub struct PortTransport {
    port: File,
}

impl PortTransport {
    pub fn open() -> io::Result<Self> {
        let port = OpenOptions::new().read(true).write(true).open("/dev/port")?;
        Ok(Self { port })
    }

    fn inb(&mut self, port: u64) -> io::Result<u8> {
        self.port.seek(SeekFrom::Start(port))?;
        let mut buf = [0u8; 1];
        self.port.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn outb(&mut self, port: u64, value: u8) -> io::Result<()> {
        self.port.seek(SeekFrom::Start(port))?;
        self.port.write_all(&[value])
    }

    fn wait_input_clear(&mut self) -> io::Result<()> {
        let deadline = Instant::now() + EC_HANDSHAKE_TIMEOUT;
        loop {
            if self.inb(EC_CMD_PORT)? & EC_STATUS_IBF == 0 {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "EC input buffer stayed full",
                ));
            }
        }
    }

    fn wait_output_full(&mut self) -> io::Result<()> {
        let deadline = Instant::now() + EC_HANDSHAKE_TIMEOUT;
        loop {
            if self.inb(EC_CMD_PORT)? & EC_STATUS_OBF != 0 {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "EC output buffer stayed empty",
                ));
            }
        }
    }
}

impl EcTransport for PortTransport {
    fn read_byte(&mut self, addr: u8) -> io::Result<u8> {
        self.wait_input_clear()?;
        self.outb(EC_CMD_PORT, EC_CMD_READ)?;
        self.wait_input_clear()?;
        self.outb(EC_DATA_PORT, addr)?;
        self.wait_output_full()?;
        self.inb(EC_DATA_PORT)
    }

    fn write_byte(&mut self, addr: u8, value: u8) -> io::Result<()> {
        self.wait_input_clear()?;
        self.outb(EC_CMD_PORT, EC_CMD_WRITE)?;
        self.wait_input_clear()?;
        self.outb(EC_DATA_PORT, addr)?;
        self.wait_input_clear()?;
        self.outb(EC_DATA_PORT, value)?;
        self.wait_input_clear()
    }
}
