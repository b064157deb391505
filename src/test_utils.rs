/*
 * Test utilities and mock helpers for msiec
 *
 * This module provides common test utilities, mock objects, and helper functions
 * that can be used across different test modules.
 */

#[cfg(test)]
pub mod test_utils {
    use std::collections::HashSet;
    use std::io;
    use std::sync::{Arc, Mutex};

    use crate::ec::EcDevice;
    use crate::preset::Preset;
    use crate::registers::*;
    use crate::transport::EcTransport;

    struct FakeEcState {
        regs: [u8; 256],
        fail_reads: HashSet<u8>,
        fail_writes: HashSet<u8>,
        write_log: Vec<(u8, u8)>,
    }

    /// In-memory EC with scriptable per-register failures. Clones share
    /// state, so a test can keep one handle for inspection while the
    /// device under test owns another.
    #[derive(Clone)]
    pub struct FakeEc {
        state: Arc<Mutex<FakeEcState>>,
    }

    impl FakeEc {
        pub fn new() -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeEcState {
                    regs: [0u8; 256],
                    fail_reads: HashSet::new(),
                    fail_writes: HashSet::new(),
                    write_log: Vec::new(),
                })),
            }
        }

        pub fn set_reg(&self, addr: u8, value: u8) {
            self.state.lock().unwrap().regs[addr as usize] = value;
        }

        pub fn reg(&self, addr: u8) -> u8 {
            self.state.lock().unwrap().regs[addr as usize]
        }

        pub fn fail_read(&self, addr: u8) {
            self.state.lock().unwrap().fail_reads.insert(addr);
        }

        pub fn fail_write(&self, addr: u8) {
            self.state.lock().unwrap().fail_writes.insert(addr);
        }

        pub fn write_log(&self) -> Vec<(u8, u8)> {
            self.state.lock().unwrap().write_log.clone()
        }

        /// Build an [`EcDevice`] over a shared-state clone of this fake.
        pub fn device(&self) -> EcDevice {
            EcDevice::new(Box::new(self.clone()))
        }
    }

    impl EcTransport for FakeEc {
        fn read_byte(&mut self, addr: u8) -> io::Result<u8> {
            let state = self.state.lock().unwrap();
            if state.fail_reads.contains(&addr) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("injected read failure at {:#04x}", addr),
                ));
            }
            Ok(state.regs[addr as usize])
        }

        fn write_byte(&mut self, addr: u8, value: u8) -> io::Result<()> {
            let mut state = self.state.lock().unwrap();
            if state.fail_writes.contains(&addr) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("injected write failure at {:#04x}", addr),
                ));
            }
            state.regs[addr as usize] = value;
            state.write_log.push((addr, value));
            Ok(())
        }
    }

    /// Creates a fake EC whose registers hold exactly the vector of the
    /// given preset, with the kbd backlight at half brightness.
    pub fn create_fake_ec_with_preset(preset: Preset) -> FakeEc {
        let fake = FakeEc::new();
        match preset {
            Preset::SuperBattery => {
                fake.set_reg(SHIFT_MODE_ADDRESS, SHIFT_MODE_ECO);
                fake.set_reg(SUPER_BATTERY_ADDRESS, SUPER_BATTERY_ON);
                fake.set_reg(FAN_MODE_ADDRESS, 1 << FAN_MODE_SILENT_BIT);
            }
            Preset::Silent => {
                fake.set_reg(SHIFT_MODE_ADDRESS, SHIFT_MODE_BALANCED);
                fake.set_reg(SUPER_BATTERY_ADDRESS, SUPER_BATTERY_OFF);
                fake.set_reg(FAN_MODE_ADDRESS, 1 << FAN_MODE_SILENT_BIT);
            }
            Preset::Balanced => {
                fake.set_reg(SHIFT_MODE_ADDRESS, SHIFT_MODE_BALANCED);
                fake.set_reg(SUPER_BATTERY_ADDRESS, SUPER_BATTERY_OFF);
                fake.set_reg(FAN_MODE_ADDRESS, 0x00);
            }
            Preset::HighPerformance => {
                fake.set_reg(SHIFT_MODE_ADDRESS, SHIFT_MODE_OVERCLOCK);
                fake.set_reg(SUPER_BATTERY_ADDRESS, SUPER_BATTERY_OFF);
                fake.set_reg(FAN_MODE_ADDRESS, 0x00);
            }
        }
        fake.set_reg(KBD_BACKLIGHT_ADDRESS, KBD_BACKLIGHT_STATES[2]);
        fake
    }

    /// Creates a fake EC carrying a plausible firmware identity block.
    pub fn create_fake_ec_with_firmware(version: &[u8], date: &[u8], time: &[u8]) -> FakeEc {
        let fake = FakeEc::new();
        for (i, b) in version.iter().enumerate() {
            fake.set_reg(FW_VERSION_ADDRESS.wrapping_add(i as u8), *b);
        }
        for (i, b) in date.iter().enumerate() {
            fake.set_reg(FW_DATE_ADDRESS.wrapping_add(i as u8), *b);
        }
        for (i, b) in time.iter().enumerate() {
            fake.set_reg(FW_TIME_ADDRESS.wrapping_add(i as u8), *b);
        }
        fake
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_fake_ec_read_write() {
            let fake = FakeEc::new();
            fake.set_reg(0x10, 0xab);
            let ec = fake.device();
            assert_eq!(ec.read_byte(0x10).unwrap(), 0xab);
            ec.write_byte(0x11, 0x7f).unwrap();
            assert_eq!(fake.reg(0x11), 0x7f);
            assert_eq!(fake.write_log(), vec![(0x11, 0x7f)]);
        }

        #[test]
        fn test_fake_ec_injected_failures() {
            let fake = FakeEc::new();
            fake.fail_read(0x20);
            fake.fail_write(0x21);
            let ec = fake.device();
            assert!(ec.read_byte(0x20).is_err());
            assert!(ec.write_byte(0x21, 0x01).is_err());
            assert!(ec.read_byte(0x21).is_ok());
        }
    }
}
