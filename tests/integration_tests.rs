/*
 * Integration tests for msiec
 *
 * These drive the public library surface end to end over an in-memory
 * EC image, the way the CLI uses it.
 */

use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};

use msiec::attrs;
use msiec::ec::{EcDevice, EcError};
use msiec::firmware;
use msiec::modes::{self, KeySide, Switch};
use msiec::preset::{self, Preset};
use msiec::registers::*;
use msiec::transport::EcTransport;

#[derive(Clone)]
struct MemoryEc {
    state: Arc<Mutex<([u8; 256], HashSet<u8>)>>,
}

impl MemoryEc {
    fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(([0u8; 256], HashSet::new()))),
        }
    }

    fn set_reg(&self, addr: u8, value: u8) {
        self.state.lock().unwrap().0[addr as usize] = value;
    }

    fn reg(&self, addr: u8) -> u8 {
        self.state.lock().unwrap().0[addr as usize]
    }

    fn fail_write(&self, addr: u8) {
        self.state.lock().unwrap().1.insert(addr);
    }

    fn set_seq(&self, addr: u8, bytes: &[u8]) {
        for (i, b) in bytes.iter().enumerate() {
            self.set_reg(addr.wrapping_add(i as u8), *b);
        }
    }

    fn device(&self) -> EcDevice {
        EcDevice::new(Box::new(self.clone()))
    }
}

impl EcTransport for MemoryEc {
    fn read_byte(&mut self, addr: u8) -> io::Result<u8> {
        Ok(self.state.lock().unwrap().0[addr as usize])
    }

    fn write_byte(&mut self, addr: u8, value: u8) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.1.contains(&addr) {
            return Err(io::Error::new(io::ErrorKind::Other, "write refused"));
        }
        state.0[addr as usize] = value;
        Ok(())
    }
}

#[test]
fn preset_apply_and_classify_through_public_api() {
    let mem = MemoryEc::new();
    let ec = mem.device();

    for p in Preset::ALL {
        let report = preset::apply(&ec, p);
        assert!(report.fully_applied());
        assert_eq!(preset::classify(&ec), Some(p));
        assert_eq!(attrs::get(&ec, "preset").unwrap(), p.as_str());
    }
}

#[test]
fn manual_tweak_after_preset_reads_as_custom() {
    let mem = MemoryEc::new();
    let ec = mem.device();

    attrs::set(&ec, "preset", "balanced").unwrap();
    assert_eq!(attrs::get(&ec, "preset").unwrap(), "balanced");

    // A hand-picked shift mode leaves preset territory.
    attrs::set(&ec, "shift_mode", "eco").unwrap();
    assert_eq!(attrs::get(&ec, "preset").unwrap(), "custom");
}

#[test]
fn preset_apply_leaves_keyboard_backlight_alone() {
    let mem = MemoryEc::new();
    mem.set_reg(KBD_BACKLIGHT_ADDRESS, KBD_BACKLIGHT_STATES[1]);
    let ec = mem.device();

    preset::apply(&ec, Preset::Silent);
    assert_eq!(mem.reg(KBD_BACKLIGHT_ADDRESS), KBD_BACKLIGHT_STATES[1]);
    assert_eq!(attrs::get(&ec, "kbd_backlight").unwrap(), "on");
}

#[test]
fn preset_apply_reports_but_survives_column_failure() {
    let mem = MemoryEc::new();
    mem.fail_write(SUPER_BATTERY_ADDRESS);
    let ec = mem.device();

    let report = preset::apply(&ec, Preset::SuperBattery);
    assert!(!report.fully_applied());
    let failed: Vec<&str> = report
        .outcomes
        .iter()
        .filter(|o| o.result.is_err())
        .map(|o| o.column)
        .collect();
    assert_eq!(failed, vec!["super_battery"]);
    // The shift mode column still landed.
    assert_eq!(mem.reg(SHIFT_MODE_ADDRESS), SHIFT_MODE_ECO);
}

#[test]
fn fn_and_win_keys_swap_together() {
    let mem = MemoryEc::new();
    let ec = mem.device();

    modes::set_fn_key(&ec, KeySide::Left).unwrap();
    assert_eq!(attrs::get(&ec, "fn_key").unwrap(), "left");
    assert_eq!(attrs::get(&ec, "win_key").unwrap(), "right");

    attrs::set(&ec, "win_key", "left").unwrap();
    assert_eq!(attrs::get(&ec, "fn_key").unwrap(), "right");
}

#[test]
fn firmware_identity_formats_as_timestamp() {
    let mem = MemoryEc::new();
    mem.set_seq(FW_VERSION_ADDRESS, b"16S6EMS1.107");
    mem.set_seq(FW_DATE_ADDRESS, b"09152023");
    mem.set_seq(FW_TIME_ADDRESS, b"14:30:05");
    let ec = mem.device();

    assert_eq!(firmware::version(&ec).unwrap(), "16S6EMS1.107");
    assert_eq!(
        attrs::get(&ec, "fw_release_date").unwrap(),
        "2023/09/15 14:30:05"
    );
}

#[test]
fn corrupt_firmware_date_is_malformed_not_io() {
    let mem = MemoryEc::new();
    mem.set_seq(FW_DATE_ADDRESS, b"09??2023");
    mem.set_seq(FW_TIME_ADDRESS, b"14:30:05");
    let ec = mem.device();

    assert!(matches!(
        firmware::release_date(&ec),
        Err(EcError::MalformedFirmwareData(_))
    ));
}

#[test]
fn cooler_boost_toggle_preserves_neighbor_bits() {
    let mem = MemoryEc::new();
    mem.set_reg(COOLER_BOOST_ADDRESS, 0b0011_0101);
    let ec = mem.device();

    modes::set_cooler_boost(&ec, Switch::On).unwrap();
    assert_eq!(mem.reg(COOLER_BOOST_ADDRESS), 0b1011_0101);

    modes::set_cooler_boost(&ec, Switch::Off).unwrap();
    assert_eq!(mem.reg(COOLER_BOOST_ADDRESS), 0b0011_0101);
}

#[test]
fn telemetry_attributes_reject_writes() {
    let mem = MemoryEc::new();
    let ec = mem.device();
    assert!(matches!(
        attrs::set(&ec, "cpu_fan_speed", "50"),
        Err(EcError::ReadOnlyAttribute(_))
    ));
}
