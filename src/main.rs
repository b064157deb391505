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

use std::io::ErrorKind;

use anyhow::{anyhow, bail, Context};

use msiec::config::{load_saved_config, validate_saved_config, SavedConfig, TransportKind};
use msiec::ec::EcDevice;
use msiec::transport::{EcSysTransport, PortTransport};
use msiec::{attrs, logger, system};

const USAGE: &str = "usage: msiec [--logging] [--transport ec_sys|port] [--io-path PATH] COMMAND

commands:
  get ATTR           read one attribute
  set ATTR VALUE     write one attribute
  status             show an overview of the EC state
  attrs              list attribute names";

fn open_device(cfg: &SavedConfig) -> anyhow::Result<EcDevice> {
    let transport: Box<dyn msiec::transport::EcTransport> = match cfg.transport {
        TransportKind::EcSys => match EcSysTransport::open_path(&cfg.ec_io_path) {
            Ok(t) => Box::new(t),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // The register file appears once ec_sys is loaded.
                system::load_ec_module();
                Box::new(EcSysTransport::open_path(&cfg.ec_io_path).with_context(|| {
                    format!(
                        "cannot open {} (is the ec_sys module available?)",
                        cfg.ec_io_path
                    )
                })?)
            }
            Err(e) => {
                return Err(anyhow!(e).context(format!("cannot open {}", cfg.ec_io_path)));
            }
        },
        TransportKind::Port => {
            Box::new(PortTransport::open().context("cannot open /dev/port")?)
        }
    };
    Ok(EcDevice::new(transport))
}

fn print_status(ec: &EcDevice) {
    if let Some(vendor) = system::read_board_vendor() {
        let name = system::read_board_name().unwrap_or_default();
        println!("board:            {} {}", vendor, name);
    }
    for name in [
        "fw_version",
        "fw_release_date",
        "preset",
        "shift_mode",
        "fan_mode",
        "super_battery",
        "battery_charge_mode",
        "kbd_backlight",
        "webcam",
        "fn_key",
        "ac_connected",
        "lid_open",
        "cpu_temperature",
        "cpu_fan_speed",
        "gpu_temperature",
        "gpu_fan_speed",
    ] {
        match attrs::get(ec, name) {
            Ok(value) => println!("{:<17} {}", format!("{}:", name), value),
            Err(e) => println!("{:<17} unavailable ({})", format!("{}:", name), e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // EC register access needs root whichever transport is used.
    if unsafe { libc::geteuid() } != 0 {
        eprintln!("Error: msiec requires root privileges to access the embedded controller.");
        eprintln!(
            "Please run with: sudo {}",
            std::env::args()
                .next()
                .unwrap_or_else(|| "msiec".to_string())
        );
        std::process::exit(1);
    }

    let args: Vec<String> = std::env::args().collect();

    let mut cfg = load_saved_config().unwrap_or_default();

    // Flags override the config file.
    let mut positional: Vec<&str> = Vec::new();
    let mut iter = args.iter().skip(1).map(|s| s.as_str());
    while let Some(arg) = iter.next() {
        match arg {
            "--logging" => cfg.logging = true,
            "--transport" => {
                cfg.transport = match iter.next() {
                    Some("ec_sys") => TransportKind::EcSys,
                    Some("port") => TransportKind::Port,
                    other => bail!("--transport expects ec_sys or port, got {:?}", other),
                };
            }
            "--io-path" => {
                cfg.ec_io_path = iter
                    .next()
                    .ok_or_else(|| anyhow!("--io-path expects a path"))?
                    .to_string();
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            flag if flag.starts_with("--") => bail!("unknown flag {}\n{}", flag, USAGE),
            positional_arg => positional.push(positional_arg),
        }
    }

    validate_saved_config(&cfg).map_err(|e| anyhow!("invalid configuration: {}", e))?;

    if cfg.logging {
        logger::init_logging();
        logger::log_event(
            "startup",
            serde_json::json!({
                "mode": "cli",
                "args": args,
            }),
        );
    }

    if !system::is_msi_board() {
        eprintln!("Warning: this does not look like an MSI board; register semantics may not apply.");
    }

    match positional.as_slice() {
        ["attrs"] => {
            for name in attrs::ATTRIBUTES {
                println!("{}", name);
            }
            Ok(())
        }
        ["get", name] => {
            let ec = open_device(&cfg)?;
            println!("{}", attrs::get(&ec, name)?);
            Ok(())
        }
        ["set", name, value] => {
            if cfg.read_only {
                bail!("configuration is read_only; refusing to write {}", name);
            }
            let ec = open_device(&cfg)?;
            match attrs::set(&ec, name, value)? {
                attrs::SetStatus::Applied => {}
                attrs::SetStatus::Partial { failed_columns } => {
                    eprintln!(
                        "Warning: {} applied partially; failed columns: {}",
                        name,
                        failed_columns.join(", ")
                    );
                }
            }
            if cfg.logging {
                logger::log_event(
                    "attribute_set",
                    serde_json::json!({ "attr": name, "value": value }),
                );
            }
            Ok(())
        }
        ["status"] | [] => {
            let ec = open_device(&cfg)?;
            print_status(&ec);
            Ok(())
        }
        _ => bail!("{}", USAGE),
    }
}
