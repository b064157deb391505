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

//! JSON-line event log for EC traffic diagnostics.
//!
//! One line per event, appended to /etc/msiec/logs.json (or a /tmp
//! fallback when /etc is not writable): millisecond timestamp, event
//! name, structured payload. The preset engine records per-column
//! failures here so partial applications can be reconstructed after the
//! fact; the CLI adds startup and attribute-write records when invoked
//! with --logging. Logging is always best-effort and never fails the
//! operation being logged.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use serde_json::{json, Value};

const DEFAULT_LOG_PATH: &str = "/etc/msiec/logs.json";
const FALLBACK_LOG_PATH: &str = "/tmp/msiec_logs.json";

lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub fn init_logging() {
    // Ensure directory exists
    if let Some(parent) = Path::new(DEFAULT_LOG_PATH).parent() {
        let _ = fs::create_dir_all(parent);
    }
    // Open file append
    match OpenOptions::new().create(true).append(true).open(DEFAULT_LOG_PATH) {
        Ok(f) => {
            if let Ok(mut guard) = LOG_FILE.lock() {
                *guard = Some(f);
            }
        }
        Err(_e) => {
            // Fall back to /tmp if /etc is unavailable (silent)
            if let Ok(f) = OpenOptions::new().create(true).append(true).open(FALLBACK_LOG_PATH) {
                if let Ok(mut guard) = LOG_FILE.lock() {
                    *guard = Some(f);
                }
            }
        }
    }
}

pub fn log_event(event: &str, data: Value) {
    let line = json!({
        "ts_ms": now_millis(),
        "event": event,
        "data": data,
    })
    .to_string();

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(f) = guard.as_mut() {
            let _ = writeln!(f, "{}", line);
            return;
        }
    }
    // If logger not initialized, write to /tmp silently
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(FALLBACK_LOG_PATH) {
        let _ = writeln!(f, "{}", line);
    }
}

/// Payload for a register that could not be read or written while
/// classifying or applying a preset.
pub(crate) fn column_failure_payload(
    preset: &str,
    column: &str,
    address: u8,
    error: &str,
) -> Value {
    json!({
        "preset": preset,
        "column": column,
        "address": address,
        "error": error,
    })
}

/// Record a failed preset column under the given event name.
pub(crate) fn log_column_failure(
    event: &str,
    preset: &str,
    column: &str,
    address: u8,
    error: &str,
) {
    log_event(event, column_failure_payload(preset, column, address, error));
}
