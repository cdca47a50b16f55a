// Routes the `log` facade into Godot's console.
//
// The core crate logs through `log` and knows nothing about Godot. This
// logger forwards each record to the matching Godot macro, so relay
// warnings land in the editor output with the usual severity markers.
// Records can arrive from relay worker threads; Godot's print functions
// are safe to call off the main thread.

use godot::prelude::*;
use log::{Level, LevelFilter, Metadata, Record};

struct GodotLogger;

static LOGGER: GodotLogger = GodotLogger;

impl log::Log for GodotLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Error => godot_error!("{}", record.args()),
            Level::Warn => godot_warn!("{}", record.args()),
            _ => godot_print!("{}", record.args()),
        }
    }

    fn flush(&self) {}
}

/// Install the logger. Later calls are no-ops, so reload cycles that run
/// the extension entry point again stay quiet.
pub fn install() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}
