// guildmate_gdext — GDExtension bridge between the friends relay and Godot.
//
// This crate is a thin wrapper that exposes `guildmate_social` to Godot 4
// via gdext (godot-rust). It contains no provider logic — only translation
// between Godot types and relay types, plus the main-thread bookkeeping
// that keeps Callables out of worker tasks.
//
// Godot calls into this crate to:
// - Bind a provider (the built-in sandbox, or a vendor SDK binding on the
//   Rust side) and start a relay session.
// - Load friends, recent co-players, avatars, and the authorization status,
//   each delivered to a Callable as `(error_code, payload)`.
// - Open the platform's friends overlay and friend-request UI.
//
// Module overview:
// - `social_bridge.rs`: The `SocialBridge` Godot node — sole interface
//                       between GDScript and Rust. Owns the tokio runtime
//                       and the ticket ledger for pending Callables.
// - `godot_log.rs`:     Routes the core crate's `log` output to Godot's
//                       console macros.
//
// See also: `guildmate_social` for the relay, store, provider trait, and
// sandbox backend.

mod godot_log;
mod social_bridge;

use godot::prelude::*;

struct GuildmateExtension;

#[gdextension]
unsafe impl ExtensionLibrary for GuildmateExtension {
    fn on_level_init(level: InitLevel) {
        if level == InitLevel::Scene {
            godot_log::install();
        }
    }
}
