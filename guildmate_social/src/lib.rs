// guildmate_social — engine-agnostic friends/profile relay core.
//
// This crate holds everything the Guildmate plugin does that is not Godot:
// the provider abstraction over a platform's social SDK, the async relay
// that turns provider calls into one-shot completions, the process-local
// friends cache, and a deterministic sandbox backend for development. It has
// zero Godot dependencies and its tests run headless on a plain tokio
// runtime.
//
// Module overview:
// - `player.rs`:  PlayerId newtype, provider-side RemotePlayer, host-facing
//                 Player record (identity plus optional avatar bytes).
// - `service.rs`: SocialService trait — the seam a platform SDK binding
//                 implements — plus AuthorizationStatus and ServiceError.
// - `error.rs`:   FriendsError, the fixed per-operation failure codes
//                 delivered to completion sinks.
// - `store.rs`:   FriendsStore, the shared last-write-wins friends cache.
// - `relay.rs`:   FriendsRelay — spawns one task per operation, awaits the
//                 provider, and invokes the caller's sink exactly once.
// - `sandbox.rs`: SandboxService — local roster-backed provider with
//                 failure/latency knobs and identicon avatars.
//
// The companion crate `guildmate_gdext` wraps this library for Godot via
// GDExtension: it owns the runtime, keeps Callables on the main thread, and
// maps results to `(error_code, payload)` pairs. Provider bindings for real
// platform SDKs plug in behind `SocialService` without touching this crate.

pub mod error;
pub mod player;
pub mod relay;
pub mod sandbox;
pub mod service;
pub mod store;

pub use error::{FriendsError, STATUS_OK};
pub use player::{Player, PlayerId, RemotePlayer};
pub use relay::{AvatarPolicy, Completion, FriendsRelay, LoadOptions};
pub use sandbox::{SandboxRoster, SandboxService};
pub use service::{AuthorizationStatus, ServiceError, SocialService};
pub use store::FriendsStore;
