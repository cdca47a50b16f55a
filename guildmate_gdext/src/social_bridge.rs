// GDExtension bridge class for the friends relay.
//
// Exposes a `SocialBridge` node that Godot scenes use to reach the platform
// social provider. This is the sole interface between GDScript and the Rust
// relay — no provider logic lives here, only translation between Godot
// types and `guildmate_social` types, plus the ticket ledger that keeps
// Callables on the main thread.
//
// ## What it exposes
//
// - **Binding:** `init_sandbox()`, `init_sandbox_with_roster_json(json)`,
//   `is_bound()`. Each binding starts a fresh session: new friends cache,
//   new runtime. Vendor SDK bindings plug in from Rust via `bind_service`.
// - **Friends:** `load_friends(callback, include_avatars)` — the local
//   player's friends as an `Array` of `Dictionary` with keys `"id"`,
//   `"display_name"`, and (when an avatar was fetched) `"avatar"` as a
//   `PackedByteArray`. A successful load also refills the friends cache.
// - **Recent players:** `load_recent_players(callback, include_avatars)` —
//   same record shape, sourced from recent co-players, cache untouched.
// - **Avatars:** `load_friend_avatar(player_id, callback)` — one friend's
//   image bytes as a `PackedByteArray`, resolved through the friends cache
//   (refreshing it first if no list has loaded yet).
// - **Authorization:** `load_authorization_status(callback)` — the
//   provider's friends-access status as an int: 0 not determined,
//   1 restricted, 2 denied, 3 authorized.
// - **Platform UI:** `open_friends_overlay()`, `open_friend_request_ui()` —
//   synchronous; return true when the provider accepted the request.
// - **Sandbox knobs:** `sandbox_sign_in()`, `sandbox_sign_out()` — flip the
//   sandbox account state so scenes can rehearse signed-out behavior.
//
// ## Callback contract
//
// Every load method takes a `Callable` and invokes it exactly once, on a
// later frame, on the main thread, as `callback.call(error_code, payload)`.
// On success the code is 0 and the payload is the shape listed above; on
// failure the payload is null and the code names the operation that failed:
//
//   1  access restricted (authorization query failed)
//   2  friends load failed
//   3  recent-players load failed
//   4  no such friend (id not in the cached friends list)
//   5  avatar load failed
//
// Calls made before any provider is bound fail the same way — queued and
// delivered with the operation's code on the next `process()` tick, never
// synchronously.
//
// ## Threading
//
// Relay tasks run on a small tokio runtime owned by this node. Completion
// sinks move only engine-free data; each pending `Callable` stays in a
// main-thread map keyed by ticket, and `process()` drains finished replies
// from an mpsc channel and dispatches each to its Callable with
// `call_deferred`. Callbacks therefore run outside the bridge's own bind
// and may immediately issue the next load on this bridge. Freeing the node
// (or rebinding) abandons in-flight operations — their callbacks are
// dropped, not invoked.
//
// See also: `lib.rs` for the GDExtension entry point, the
// `guildmate_social` crate for the relay, store, and sandbox provider.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use godot::prelude::*;
use tokio::runtime::Runtime;

use guildmate_social::{
    AuthorizationStatus, Completion, FriendsError, FriendsRelay, FriendsStore, LoadOptions,
    Player, PlayerId, STATUS_OK, SandboxRoster, SandboxService, SocialService,
};

/// What one finished operation produced, queued until `process()` delivers
/// it to the ticket's Callable.
struct PendingReply {
    ticket: u64,
    reply: Reply,
}

enum Reply {
    Players(Result<Vec<Player>, FriendsError>),
    Avatar(Result<Vec<u8>, FriendsError>),
    Status(Result<AuthorizationStatus, FriendsError>),
    /// Failure queued before any task ran (unbound bridge).
    Failure(FriendsError),
}

/// Godot node that owns a relay session and delivers its completions.
///
/// Add this as a child node in your main scene. Call `init_sandbox()` (or
/// bind a vendor provider from Rust) once, then call the `load_*` methods
/// with a Callable; replies are queued during `process()` and delivered as
/// deferred calls.
#[derive(GodotClass)]
#[class(base=Node)]
pub struct SocialBridge {
    base: Base<Node>,
    relay: Option<FriendsRelay>,
    runtime: Option<Runtime>,
    /// Sandbox handle kept alongside the trait object for the sign-in/out
    /// knobs. None when a vendor provider is bound.
    sandbox: Option<Arc<SandboxService>>,
    pending: BTreeMap<u64, Callable>,
    next_ticket: u64,
    inbox: Receiver<PendingReply>,
    outbox: Sender<PendingReply>,
}

#[godot_api]
impl INode for SocialBridge {
    fn init(base: Base<Node>) -> Self {
        let (outbox, inbox) = mpsc::channel();
        Self {
            base,
            relay: None,
            runtime: None,
            sandbox: None,
            pending: BTreeMap::new(),
            next_ticket: 0,
            inbox,
            outbox,
        }
    }

    fn process(&mut self, _delta: f64) {
        while let Ok(done) = self.inbox.try_recv() {
            let Some(callback) = self.pending.remove(&done.ticket) else {
                continue; // Reply from before a rebind; nothing to deliver to.
            };
            let (code, payload) = wire(done.reply);
            if callback.is_valid() {
                // Deferred so the callback runs outside this node's bind and
                // can immediately issue the next load on the same bridge.
                callback.call_deferred(&[code.to_variant(), payload]);
            }
        }
    }
}

#[godot_api]
impl SocialBridge {
    // --- Binding ---

    /// Bind the built-in sandbox provider with its sample roster.
    #[func]
    fn init_sandbox(&mut self) {
        let sandbox = Arc::new(SandboxService::new());
        if self.bind_service(Arc::clone(&sandbox) as Arc<dyn SocialService>) {
            self.sandbox = Some(sandbox);
            godot_print!("SocialBridge: sandbox provider bound");
        }
    }

    /// Bind the built-in sandbox provider with a custom roster.
    ///
    /// The `roster_json` parameter is a JSON string matching the
    /// `SandboxRoster` serde schema (keys `friends`, `recent_players`,
    /// `authorization`). If parsing fails, falls back to the sample roster.
    #[func]
    fn init_sandbox_with_roster_json(&mut self, roster_json: GString) {
        let roster = SandboxRoster::from_json(&roster_json.to_string()).unwrap_or_else(|e| {
            godot_warn!("SocialBridge: failed to parse roster JSON: {e}, using sample roster");
            SandboxRoster::default()
        });
        let sandbox = Arc::new(SandboxService::with_roster(roster));
        if self.bind_service(Arc::clone(&sandbox) as Arc<dyn SocialService>) {
            self.sandbox = Some(sandbox);
            godot_print!("SocialBridge: sandbox provider bound with custom roster");
        }
    }

    /// Whether a provider is bound and load calls will reach it.
    #[func]
    fn is_bound(&self) -> bool {
        self.relay.is_some()
    }

    // --- Friends and recent players ---

    /// Load the local player's friends. `callback` receives
    /// `(error_code, Array[Dictionary])`; see the callback contract in the
    /// file header for the record keys and codes.
    #[func]
    fn load_friends(&mut self, callback: Callable, include_avatars: bool) {
        let Some(relay) = self.relay.clone() else {
            self.reject_unbound("load_friends", callback, FriendsError::LoadFriends);
            return;
        };
        let sink = self.register(callback, Reply::Players);
        relay.load_friends(LoadOptions::with_avatars(include_avatars), sink);
    }

    /// Load the players the local player recently played with. Same record
    /// shape as `load_friends`; the friends cache is not touched.
    #[func]
    fn load_recent_players(&mut self, callback: Callable, include_avatars: bool) {
        let Some(relay) = self.relay.clone() else {
            self.reject_unbound(
                "load_recent_players",
                callback,
                FriendsError::LoadRecentPlayers,
            );
            return;
        };
        let sink = self.register(callback, Reply::Players);
        relay.load_recent_players(LoadOptions::with_avatars(include_avatars), sink);
    }

    // --- Avatars ---

    /// Load one friend's avatar by player id. `callback` receives
    /// `(error_code, PackedByteArray)`. The id must name a friend; players
    /// that are only in recent-players resolve as code 4.
    #[func]
    fn load_friend_avatar(&mut self, player_id: GString, callback: Callable) {
        let Some(relay) = self.relay.clone() else {
            self.reject_unbound("load_friend_avatar", callback, FriendsError::LoadAvatar);
            return;
        };
        let sink = self.register(callback, Reply::Avatar);
        relay.load_friend_avatar(PlayerId(player_id.to_string()), sink);
    }

    // --- Authorization ---

    /// Query the provider's friends-access authorization status. `callback`
    /// receives `(error_code, status_code)` with the status as an int
    /// (0 not determined, 1 restricted, 2 denied, 3 authorized).
    #[func]
    fn load_authorization_status(&mut self, callback: Callable) {
        let Some(relay) = self.relay.clone() else {
            self.reject_unbound(
                "load_authorization_status",
                callback,
                FriendsError::AccessRestricted,
            );
            return;
        };
        let sink = self.register(callback, Reply::Status);
        relay.load_authorization_status(sink);
    }

    // --- Platform UI ---

    /// Open the platform's friends overlay. Returns true when the provider
    /// accepted the request.
    #[func]
    fn open_friends_overlay(&self) -> bool {
        let Some(relay) = &self.relay else {
            godot_warn!("SocialBridge: open_friends_overlay before a provider was bound");
            return false;
        };
        match relay.present_friends_overlay() {
            Ok(()) => true,
            Err(e) => {
                godot_warn!("SocialBridge: friends overlay failed: {e}");
                false
            }
        }
    }

    /// Open the platform's friend-request UI. Returns true when the
    /// provider accepted the request.
    #[func]
    fn open_friend_request_ui(&self) -> bool {
        let Some(relay) = &self.relay else {
            godot_warn!("SocialBridge: open_friend_request_ui before a provider was bound");
            return false;
        };
        match relay.present_friend_request() {
            Ok(()) => true,
            Err(e) => {
                godot_warn!("SocialBridge: friend-request UI failed: {e}");
                false
            }
        }
    }

    // --- Sandbox knobs ---

    /// Sign the sandbox player back in.
    #[func]
    fn sandbox_sign_in(&self) {
        match &self.sandbox {
            Some(sandbox) => sandbox.sign_in(),
            None => godot_warn!("SocialBridge: sandbox_sign_in without a sandbox binding"),
        }
    }

    /// Sign the sandbox player out, so list loads fail the way they do for
    /// a signed-out platform account. No effect on vendor bindings.
    #[func]
    fn sandbox_sign_out(&self) {
        match &self.sandbox {
            Some(sandbox) => sandbox.sign_out(),
            None => godot_warn!("SocialBridge: sandbox_sign_out without a sandbox binding"),
        }
    }
}

impl SocialBridge {
    /// Bind a provider and start a fresh session: new friends cache, new
    /// runtime. Replies still in flight from a previous binding are dropped
    /// rather than delivered. Returns false, with the previous binding left
    /// fully intact, when the runtime cannot be started. Vendor SDK bindings
    /// call this directly.
    pub fn bind_service(&mut self, service: Arc<dyn SocialService>) -> bool {
        // The runtime build is the only step that can fail; nothing of the
        // previous binding is touched until it has succeeded.
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("guildmate-relay")
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                godot_error!("SocialBridge: failed to start the relay runtime: {e}");
                return false;
            }
        };

        while self.inbox.try_recv().is_ok() {}
        self.pending.clear();
        self.sandbox = None;
        self.relay = Some(FriendsRelay::new(
            service,
            FriendsStore::new(),
            runtime.handle().clone(),
        ));
        // Dropping a previous runtime here cancels its remaining tasks.
        self.runtime = Some(runtime);
        true
    }

    /// Park a callable under a fresh ticket and build the completion sink
    /// that queues its reply. The sink runs on a relay worker, so only
    /// engine-free data crosses the channel; `process()` finds the Callable
    /// by ticket.
    fn register<T>(
        &mut self,
        callback: Callable,
        wrap: fn(Result<T, FriendsError>) -> Reply,
    ) -> Completion<T>
    where
        T: Send + 'static,
    {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.insert(ticket, callback);
        let outbox = self.outbox.clone();
        Box::new(move |result| {
            let _ = outbox.send(PendingReply {
                ticket,
                reply: wrap(result),
            });
        })
    }

    /// Queue a failure for a call made before any provider was bound.
    /// Delivery still happens on a later `process()` tick, so callers see
    /// the same async shape on every path.
    fn reject_unbound(&mut self, operation: &str, callback: Callable, error: FriendsError) {
        godot_warn!("SocialBridge: {operation} called before a provider was bound");
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.insert(ticket, callback);
        let _ = self.outbox.send(PendingReply {
            ticket,
            reply: Reply::Failure(error),
        });
    }
}

// ---------------------------------------------------------------------------
// Wire conversion: engine-free results to (error_code, payload) pairs
// ---------------------------------------------------------------------------

fn wire(reply: Reply) -> (i64, Variant) {
    match reply {
        Reply::Players(Ok(players)) => (STATUS_OK, players_to_array(&players).to_variant()),
        Reply::Avatar(Ok(bytes)) => (STATUS_OK, bytes_to_packed(&bytes).to_variant()),
        Reply::Status(Ok(status)) => (STATUS_OK, status.as_code().to_variant()),
        Reply::Players(Err(e)) | Reply::Avatar(Err(e)) | Reply::Status(Err(e)) => {
            (e.code(), Variant::nil())
        }
        Reply::Failure(e) => (e.code(), Variant::nil()),
    }
}

fn players_to_array(players: &[Player]) -> VarArray {
    let mut arr = VarArray::new();
    for player in players {
        arr.push(&player_to_dict(player).to_variant());
    }
    arr
}

fn player_to_dict(player: &Player) -> VarDictionary {
    let mut dict = VarDictionary::new();
    dict.set("id", GString::from(player.id.as_str()));
    dict.set("display_name", GString::from(&player.display_name));
    if let Some(avatar) = &player.avatar {
        dict.set("avatar", bytes_to_packed(avatar));
    }
    dict
}

fn bytes_to_packed(bytes: &[u8]) -> PackedByteArray {
    let mut arr = PackedByteArray::new();
    arr.extend(bytes.iter().copied());
    arr
}
