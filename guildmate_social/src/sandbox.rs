// In-process provider backend for development and editor runs.
//
// `SandboxService` implements the full provider surface against a local
// roster, with no platform SDK and no network. Everything is deterministic:
// the same roster and the same player id always produce the same lists and
// the same avatar bytes. Builder knobs inject latency and failures so
// scripts can exercise every relay error path from the editor.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::player::{PlayerId, RemotePlayer};
use crate::service::{AuthorizationStatus, ServiceError, SocialService};

/// Side length of generated sandbox avatars, in pixels.
const AVATAR_SIZE: u32 = 8;

/// The data a sandbox backend serves: friends, recent co-players, and the
/// authorization status it reports. Deserializable from JSON so editor
/// scenes can ship their own roster; omitted sections fall back to the
/// built-in sample cast.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SandboxRoster {
    #[serde(default = "default_friends")]
    pub friends: Vec<RemotePlayer>,
    #[serde(default = "default_recent_players")]
    pub recent_players: Vec<RemotePlayer>,
    #[serde(default = "default_authorization")]
    pub authorization: AuthorizationStatus,
}

impl SandboxRoster {
    /// Parse a roster from JSON. Callers decide the fallback; the bridge
    /// warns and uses the default roster on parse failure.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for SandboxRoster {
    fn default() -> Self {
        Self {
            friends: default_friends(),
            recent_players: default_recent_players(),
            authorization: default_authorization(),
        }
    }
}

fn default_friends() -> Vec<RemotePlayer> {
    vec![
        sample("gm-1001", "Thistle Brightbark"),
        sample("gm-1002", "Moss Underbough"),
        sample("gm-1003", "Fern Quickstep"),
    ]
}

fn default_recent_players() -> Vec<RemotePlayer> {
    vec![
        sample("gm-2001", "Rowan Dusklight"),
        sample("gm-2002", "Wren Hollowreed"),
    ]
}

fn default_authorization() -> AuthorizationStatus {
    AuthorizationStatus::Authorized
}

fn sample(id: &str, name: &str) -> RemotePlayer {
    RemotePlayer {
        id: PlayerId(id.into()),
        display_name: name.into(),
    }
}

/// Local provider over a fixed roster.
///
/// Friends and recent-players fetches require the sandbox player to be
/// signed in (the default). The authorization query and avatar fetches
/// answer regardless, like the platform's do. UI presentation hooks log and
/// succeed — there is nothing to show.
pub struct SandboxService {
    roster: SandboxRoster,
    authenticated: AtomicBool,
    latency: Duration,
    fail_friends: bool,
    fail_recent_players: bool,
    fail_authorization: bool,
    broken_avatars: HashSet<PlayerId>,
}

impl SandboxService {
    pub fn new() -> Self {
        Self::with_roster(SandboxRoster::default())
    }

    pub fn with_roster(roster: SandboxRoster) -> Self {
        Self {
            roster,
            authenticated: AtomicBool::new(true),
            latency: Duration::ZERO,
            fail_friends: false,
            fail_recent_players: false,
            fail_authorization: false,
            broken_avatars: HashSet::new(),
        }
    }

    /// Sleep this long before answering each fetch, to surface loading
    /// states in the editor.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every friends fetch fail.
    pub fn failing_friends(mut self) -> Self {
        self.fail_friends = true;
        self
    }

    /// Make every recent-players fetch fail.
    pub fn failing_recent_players(mut self) -> Self {
        self.fail_recent_players = true;
        self
    }

    /// Make every authorization query fail.
    pub fn failing_authorization(mut self) -> Self {
        self.fail_authorization = true;
        self
    }

    /// Make the avatar fetch fail for this player only.
    pub fn with_broken_avatar(mut self, id: &str) -> Self {
        self.broken_avatars.insert(PlayerId(id.into()));
        self
    }

    pub fn sign_in(&self) {
        self.authenticated.store(true, Ordering::SeqCst);
    }

    pub fn sign_out(&self) {
        self.authenticated.store(false, Ordering::SeqCst);
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn require_signed_in(&self) -> Result<(), ServiceError> {
        if self.authenticated.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ServiceError::NotAuthenticated)
        }
    }
}

impl Default for SandboxService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SocialService for SandboxService {
    async fn fetch_friends(&self) -> Result<Vec<RemotePlayer>, ServiceError> {
        self.pause().await;
        self.require_signed_in()?;
        if self.fail_friends {
            return Err(ServiceError::upstream("friends", "sandbox failure injected"));
        }
        Ok(self.roster.friends.clone())
    }

    async fn fetch_recent_players(&self) -> Result<Vec<RemotePlayer>, ServiceError> {
        self.pause().await;
        self.require_signed_in()?;
        if self.fail_recent_players {
            return Err(ServiceError::upstream(
                "recent players",
                "sandbox failure injected",
            ));
        }
        Ok(self.roster.recent_players.clone())
    }

    async fn fetch_authorization_status(&self) -> Result<AuthorizationStatus, ServiceError> {
        self.pause().await;
        if self.fail_authorization {
            return Err(ServiceError::upstream(
                "authorization",
                "sandbox failure injected",
            ));
        }
        Ok(self.roster.authorization)
    }

    async fn fetch_avatar(&self, player: &RemotePlayer) -> Result<Vec<u8>, ServiceError> {
        self.pause().await;
        if self.broken_avatars.contains(&player.id) {
            return Err(ServiceError::upstream("avatar", "sandbox failure injected"));
        }
        Ok(sandbox_avatar(&player.id))
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn present_friends_overlay(&self) -> Result<(), ServiceError> {
        log::info!("sandbox: friends overlay requested (nothing to present)");
        Ok(())
    }

    fn present_friend_request(&self) -> Result<(), ServiceError> {
        log::info!("sandbox: friend-request UI requested (nothing to present)");
        Ok(())
    }
}

/// Generate a deterministic identicon for a player id.
///
/// Returns a self-contained blob: first 8 bytes are width and height as
/// little-endian u32, followed by fully opaque RGBA8 pixel data. The pattern
/// is mirrored left-to-right and derived entirely from the id, so the same
/// player always gets the same face.
pub fn sandbox_avatar(id: &PlayerId) -> Vec<u8> {
    let mut seed = 0u32;
    for &byte in id.as_str().as_bytes() {
        seed = hash_u32(seed ^ u32::from(byte));
    }

    let fg = [
        (seed >> 16) as u8 | 0x30,
        (seed >> 8) as u8 | 0x30,
        seed as u8 | 0x30,
    ];
    let bg = [fg[0] / 3, fg[1] / 3, fg[2] / 3];

    let mut bytes = Vec::with_capacity(8 + (AVATAR_SIZE * AVATAR_SIZE * 4) as usize);
    bytes.extend_from_slice(&AVATAR_SIZE.to_le_bytes());
    bytes.extend_from_slice(&AVATAR_SIZE.to_le_bytes());
    for py in 0..AVATAR_SIZE {
        for px in 0..AVATAR_SIZE {
            // Mirror the left half for a symmetric face.
            let sx = px.min(AVATAR_SIZE - 1 - px);
            let cell = hash_u32(seed ^ sx.wrapping_mul(31).wrapping_add(py.wrapping_mul(37)));
            let color = if cell & 1 == 0 { fg } else { bg };
            bytes.extend_from_slice(&color);
            bytes.push(255); // Fully opaque
        }
    }
    bytes
}

/// Simple integer hash for deterministic pseudo-random values.
fn hash_u32(mut x: u32) -> u32 {
    x = x.wrapping_mul(0x9E37_79B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2_AE35);
    x ^= x >> 16;
    x
}
