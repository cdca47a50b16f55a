// Upstream provider contract.
//
// `SocialService` abstracts the platform social SDK the relay forwards to.
// The async methods mirror the vendor surface one-to-one: friends list,
// recent co-players, friends-access authorization, and per-player avatars.
// The two presentation hooks are synchronous — overlay UI belongs entirely
// to the vendor layer and produces no data.
//
// The trait is object-safe (`async_trait`) so embedders can hand the bridge
// an `Arc<dyn SocialService>`. Per-platform vendor bindings implement it out
// of tree; `sandbox::SandboxService` implements it in tree for development
// and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::RemotePlayer;

/// Friends-access authorization as reported by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    /// The user has not been asked yet.
    NotDetermined,
    /// Access is blocked by platform policy (e.g. parental controls).
    Restricted,
    /// The user declined access.
    Denied,
    /// Access granted.
    Authorized,
}

impl AuthorizationStatus {
    /// Wire value delivered to hosts (0..=3, in vendor order).
    pub fn as_code(self) -> i64 {
        match self {
            Self::NotDetermined => 0,
            Self::Restricted => 1,
            Self::Denied => 2,
            Self::Authorized => 3,
        }
    }
}

/// Error produced by a provider call.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The local player is not signed in to the platform service.
    #[error("local player is not authenticated")]
    NotAuthenticated,
    /// Any other upstream failure, tagged with the operation that failed.
    #[error("{operation} failed upstream: {message}")]
    Upstream {
        operation: &'static str,
        message: String,
    },
}

impl ServiceError {
    /// Upstream failure with operation context.
    pub fn upstream(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            operation,
            message: message.into(),
        }
    }
}

/// Async social-SDK surface consumed by the relay.
///
/// Every fetch suspends on upstream I/O and fails with a [`ServiceError`].
/// Implementations must be cheap to share behind an `Arc` — the relay clones
/// the handle into each spawned operation task.
#[async_trait]
pub trait SocialService: Send + Sync {
    /// Friends of the authenticated local player.
    async fn fetch_friends(&self) -> Result<Vec<RemotePlayer>, ServiceError>;

    /// Players the local player recently played with.
    async fn fetch_recent_players(&self) -> Result<Vec<RemotePlayer>, ServiceError>;

    /// Current friends-access authorization status.
    async fn fetch_authorization_status(&self) -> Result<AuthorizationStatus, ServiceError>;

    /// Small avatar image for one player. Bytes are vendor-encoded and the
    /// relay passes them through to the host unchanged.
    async fn fetch_avatar(&self, player: &RemotePlayer) -> Result<Vec<u8>, ServiceError>;

    /// Whether the local player is currently signed in. Gates the relay's
    /// internal friends refresh.
    fn is_authenticated(&self) -> bool;

    /// Open the platform's friends overlay.
    fn present_friends_overlay(&self) -> Result<(), ServiceError>;

    /// Open the platform's friend-request UI.
    fn present_friend_request(&self) -> Result<(), ServiceError>;
}
