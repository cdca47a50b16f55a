// Player identity and record types.
//
// Two player shapes cross the relay: `RemotePlayer` is what the upstream
// provider hands back (and what the friends store caches), `Player` is the
// transformed record delivered to the host through a completion sink. The
// split keeps the cache provider-faithful — avatar lookups need the original
// provider record to request an image — while hosts only ever see the
// enriched form.
//
// `PlayerId` is an opaque provider-assigned identifier. The relay never
// inspects it beyond equality; real vendors use scoped string IDs and the
// sandbox uses readable `gm-NNNN` strings.

use serde::{Deserialize, Serialize};

/// Opaque provider-assigned player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-side player record, exactly as the upstream SDK reports it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemotePlayer {
    pub id: PlayerId,
    pub display_name: String,
}

/// Host-side player record delivered through completion sinks.
///
/// Built fresh per response and never mutated afterwards; ownership passes
/// to the sink. `avatar` holds vendor-encoded image bytes and is `None`
/// when avatars were skipped or the per-player fetch failed.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub avatar: Option<Vec<u8>>,
}

impl Player {
    /// Record for a provider player, with no avatar attached yet.
    pub fn from_remote(remote: &RemotePlayer) -> Self {
        Self {
            id: remote.id.clone(),
            display_name: remote.display_name.clone(),
            avatar: None,
        }
    }
}
