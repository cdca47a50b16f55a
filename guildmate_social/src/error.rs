// Unified adapter error taxonomy.
//
// One enum covers every failure the relay can report, each with a stable
// integer wire code. GDScript matches on the integers, so the mapping in
// `code()` is a compatibility surface: new variants get new codes, existing
// codes never move. `0` is reserved for success and never appears here.

use thiserror::Error;

/// Status code delivered alongside a successful payload.
pub const STATUS_OK: i64 = 0;

/// Failure reported through a completion sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FriendsError {
    /// The authorization query failed or access is blocked.
    #[error("friends access is restricted")]
    AccessRestricted,
    /// The primary friends fetch failed.
    #[error("failed to load friends")]
    LoadFriends,
    /// The recent-players fetch failed.
    #[error("failed to load recent players")]
    LoadRecentPlayers,
    /// Avatar lookup: the requested id is not in the friends store.
    #[error("no friend with the requested id")]
    NoSuchFriend,
    /// Avatar lookup: the internal refresh or the image fetch failed.
    #[error("failed to load avatar")]
    LoadAvatar,
}

impl FriendsError {
    /// Stable wire code (1..=5).
    pub fn code(self) -> i64 {
        match self {
            Self::AccessRestricted => 1,
            Self::LoadFriends => 2,
            Self::LoadRecentPlayers => 3,
            Self::NoSuchFriend => 4,
            Self::LoadAvatar => 5,
        }
    }
}
