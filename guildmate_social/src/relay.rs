// Async relay between the upstream provider and host completion sinks.
//
// `FriendsRelay` is the one component of this crate with behavior: each
// operation spawns an independent task onto the injected runtime handle,
// awaits the provider, transforms the result, and invokes the caller's
// completion sink exactly once — on every path, success or failure. The
// invoking call itself never blocks.
//
// Operations:
// - `load_friends`: fetch friends, overwrite the store, deliver enriched
//   records. The only writer besides the avatar lookup's internal refresh.
// - `load_recent_players`: same shape against the recent-players call, but
//   never touches the store.
// - `load_friend_avatar`: refresh-if-empty, scan the store, fetch one image.
// - `load_authorization_status`: plain fetch-and-forward.
// - `present_*`: synchronous forwarders to the provider's UI hooks.
//
// Error discipline: upstream failures are caught at the operation boundary,
// logged once with context, and collapsed to the operation's fixed
// `FriendsError`. Nothing propagates past the sink. Per-player avatar
// failures during list enrichment degrade to "no avatar" without a log line
// — that silence is the `AvatarPolicy::BestEffort` contract, and tests
// assert it stays that way.
//
// Concurrency: no ordering across operations. Two overlapping friends loads
// leave the store with whichever task finished last (the store is
// last-write-wins and the relay does not merge). Cancellation is not
// offered; dropping the runtime abandons in-flight tasks along with their
// sinks.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::error::FriendsError;
use crate::player::{Player, PlayerId, RemotePlayer};
use crate::service::{AuthorizationStatus, ServiceError, SocialService};
use crate::store::FriendsStore;

/// One-shot completion sink. Invoked exactly once per operation, from the
/// spawned task's context — bridge layers are responsible for deferring the
/// call onto their host's main thread.
pub type Completion<T> = Box<dyn FnOnce(Result<T, FriendsError>) + Send + 'static>;

/// Avatar enrichment policy for the list operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AvatarPolicy {
    /// Fetch a small avatar per player. A per-player failure omits that
    /// record's avatar and never fails the batch.
    #[default]
    BestEffort,
    /// Do not fetch avatars.
    Skip,
}

/// Options fixed at call time for the list operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub avatars: AvatarPolicy,
}

impl LoadOptions {
    /// Options from the scripting API's boolean flag (avatars default on).
    pub fn with_avatars(include: bool) -> Self {
        let avatars = if include {
            AvatarPolicy::BestEffort
        } else {
            AvatarPolicy::Skip
        };
        Self { avatars }
    }
}

/// Async relay adapter over one provider and one friends store.
///
/// Cloning is cheap and every clone shares the same provider, store, and
/// runtime handle.
#[derive(Clone)]
pub struct FriendsRelay {
    service: Arc<dyn SocialService>,
    store: FriendsStore,
    handle: Handle,
}

impl FriendsRelay {
    pub fn new(service: Arc<dyn SocialService>, store: FriendsStore, handle: Handle) -> Self {
        Self {
            service,
            store,
            handle,
        }
    }

    /// The store this relay caches friends in.
    pub fn store(&self) -> &FriendsStore {
        &self.store
    }

    /// Load the local player's friends, overwrite the store with the fresh
    /// list, and deliver enriched records. Failure code: `LoadFriends`; the
    /// store is left untouched on failure.
    pub fn load_friends(&self, options: LoadOptions, sink: Completion<Vec<Player>>) {
        let service = Arc::clone(&self.service);
        let store = self.store.clone();
        self.handle.spawn(async move {
            let result = match service.fetch_friends().await {
                Ok(friends) => {
                    store.replace(friends.clone());
                    Ok(enrich(service.as_ref(), friends, options.avatars).await)
                }
                Err(err) => {
                    log::warn!("relay: friends fetch failed: {err}");
                    Err(FriendsError::LoadFriends)
                }
            };
            sink(result);
        });
    }

    /// Load the players the local player recently played with. Same shape as
    /// `load_friends` but sourced from the recent-players call and with no
    /// effect on the friends store. Failure code: `LoadRecentPlayers`.
    pub fn load_recent_players(&self, options: LoadOptions, sink: Completion<Vec<Player>>) {
        let service = Arc::clone(&self.service);
        self.handle.spawn(async move {
            let result = match service.fetch_recent_players().await {
                Ok(players) => Ok(enrich(service.as_ref(), players, options.avatars).await),
                Err(err) => {
                    log::warn!("relay: recent players fetch failed: {err}");
                    Err(FriendsError::LoadRecentPlayers)
                }
            };
            sink(result);
        });
    }

    /// Load the small avatar of one friend by id.
    ///
    /// The task owns the single authoritative fetch-if-empty check: when the
    /// store has never been populated it refreshes it first (refusing when
    /// the local player is signed out), then scans for the id. An id missing
    /// from a populated store is `NoSuchFriend`; every other failure is
    /// `LoadAvatar`.
    pub fn load_friend_avatar(&self, id: PlayerId, sink: Completion<Vec<u8>>) {
        let service = Arc::clone(&self.service);
        let store = self.store.clone();
        self.handle.spawn(async move {
            sink(avatar_lookup(service.as_ref(), &store, &id).await);
        });
    }

    /// Query the provider's friends-access authorization status. Failure
    /// code: `AccessRestricted`.
    pub fn load_authorization_status(&self, sink: Completion<AuthorizationStatus>) {
        let service = Arc::clone(&self.service);
        self.handle.spawn(async move {
            let result = match service.fetch_authorization_status().await {
                Ok(status) => Ok(status),
                Err(err) => {
                    log::warn!("relay: authorization status fetch failed: {err}");
                    Err(FriendsError::AccessRestricted)
                }
            };
            sink(result);
        });
    }

    /// Open the platform friends overlay. Synchronous; presentation is
    /// entirely the provider's concern.
    pub fn present_friends_overlay(&self) -> Result<(), ServiceError> {
        self.service.present_friends_overlay()
    }

    /// Open the platform friend-request UI.
    pub fn present_friend_request(&self) -> Result<(), ServiceError> {
        self.service.present_friend_request()
    }
}

/// Build host records from provider players, attaching avatars per policy.
/// A failed per-player fetch leaves that record without an avatar; the batch
/// itself always succeeds.
async fn enrich(
    service: &dyn SocialService,
    remotes: Vec<RemotePlayer>,
    policy: AvatarPolicy,
) -> Vec<Player> {
    let mut records = Vec::with_capacity(remotes.len());
    for remote in remotes {
        let mut record = Player::from_remote(&remote);
        if policy == AvatarPolicy::BestEffort {
            if let Ok(bytes) = service.fetch_avatar(&remote).await {
                record.avatar = Some(bytes);
            }
        }
        records.push(record);
    }
    records
}

/// Body of the avatar lookup: refresh-if-empty, scan, fetch.
async fn avatar_lookup(
    service: &dyn SocialService,
    store: &FriendsStore,
    id: &PlayerId,
) -> Result<Vec<u8>, FriendsError> {
    if store.is_empty() {
        if let Err(err) = refresh_friends(service, store).await {
            log::warn!("relay: friends refresh for avatar lookup failed: {err}");
            return Err(FriendsError::LoadAvatar);
        }
    }
    let Some(remote) = store.find(id) else {
        return Err(FriendsError::NoSuchFriend);
    };
    match service.fetch_avatar(&remote).await {
        Ok(bytes) => Ok(bytes),
        Err(err) => {
            log::warn!("relay: avatar fetch for {id} failed: {err}");
            Err(FriendsError::LoadAvatar)
        }
    }
}

/// Re-fetch the friends list into the store. Refuses outright when the local
/// player is signed out — the provider would reject the call anyway, and
/// checking first avoids a doomed round trip.
async fn refresh_friends(
    service: &dyn SocialService,
    store: &FriendsStore,
) -> Result<(), ServiceError> {
    if !service.is_authenticated() {
        return Err(ServiceError::NotAuthenticated);
    }
    let friends = service.fetch_friends().await?;
    store.replace(friends);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use super::*;

    /// Scripted provider: each fetch pops a pre-programmed result, optionally
    /// gated on a oneshot so tests control completion order.
    struct Scripted<T> {
        result: Result<T, ServiceError>,
        gate: Option<oneshot::Receiver<()>>,
    }

    struct ScriptedService {
        authenticated: AtomicBool,
        friends: Mutex<VecDeque<Scripted<Vec<RemotePlayer>>>>,
        recents: Mutex<VecDeque<Scripted<Vec<RemotePlayer>>>>,
        statuses: Mutex<VecDeque<Scripted<AuthorizationStatus>>>,
        avatars: Mutex<HashMap<PlayerId, Vec<u8>>>,
        friends_calls: AtomicUsize,
        avatar_calls: AtomicUsize,
    }

    impl ScriptedService {
        fn new() -> Self {
            Self {
                authenticated: AtomicBool::new(true),
                friends: Mutex::new(VecDeque::new()),
                recents: Mutex::new(VecDeque::new()),
                statuses: Mutex::new(VecDeque::new()),
                avatars: Mutex::new(HashMap::new()),
                friends_calls: AtomicUsize::new(0),
                avatar_calls: AtomicUsize::new(0),
            }
        }

        fn push_friends(&self, result: Result<Vec<RemotePlayer>, ServiceError>) {
            self.friends.lock().unwrap().push_back(Scripted { result, gate: None });
        }

        fn push_friends_gated(
            &self,
            result: Result<Vec<RemotePlayer>, ServiceError>,
            gate: oneshot::Receiver<()>,
        ) {
            self.friends.lock().unwrap().push_back(Scripted {
                result,
                gate: Some(gate),
            });
        }

        fn push_recents(&self, result: Result<Vec<RemotePlayer>, ServiceError>) {
            self.recents.lock().unwrap().push_back(Scripted { result, gate: None });
        }

        fn push_status(&self, result: Result<AuthorizationStatus, ServiceError>) {
            self.statuses.lock().unwrap().push_back(Scripted { result, gate: None });
        }

        fn set_avatar(&self, id: &str, bytes: &[u8]) {
            self.avatars
                .lock()
                .unwrap()
                .insert(PlayerId(id.into()), bytes.to_vec());
        }

        fn sign_out(&self) {
            self.authenticated.store(false, Ordering::SeqCst);
        }

        fn friends_calls(&self) -> usize {
            self.friends_calls.load(Ordering::SeqCst)
        }

        fn avatar_calls(&self) -> usize {
            self.avatar_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SocialService for ScriptedService {
        async fn fetch_friends(&self) -> Result<Vec<RemotePlayer>, ServiceError> {
            self.friends_calls.fetch_add(1, Ordering::SeqCst);
            let scripted = self
                .friends
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted friends fetch");
            if let Some(gate) = scripted.gate {
                let _ = gate.await;
            }
            scripted.result
        }

        async fn fetch_recent_players(&self) -> Result<Vec<RemotePlayer>, ServiceError> {
            let scripted = self
                .recents
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted recent players fetch");
            if let Some(gate) = scripted.gate {
                let _ = gate.await;
            }
            scripted.result
        }

        async fn fetch_authorization_status(&self) -> Result<AuthorizationStatus, ServiceError> {
            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted status fetch")
                .result
        }

        async fn fetch_avatar(&self, player: &RemotePlayer) -> Result<Vec<u8>, ServiceError> {
            self.avatar_calls.fetch_add(1, Ordering::SeqCst);
            self.avatars
                .lock()
                .unwrap()
                .get(&player.id)
                .cloned()
                .ok_or_else(|| ServiceError::upstream("avatar", "no image available"))
        }

        fn is_authenticated(&self) -> bool {
            self.authenticated.load(Ordering::SeqCst)
        }

        fn present_friends_overlay(&self) -> Result<(), ServiceError> {
            Ok(())
        }

        fn present_friend_request(&self) -> Result<(), ServiceError> {
            Ok(())
        }
    }

    fn remote(id: &str, name: &str) -> RemotePlayer {
        RemotePlayer {
            id: PlayerId(id.into()),
            display_name: name.into(),
        }
    }

    fn relay_pair(service: ScriptedService) -> (FriendsRelay, Arc<ScriptedService>) {
        let service = Arc::new(service);
        let relay = FriendsRelay::new(
            Arc::clone(&service) as Arc<dyn SocialService>,
            FriendsStore::new(),
            Handle::current(),
        );
        (relay, service)
    }

    /// Oneshot-backed sink: the test awaits the receiver for the result.
    fn sink<T: Send + 'static>() -> (Completion<T>, oneshot::Receiver<Result<T, FriendsError>>) {
        let (tx, rx) = oneshot::channel();
        (
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
            rx,
        )
    }

    /// Sink appending into a shared log, for tests that need several
    /// completions in arrival order.
    fn log_sink<T: Send + 'static>(
        log: &Arc<Mutex<Vec<Result<T, FriendsError>>>>,
    ) -> Completion<T> {
        let log = Arc::clone(log);
        Box::new(move |result| log.lock().unwrap().push(result))
    }

    async fn wait_for_len<T>(log: &Arc<Mutex<Vec<T>>>, len: usize) {
        for _ in 0..1000 {
            if log.lock().unwrap().len() >= len {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("timed out waiting for {len} completions");
    }

    fn no_avatars() -> LoadOptions {
        LoadOptions {
            avatars: AvatarPolicy::Skip,
        }
    }

    #[tokio::test]
    async fn load_friends_delivers_enriched_records_and_fills_store() {
        let service = ScriptedService::new();
        service.push_friends(Ok(vec![remote("a", "Ash"), remote("b", "Birch")]));
        service.set_avatar("a", b"ash-avatar");
        // No avatar scripted for "b": its fetch fails and must be swallowed.
        let (relay, _service) = relay_pair(service);

        let (s, rx) = sink();
        relay.load_friends(LoadOptions::default(), s);
        let players = rx.await.unwrap().unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id, PlayerId("a".into()));
        assert_eq!(players[0].avatar.as_deref(), Some(b"ash-avatar".as_slice()));
        assert_eq!(players[1].id, PlayerId("b".into()));
        assert_eq!(players[1].avatar, None);
        assert_eq!(
            relay.store().snapshot(),
            Some(vec![remote("a", "Ash"), remote("b", "Birch")])
        );
    }

    #[tokio::test]
    async fn load_friends_failure_reports_code_and_keeps_store() {
        let service = ScriptedService::new();
        service.push_friends(Err(ServiceError::upstream("friends", "socket closed")));
        let (relay, _service) = relay_pair(service);
        relay.store().replace(vec![remote("c", "Cedar")]);

        let (s, rx) = sink();
        relay.load_friends(LoadOptions::default(), s);
        let err = rx.await.unwrap().unwrap_err();

        assert_eq!(err, FriendsError::LoadFriends);
        assert_eq!(err.code(), 2);
        assert_eq!(relay.store().snapshot(), Some(vec![remote("c", "Cedar")]));
    }

    #[tokio::test]
    async fn load_friends_skip_policy_fetches_no_avatars() {
        let service = ScriptedService::new();
        service.push_friends(Ok(vec![remote("a", "Ash")]));
        service.set_avatar("a", b"unused");
        let (relay, service) = relay_pair(service);

        let (s, rx) = sink();
        relay.load_friends(no_avatars(), s);
        let players = rx.await.unwrap().unwrap();

        assert_eq!(players[0].avatar, None);
        assert_eq!(service.avatar_calls(), 0);
    }

    #[tokio::test]
    async fn recent_players_never_touch_the_store() {
        let service = ScriptedService::new();
        service.push_recents(Ok(vec![remote("r", "Rowan")]));
        service.set_avatar("r", b"rowan-avatar");
        let (relay, _service) = relay_pair(service);

        let (s, rx) = sink();
        relay.load_recent_players(LoadOptions::default(), s);
        let players = rx.await.unwrap().unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].avatar.as_deref(), Some(b"rowan-avatar".as_slice()));
        assert!(relay.store().is_empty());
    }

    #[tokio::test]
    async fn recent_players_failure_reports_code() {
        let service = ScriptedService::new();
        service.push_recents(Err(ServiceError::upstream("recent", "timeout")));
        let (relay, _service) = relay_pair(service);

        let (s, rx) = sink();
        relay.load_recent_players(LoadOptions::default(), s);
        let err = rx.await.unwrap().unwrap_err();

        assert_eq!(err, FriendsError::LoadRecentPlayers);
        assert_eq!(err.code(), 3);
    }

    #[tokio::test]
    async fn avatar_lookup_hits_cache_without_refresh() {
        let service = ScriptedService::new();
        service.set_avatar("a", b"ash-avatar");
        let (relay, service) = relay_pair(service);
        relay.store().replace(vec![remote("a", "Ash"), remote("b", "Birch")]);

        let (s, rx) = sink();
        relay.load_friend_avatar(PlayerId("a".into()), s);
        let bytes = rx.await.unwrap().unwrap();

        assert_eq!(bytes, b"ash-avatar");
        assert_eq!(service.friends_calls(), 0);
    }

    #[tokio::test]
    async fn avatar_lookup_unknown_id_is_no_such_friend() {
        let service = ScriptedService::new();
        let (relay, service) = relay_pair(service);
        relay.store().replace(vec![remote("a", "Ash"), remote("b", "Birch")]);

        let (s, rx) = sink();
        relay.load_friend_avatar(PlayerId("x".into()), s);
        let err = rx.await.unwrap().unwrap_err();

        assert_eq!(err, FriendsError::NoSuchFriend);
        assert_eq!(err.code(), 4);
        assert_eq!(service.avatar_calls(), 0);
    }

    #[tokio::test]
    async fn avatar_lookup_refreshes_an_unpopulated_store_once() {
        let service = ScriptedService::new();
        service.push_friends(Ok(vec![remote("a", "Ash")]));
        service.set_avatar("a", b"ash-avatar");
        let (relay, service) = relay_pair(service);

        let (s, rx) = sink();
        relay.load_friend_avatar(PlayerId("a".into()), s);
        let bytes = rx.await.unwrap().unwrap();

        assert_eq!(bytes, b"ash-avatar");
        assert_eq!(service.friends_calls(), 1);
        assert_eq!(relay.store().snapshot(), Some(vec![remote("a", "Ash")]));
    }

    #[tokio::test]
    async fn avatar_lookup_treats_populated_empty_list_as_authoritative() {
        let service = ScriptedService::new();
        let (relay, service) = relay_pair(service);
        relay.store().replace(Vec::new());

        let (s, rx) = sink();
        relay.load_friend_avatar(PlayerId("a".into()), s);
        let err = rx.await.unwrap().unwrap_err();

        assert_eq!(err, FriendsError::NoSuchFriend);
        assert_eq!(service.friends_calls(), 0);
    }

    #[tokio::test]
    async fn avatar_lookup_signed_out_refresh_reports_load_avatar() {
        let service = ScriptedService::new();
        service.sign_out();
        let (relay, service) = relay_pair(service);

        let (s, rx) = sink();
        relay.load_friend_avatar(PlayerId("a".into()), s);
        let err = rx.await.unwrap().unwrap_err();

        assert_eq!(err, FriendsError::LoadAvatar);
        assert_eq!(err.code(), 5);
        // The refresh refuses before hitting the provider.
        assert_eq!(service.friends_calls(), 0);
    }

    #[tokio::test]
    async fn avatar_fetch_failure_reports_load_avatar() {
        let service = ScriptedService::new();
        let (relay, _service) = relay_pair(service);
        relay.store().replace(vec![remote("a", "Ash")]);

        let (s, rx) = sink();
        relay.load_friend_avatar(PlayerId("a".into()), s);
        let err = rx.await.unwrap().unwrap_err();

        assert_eq!(err, FriendsError::LoadAvatar);
    }

    #[tokio::test]
    async fn authorization_status_is_forwarded() {
        let service = ScriptedService::new();
        service.push_status(Ok(AuthorizationStatus::Authorized));
        let (relay, _service) = relay_pair(service);

        let (s, rx) = sink();
        relay.load_authorization_status(s);
        let status = rx.await.unwrap().unwrap();

        assert_eq!(status, AuthorizationStatus::Authorized);
        assert_eq!(status.as_code(), 3);
    }

    #[tokio::test]
    async fn authorization_failure_reports_access_restricted() {
        let service = ScriptedService::new();
        service.push_status(Err(ServiceError::upstream("authorization", "unreachable")));
        let (relay, _service) = relay_pair(service);

        let (s, rx) = sink();
        relay.load_authorization_status(s);
        let err = rx.await.unwrap().unwrap_err();

        assert_eq!(err, FriendsError::AccessRestricted);
        assert_eq!(err.code(), 1);
    }

    #[tokio::test]
    async fn sequential_loads_are_idempotent() {
        let list = vec![remote("a", "Ash"), remote("b", "Birch")];
        let service = ScriptedService::new();
        service.push_friends(Ok(list.clone()));
        service.push_friends(Ok(list.clone()));
        service.set_avatar("a", b"ash-avatar");
        service.set_avatar("b", b"birch-avatar");
        let (relay, _service) = relay_pair(service);

        let (s, rx) = sink();
        relay.load_friends(LoadOptions::default(), s);
        let first = rx.await.unwrap().unwrap();

        let (s, rx) = sink();
        relay.load_friends(LoadOptions::default(), s);
        let second = rx.await.unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(relay.store().snapshot(), Some(list));
    }

    #[tokio::test]
    async fn concurrent_loads_last_write_wins() {
        let list_one = vec![remote("a", "Ash"), remote("b", "Birch")];
        let list_two = vec![remote("c", "Cedar"), remote("d", "Dogwood")];

        let service = ScriptedService::new();
        let (open_one, gate_one) = oneshot::channel();
        let (open_two, gate_two) = oneshot::channel();
        service.push_friends_gated(Ok(list_one.clone()), gate_one);
        service.push_friends_gated(Ok(list_two.clone()), gate_two);
        let (relay, _service) = relay_pair(service);

        let log = Arc::new(Mutex::new(Vec::new()));
        relay.load_friends(no_avatars(), log_sink(&log));
        relay.load_friends(no_avatars(), log_sink(&log));

        // Gates are paired with the scripted lists, so whichever call drew
        // the second script finishes first; the task gated on `open_one`
        // completes last and its list must win the store.
        open_two.send(()).unwrap();
        wait_for_len(&log, 1).await;
        open_one.send(()).unwrap();
        wait_for_len(&log, 2).await;

        assert_eq!(relay.store().snapshot(), Some(list_one.clone()));

        // Each completion carried exactly one of the two lists — no mixing.
        let delivered = log.lock().unwrap();
        let ids = |players: &[Player]| -> Vec<PlayerId> {
            players.iter().map(|p| p.id.clone()).collect()
        };
        let first = ids(delivered[0].as_ref().unwrap());
        let second = ids(delivered[1].as_ref().unwrap());
        assert_eq!(first, vec![PlayerId("c".into()), PlayerId("d".into())]);
        assert_eq!(second, vec![PlayerId("a".into()), PlayerId("b".into())]);
    }

    #[tokio::test]
    async fn completions_fire_exactly_once() {
        let service = ScriptedService::new();
        service.push_friends(Ok(vec![remote("a", "Ash")]));
        service.push_recents(Err(ServiceError::upstream("recent", "timeout")));
        let (relay, _service) = relay_pair(service);

        let ok_log = Arc::new(Mutex::new(Vec::new()));
        let err_log = Arc::new(Mutex::new(Vec::new()));
        relay.load_friends(no_avatars(), log_sink(&ok_log));
        relay.load_recent_players(no_avatars(), log_sink(&err_log));

        wait_for_len(&ok_log, 1).await;
        wait_for_len(&err_log, 1).await;
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }

        assert_eq!(ok_log.lock().unwrap().len(), 1);
        assert_eq!(err_log.lock().unwrap().len(), 1);
        assert!(err_log.lock().unwrap()[0].is_err());
    }
}
