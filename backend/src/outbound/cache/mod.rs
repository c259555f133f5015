//! Short-lived menu cache.
//!
//! Wraps another [`MenuSource`] and serves a successful menu for up to the
//! configured TTL. Failures are never cached, so every error reaches the
//! backend again on the next request.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{MenuSource, MenuSourceError};
use crate::domain::{MenuResult, QrToken};

struct CachedMenu {
    fetched_at: DateTime<Utc>,
    menu: MenuResult,
}

/// Time-bounded cache in front of a menu source.
pub struct CachedMenuSource {
    inner: Arc<dyn MenuSource>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    entries: Mutex<HashMap<String, CachedMenu>>,
}

impl CachedMenuSource {
    /// Cache menus from `inner` for `ttl`.
    ///
    /// A TTL too large for `chrono` is clamped to its maximum.
    pub fn new(inner: Arc<dyn MenuSource>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Self {
            inner,
            clock,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn is_fresh(&self, entry: &CachedMenu, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.fetched_at) < self.ttl
    }
}

#[async_trait]
impl MenuSource for CachedMenuSource {
    async fn fetch_menu(&self, token: &QrToken) -> Result<MenuResult, MenuSourceError> {
        let now = self.clock.utc();
        {
            let entries = self.entries.lock().await;
            if let Some(entry) = entries.get(token.as_str()) {
                if self.is_fresh(entry, now) {
                    debug!(token = %token.log_prefix(), "menu served from cache");
                    return Ok(entry.menu.clone());
                }
            }
        }

        let menu = self.inner.fetch_menu(token).await?;
        let fetched_at = self.clock.utc();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| self.is_fresh(entry, fetched_at));
        entries.insert(
            token.as_str().to_owned(),
            CachedMenu {
                fetched_at,
                menu: menu.clone(),
            },
        );
        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockMenuSource;
    use crate::domain::{Branch, ErrorCode};
    use chrono::{Local, TimeZone};
    use rstest::rstest;
    use std::sync::Mutex as StdMutex;

    struct SteppingClock(StdMutex<DateTime<Utc>>);

    impl SteppingClock {
        fn at(seconds: i64) -> Self {
            let start = Utc.timestamp_opt(seconds, 0).single().expect("valid timestamp");
            Self(StdMutex::new(start))
        }

        fn advance(&self, seconds: i64) {
            let mut now = self.0.lock().expect("clock lock");
            *now += chrono::Duration::seconds(seconds);
        }
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    fn menu(name: &str) -> MenuResult {
        MenuResult {
            branch: Branch {
                id: "b-1".to_owned(),
                name: name.to_owned(),
                address: None,
            },
            wines: Vec::new(),
        }
    }

    fn token(raw: &str) -> QrToken {
        QrToken::new(raw).expect("valid token")
    }

    #[rstest]
    #[tokio::test]
    async fn serves_cached_menu_within_ttl_and_refetches_after() {
        let mut inner = MockMenuSource::new();
        let mut names = vec!["second", "first"];
        inner
            .expect_fetch_menu()
            .times(2)
            .returning(move |_| Ok(menu(names.pop().expect("two fetches"))));
        let clock = Arc::new(SteppingClock::at(1_700_000_000));
        let cache = CachedMenuSource::new(Arc::new(inner), clock.clone(), Duration::from_secs(30));

        let first = cache.fetch_menu(&token("abc123")).await.expect("fetch");
        clock.advance(29);
        let cached = cache.fetch_menu(&token("abc123")).await.expect("cached");
        clock.advance(1);
        let refreshed = cache.fetch_menu(&token("abc123")).await.expect("refetch");

        assert_eq!(first.branch.name, "first");
        assert_eq!(cached.branch.name, "first");
        assert_eq!(refreshed.branch.name, "second");
    }

    #[rstest]
    #[tokio::test]
    async fn failures_are_not_cached() {
        let mut inner = MockMenuSource::new();
        let mut results = vec![
            Ok(menu("recovered")),
            Err(MenuSourceError::rejected(ErrorCode::RateLimited)),
        ];
        inner
            .expect_fetch_menu()
            .times(2)
            .returning(move |_| results.pop().expect("two fetches"));
        let cache = CachedMenuSource::new(
            Arc::new(inner),
            Arc::new(SteppingClock::at(0)),
            Duration::from_secs(30),
        );

        let err = cache.fetch_menu(&token("abc123")).await.expect_err("rate limited");
        assert_eq!(err.code(), ErrorCode::RateLimited);
        let menu = cache.fetch_menu(&token("abc123")).await.expect("retry reaches backend");
        assert_eq!(menu.branch.name, "recovered");
    }

    #[rstest]
    #[tokio::test]
    async fn tokens_are_cached_independently() {
        let mut inner = MockMenuSource::new();
        inner
            .expect_fetch_menu()
            .times(2)
            .returning(|token| Ok(menu(token.as_str())));
        let cache = CachedMenuSource::new(
            Arc::new(inner),
            Arc::new(SteppingClock::at(0)),
            Duration::from_secs(30),
        );

        let a = cache.fetch_menu(&token("token-a")).await.expect("a");
        let b = cache.fetch_menu(&token("token-b")).await.expect("b");
        assert_eq!(a.branch.name, "token-a");
        assert_eq!(b.branch.name, "token-b");
    }
}
