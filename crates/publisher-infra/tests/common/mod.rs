#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};

use publisher_core::ports::Clock;
use publisher_core::services::{
    PostCatalog, UserAccounts, VerificationConfig, VerificationNotifier,
};
use publisher_infra::{Argon2PasswordService, InMemoryMailer, InMemoryStore, RandomIdGenerator};

/// Clock that advances one second on every read.
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

pub struct Harness {
    pub store: InMemoryStore,
    pub mailer: InMemoryMailer,
    pub accounts: UserAccounts,
    pub posts: PostCatalog,
}

pub fn harness() -> Harness {
    let store = InMemoryStore::new();
    let mailer = InMemoryMailer::new();
    let clock = Arc::new(SteppingClock::new());
    let ids = Arc::new(RandomIdGenerator);
    let users = Arc::new(store.users());

    let notifier = VerificationNotifier::new(
        Arc::new(mailer.clone()),
        VerificationConfig::default(),
    );
    let accounts = UserAccounts::new(
        users.clone(),
        Arc::new(Argon2PasswordService::with_params(8, 1, 1).unwrap()),
        clock.clone(),
        ids.clone(),
        notifier,
    );
    let posts = PostCatalog::new(Arc::new(store.posts()), users, clock, ids);

    Harness {
        store,
        mailer,
        accounts,
        posts,
    }
}
