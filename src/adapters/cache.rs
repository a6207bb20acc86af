use crate::domain::model::Species;
use crate::domain::ports::{Clock, SpeciesSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

type CacheKey = (u64, usize, Vec<u32>);

/// Time-bounded memoization of species fetches, keyed by
/// (place, count, months). Place lookups are cheap and pass straight
/// through; only the species query is cached.
pub struct CachedSpeciesSource<S: SpeciesSource, C: Clock> {
    inner: S,
    clock: C,
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, (Instant, Vec<Species>)>>,
}

impl<S: SpeciesSource, C: Clock> CachedSpeciesSource<S, C> {
    pub fn new(inner: S, clock: C, ttl: Duration) -> Self {
        Self {
            inner,
            clock,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, key: &CacheKey) -> Option<Vec<Species>> {
        let now = self.clock.now();
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).and_then(|(stored_at, species)| {
            if now.duration_since(*stored_at) < self.ttl {
                Some(species.clone())
            } else {
                None
            }
        })
    }

    fn store(&self, key: CacheKey, species: Vec<Species>) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, (now, species));
    }
}

#[async_trait]
impl<S: SpeciesSource, C: Clock> SpeciesSource for CachedSpeciesSource<S, C> {
    async fn lookup_place(&self, query: &str) -> Result<Option<u64>> {
        self.inner.lookup_place(query).await
    }

    async fn top_species(
        &self,
        place_id: u64,
        top_n: usize,
        months: &[u32],
    ) -> Result<Vec<Species>> {
        let key = (place_id, top_n, months.to_vec());

        if let Some(hit) = self.cached(&key) {
            tracing::debug!("species cache hit for place {}", place_id);
            return Ok(hit);
        }

        let fresh = self.inner.top_species(place_id, top_n, months).await?;

        // An empty pool means "unable to fetch"; pinning that for the whole
        // TTL would mask recovery, so only real results are stored.
        if !fresh.is_empty() {
            self.store(key, fresh.clone());
        }

        Ok(fresh)
    }
}
