use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Operation counters incremented by the HTTP handlers.
///
/// Append-only and safe under uncoordinated concurrent increment; values
/// carry no ordering guarantee relative to request completion.
#[derive(Debug, Default)]
pub struct OperationCounters {
    users_registered: AtomicU64,
    tokens_issued: AtomicU64,
    users_deleted: AtomicU64,
}

impl OperationCounters {
    pub fn record_user_registered(&self) {
        self.users_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_token_issued(&self) {
        self.tokens_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_user_deleted(&self) {
        self.users_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn users_registered(&self) -> u64 {
        self.users_registered.load(Ordering::Relaxed)
    }

    pub fn tokens_issued(&self) -> u64 {
        self.tokens_issued.load(Ordering::Relaxed)
    }

    pub fn users_deleted(&self) -> u64 {
        self.users_deleted.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let counters = OperationCounters::default();
        assert_eq!(counters.users_registered(), 0);
        assert_eq!(counters.tokens_issued(), 0);
        assert_eq!(counters.users_deleted(), 0);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let counters = Arc::new(OperationCounters::default());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counters = Arc::clone(&counters);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        counters.record_token_issued();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counters.tokens_issued(), 800);
    }
}
