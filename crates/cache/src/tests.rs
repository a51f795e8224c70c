use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::{error::Error, ScopedCache};

#[test]
fn test_insert_and_get() {
    let cache: ScopedCache<u64, String, String> = ScopedCache::new();
    cache.insert(1, "key".to_string(), "value".to_string()).expect("failed to insert");

    let value = cache.get(&1, &"key".to_string()).expect("failed to read");
    assert_eq!(value.as_deref(), Some(&"value".to_string()));
    assert_eq!(cache.scope().expect("failed to read scope"), Some(1));
}

#[test]
fn test_insert_under_new_scope_drops_previous_entries() {
    let cache: ScopedCache<u64, &str, u8> = ScopedCache::new();
    cache.insert(1, "a", 1).expect("failed to insert");
    cache.insert(1, "b", 2).expect("failed to insert");
    assert_eq!(cache.len().expect("failed to read"), 2);

    cache.insert(3, "c", 3).expect("failed to insert");
    assert_eq!(cache.keys().expect("failed to read"), vec!["c"]);
    assert!(cache.get(&1, &"a").expect("failed to read").is_none());
}

#[test]
fn test_set_scope_same_scope_keeps_entries() {
    let cache: ScopedCache<u64, &str, u8> = ScopedCache::new();
    cache.insert(1, "a", 1).expect("failed to insert");

    assert!(!cache.set_scope(1).expect("failed to set scope"));
    assert_eq!(cache.len().expect("failed to read"), 1);
}

#[test]
fn test_invalidate() {
    let cache: ScopedCache<u64, &str, u8> = ScopedCache::new();
    cache.insert(1, "a", 1).expect("failed to insert");
    cache.invalidate().expect("failed to invalidate");

    assert!(cache.is_empty().expect("failed to read"));
    assert_eq!(cache.scope().expect("failed to read scope"), None);
}

#[test]
fn test_remove() {
    let cache: ScopedCache<u64, &str, u8> = ScopedCache::new();
    cache.insert(1, "a", 1).expect("failed to insert");

    assert!(cache.remove(&"a").expect("failed to remove"));
    assert!(!cache.remove(&"a").expect("failed to remove"));
}

#[derive(Debug)]
enum BuildError {
    Cache,
    Failed,
}

impl From<Error> for BuildError {
    fn from(_: Error) -> Self {
        BuildError::Cache
    }
}

#[test]
fn test_failed_build_is_not_cached() {
    let cache: ScopedCache<u64, &str, u8> = ScopedCache::new();

    let result = cache.get_or_try_insert_with(&1, &"a", || Err(BuildError::Failed));
    assert!(matches!(result, Err(BuildError::Failed)));
    assert!(cache.is_empty().expect("failed to read"));

    let value = cache.get_or_try_insert_with(&1, &"a", || Ok::<_, Error>(5)).expect("!");
    assert_eq!(*value, 5);
}

#[test]
fn test_builds_once_per_key() {
    let cache: ScopedCache<u64, &str, usize> = ScopedCache::new();
    let builds = AtomicUsize::new(0);

    for _ in 0..5 {
        let value = cache
            .get_or_try_insert_with(&1, &"a", || {
                Ok::<_, Error>(builds.fetch_add(1, Ordering::SeqCst) + 100)
            })
            .expect("!");
        assert_eq!(*value, 100);
    }

    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_readers_see_complete_values() {
    let cache: Arc<ScopedCache<u64, &str, Vec<u64>>> = Arc::new(ScopedCache::new());

    std::thread::scope(|s| {
        for i in 0..8u64 {
            let cache = cache.clone();
            s.spawn(move || {
                let value = cache
                    .get_or_try_insert_with(&1, &"catalog", || Ok::<_, Error>(vec![i; 64]))
                    .expect("!");

                // whichever build won, it is never half-written
                assert_eq!(value.len(), 64);
                assert!(value.iter().all(|v| *v == value[0]));
            });
        }
    });

    assert_eq!(cache.len().expect("failed to read"), 1);
}
