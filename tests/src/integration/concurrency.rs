//! # Concurrent Readers
//!
//! A built filter is immutable, so many threads may query it at once with no
//! coordination. Builders stay single-owner; parallel population means one
//! builder per thread.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use gcs_filters::{GcsBuilder, GcsFilter};

    use crate::integration::init_test_logging;

    const KEY: [u8; 16] = [0x5a; 16];
    const READERS: usize = 8;

    fn members() -> Vec<Vec<u8>> {
        (0..1_000u32).map(|i| format!("member-{}", i).into_bytes()).collect()
    }

    #[test]
    fn test_filter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GcsFilter>();
    }

    #[test]
    fn test_parallel_readers_agree() {
        init_test_logging();

        let members = Arc::new(members());
        let filter = Arc::new(
            GcsBuilder::with_key(KEY)
                .add_entries(members.iter())
                .build()
                .unwrap(),
        );

        let handles: Vec<_> = (0..READERS)
            .map(|reader| {
                let filter = Arc::clone(&filter);
                let members = Arc::clone(&members);
                thread::spawn(move || {
                    members
                        .iter()
                        .skip(reader)
                        .step_by(READERS)
                        .all(|m| filter.matches(&KEY, m).unwrap())
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn test_sharded_builders_cover_all_entries() {
        let members = members();

        // One builder per shard, each owned by its own thread
        let filters: Vec<GcsFilter> = thread::scope(|scope| {
            let handles: Vec<_> = members
                .chunks(250)
                .map(|shard| {
                    scope.spawn(move || {
                        GcsBuilder::with_key(KEY)
                            .add_entries(shard)
                            .build()
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(filters.len(), 4);
        for member in &members {
            let found = filters
                .iter()
                .any(|f| f.matches(&KEY, member).unwrap());
            assert!(found, "member {:?} missing", member);
        }
    }
}
