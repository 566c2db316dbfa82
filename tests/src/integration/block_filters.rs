//! # Block Filter Flow
//!
//! Tests the full life of a per-block filter:
//!
//! 1. **Assemble**: the server keys a builder with the block hash and adds
//!    the block's spent outpoints and output scripts
//! 2. **Commit**: each filter's hash is chained into a header
//! 3. **Transmit**: only `n_bytes()` travels; `p` is a protocol constant
//! 4. **Verify**: the client recomputes headers before trusting a filter
//! 5. **Query**: the client scans its watch list with `match_any`

#[cfg(test)]
mod tests {
    use gcs_filters::domain::double_sha256;
    use gcs_filters::{
        filter_hash, make_header, GcsBuilder, GcsError, GcsFilter, Hash, OutPoint, DEFAULT_P,
        KEY_SIZE,
    };
    use tracing::info;

    use crate::integration::init_test_logging;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const BLOCK_COUNT: u32 = 10;
    const OUTPOINTS_PER_BLOCK: u32 = 4;
    const SCRIPTS_PER_BLOCK: u32 = 6;

    struct TestBlock {
        hash: Hash,
        spent: Vec<OutPoint>,
        scripts: Vec<Vec<u8>>,
    }

    struct ServedFilter {
        block_hash: Hash,
        wire: Vec<u8>,
        header: Hash,
    }

    fn script(height: u32, i: u32) -> Vec<u8> {
        // P2SH-shaped: OP_HASH160 <20 bytes> OP_EQUAL
        let mut script = vec![0xa9, 0x14];
        script.extend_from_slice(&double_sha256(format!("script-{}-{}", height, i).as_bytes())[..20]);
        script.push(0x87);
        script
    }

    fn spent_outpoint(height: u32, i: u32) -> OutPoint {
        OutPoint::new(double_sha256(format!("tx-{}-{}", height, i).as_bytes()), i)
    }

    fn make_block(height: u32) -> TestBlock {
        TestBlock {
            hash: double_sha256(&height.to_le_bytes()),
            spent: (0..OUTPOINTS_PER_BLOCK).map(|i| spent_outpoint(height, i)).collect(),
            scripts: (0..SCRIPTS_PER_BLOCK).map(|i| script(height, i)).collect(),
        }
    }

    fn assemble(block: &TestBlock) -> GcsFilter {
        let mut builder = GcsBuilder::with_key_hash(&block.hash);
        for outpoint in &block.spent {
            builder.add_outpoint(outpoint);
        }
        builder.add_entries(&block.scripts);
        builder.build().expect("block filter builds")
    }

    fn serve_chain() -> Vec<ServedFilter> {
        let mut prev_header = [0u8; 32];
        (0..BLOCK_COUNT)
            .map(|height| {
                let block = make_block(height);
                let filter = assemble(&block);
                let header = make_header(&filter, &prev_header);
                prev_header = header;
                ServedFilter {
                    block_hash: block.hash,
                    wire: filter.n_bytes(),
                    header,
                }
            })
            .collect()
    }

    fn client_key(block_hash: &Hash) -> [u8; KEY_SIZE] {
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&block_hash[..KEY_SIZE]);
        key
    }

    /// Verify the whole chain, returning the decoded filters
    fn verify_chain(served: &[ServedFilter]) -> Result<Vec<GcsFilter>, String> {
        let mut prev_header = [0u8; 32];
        let mut filters = Vec::with_capacity(served.len());

        for (height, item) in served.iter().enumerate() {
            let filter = GcsFilter::from_n_bytes(DEFAULT_P, &item.wire).map_err(|e| e.to_string())?;
            let header = make_header(&filter, &prev_header);
            if header != item.header {
                return Err(format!("header mismatch at height {}", height));
            }
            prev_header = header;
            filters.push(filter);
        }

        Ok(filters)
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_client_finds_watched_script() {
        init_test_logging();

        let served = serve_chain();
        let filters = verify_chain(&served).expect("chain verifies");

        let watched = vec![script(3, 2), b"some unrelated script".to_vec()];
        let hits: Vec<usize> = filters
            .iter()
            .zip(&served)
            .enumerate()
            .filter(|(_, (filter, item))| {
                filter
                    .match_any(&client_key(&item.block_hash), &watched)
                    .expect("filter decodes")
            })
            .map(|(height, _)| height)
            .collect();

        info!(?hits, "watched script scan");
        assert_eq!(hits, vec![3]);
    }

    #[test]
    fn test_client_finds_spent_outpoint() {
        init_test_logging();

        let served = serve_chain();
        let filters = verify_chain(&served).expect("chain verifies");

        let target = spent_outpoint(7, 1).to_bytes();
        let item = &served[7];
        assert!(filters[7]
            .matches(&client_key(&item.block_hash), &target)
            .unwrap());
        assert_eq!(
            filters[7].n(),
            OUTPOINTS_PER_BLOCK + SCRIPTS_PER_BLOCK
        );
    }

    #[test]
    fn test_filter_hash_matches_wire_bytes() {
        let block = make_block(0);
        let filter = assemble(&block);
        assert_eq!(filter_hash(&filter), double_sha256(&filter.n_bytes()));
    }

    #[test]
    fn test_tampered_filter_fails_header_check() {
        init_test_logging();

        let mut served = serve_chain();
        let last = served[5].wire.len() - 1;
        served[5].wire[last] ^= 0x01;

        let result = verify_chain(&served);
        assert_eq!(result.err(), Some("header mismatch at height 5".to_string()));
    }

    #[test]
    fn test_truncated_download_surfaces_error() {
        init_test_logging();

        let served = serve_chain();
        let wire = &served[2].wire;
        let truncated = GcsFilter::from_n_bytes(DEFAULT_P, &wire[..wire.len() / 2]).unwrap();

        assert!(matches!(
            truncated.decode_values(),
            Err(GcsError::MalformedBitstream(_))
        ));
    }

    #[test]
    fn test_empty_download_is_invalid() {
        assert!(matches!(
            GcsFilter::from_n_bytes(DEFAULT_P, &[]),
            Err(GcsError::InvalidVarInt(_))
        ));
    }

    #[test]
    fn test_wrong_key_does_not_find_entries() {
        let served = serve_chain();
        let filters = verify_chain(&served).expect("chain verifies");

        // Keyed with block 4's hash, queried with block 5's key
        let wrong_key = client_key(&served[5].block_hash);
        let scripts: Vec<Vec<u8>> = (0..SCRIPTS_PER_BLOCK).map(|i| script(4, i)).collect();
        assert!(!filters[4].match_any(&wrong_key, &scripts).unwrap());
    }
}
