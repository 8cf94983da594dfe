use mmr_gas_analysis::collection::{count_mints_transfers, derive_collection_gas, round_ts};
use mmr_gas_analysis::table::{
    read_period_buckets, write_period_buckets, GasMeasurement, GasTable, Transfer,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

const DAY: i64 = 86_400;

/// Deterministic transfer log: a mint first, then a mix of mints,
/// transfers and burns spread over ~20 weeks
fn synthetic_log(len: usize) -> Vec<Transfer> {
    let mut state: u64 = 0x2545_f491;
    let mut next = || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        state >> 33
    };

    let mut ts = 1_650_000_000;
    let mut transfers = vec![Transfer::new(0, 1, ts)];
    for _ in 1..len {
        ts += (next() % (DAY as u64)) as i64;
        let transfer = match next() % 5 {
            0 | 1 => Transfer::new(0, 1 + next() % 100, ts),
            2 => Transfer::new(1 + next() % 100, 0, ts),
            _ => Transfer::new(1 + next() % 100, 1 + next() % 100, ts),
        };
        transfers.push(transfer);
    }
    transfers
}

fn linear_gas(size: u64) -> GasTable {
    (1..=size)
        .map(|n| (n, GasMeasurement::new(Some(50_000 + n as i64), Some(30_000 + 2 * n as i64))))
        .collect()
}

#[test]
fn test_totals_are_consistent() {
    let transfers = synthetic_log(500);
    let gas = linear_gas(1_000);

    let buckets = derive_collection_gas(&gas, &transfers, Duration::from_secs(7 * DAY as u64)).unwrap();
    let counts = count_mints_transfers(&transfers);
    let last = buckets.last().unwrap();

    // the first record is a mint with a non-zero destination
    assert_eq!(last.total_num_tokens, counts.mints);
    assert_eq!(last.total_num_transfers, counts.transfers);
    assert_eq!(buckets.iter().map(|b| b.num_tokens).sum::<u64>(), last.total_num_tokens);
    assert_eq!(buckets.iter().map(|b| b.num_transfers).sum::<u64>(), last.total_num_transfers);
    assert_eq!(buckets.iter().map(|b| b.gas_mint).sum::<i64>(), last.total_gas_mint);
    assert_eq!(buckets.iter().map(|b| b.gas_verify).sum::<i64>(), last.total_gas_verify);

    // mint gas of tokens 1..=N
    let expected_mint: i64 = (1..=last.total_num_tokens as i64).map(|n| 50_000 + n).sum();
    assert_eq!(last.total_gas_mint, expected_mint);
}

#[test]
fn test_periods_strictly_increase_and_totals_never_decrease() {
    let transfers = synthetic_log(500);
    let gas = linear_gas(1_000);
    let period = 3 * DAY;

    let buckets = derive_collection_gas(&gas, &transfers, Duration::from_secs(period as u64)).unwrap();

    for pair in buckets.windows(2) {
        assert!(pair[0].ts < pair[1].ts);
        assert_eq!((pair[1].ts - pair[0].ts) % period, 0);
        assert!(pair[0].total_num_tokens <= pair[1].total_num_tokens);
        assert!(pair[0].total_num_transfers <= pair[1].total_num_transfers);
        assert_eq!(pair[0].total_num_tokens + pair[1].num_tokens, pair[1].total_num_tokens);
    }

    assert_eq!(buckets[0].ts, round_ts(transfers[0].timestamp, period));
}

#[test]
fn test_collection_gas_round_trip() {
    let transfers = synthetic_log(200);
    let gas = linear_gas(1_000);
    let buckets = derive_collection_gas(&gas, &transfers, Duration::from_secs(DAY as u64)).unwrap();

    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("collection_gas.csv");
    write_period_buckets(&buckets, &path).unwrap();

    let header = std::fs::read_to_string(&path).unwrap().lines().next().unwrap().to_string();
    assert_eq!(
        header,
        "ts,num_tokens,num_transfers,total_num_tokens,total_num_transfers,gas_mint,gas_verify,total_gas_mint,total_gas_verify"
    );
    assert_eq!(read_period_buckets(&path).unwrap(), buckets);
}
