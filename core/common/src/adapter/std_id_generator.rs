//! QaId を生成する IdGenerator の標準実装（Clock + インスタンス内シーケンス）
//!
//! 形式: base62(0-9,A-Z,a-z) 11文字。値 = (ms since 2020-01-01)<<8 | seq(0..255)。辞書順＝数値順。
//! 62^11 > u64::MAX なので、どの u64 値も 11 文字に収まる。

use crate::domain::QaId;
use crate::ports::outbound::{Clock, IdGenerator};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const EPOCH_MS: u64 = 1577836800000; // 2020-01-01 00:00:00 UTC
const SEQ_BITS: u64 = 8;
const BASE: u64 = 62;
const WIDTH: usize = 11;

/// 0-9, A-Z, a-z の順で辞書順＝数値順になるbase62
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Clock + シーケンスで QaId を生成する標準実装
///
/// 同一 ms 内ではシーケンスを進め、時計が戻っても直前の値より小さい ID は返さない。
pub struct StdIdGenerator {
    clock: Arc<dyn Clock>,
    last: AtomicU64,
}

impl StdIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for StdIdGenerator {
    fn next_id(&self) -> QaId {
        let ms_rel = self.clock.now_ms().saturating_sub(EPOCH_MS);
        let base = ms_rel.saturating_mul(1 << SEQ_BITS);

        loop {
            let prev = self.last.load(Ordering::SeqCst);
            // seq が枯渇しても次の ms 枠へ繰り上げるだけなので単調増加は保たれる
            // u64::MAX に達したら同じ値を返す（衝突は呼び出し側で解消する）
            let next = if base > prev { base } else { prev.saturating_add(1) };
            if self
                .last
                .compare_exchange(prev, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return QaId::new(to_base62(next));
            }
        }
    }
}

fn to_base62(mut n: u64) -> String {
    let mut buf = [0u8; WIDTH];
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }
    buf.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_ms(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_ids_are_fixed_width_base62() {
        let gen = StdIdGenerator::new(Arc::new(FixedClock(1_760_000_000_000)));
        let id = gen.next_id();
        assert_eq!(id.as_str().len(), 11);
        assert!(id.as_str().bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_same_millisecond_ids_are_unique_and_ordered() {
        let gen = StdIdGenerator::new(Arc::new(FixedClock(1_760_000_000_000)));
        let ids: Vec<QaId> = (0..600).map(|_| gen.next_id()).collect();
        let unique: HashSet<&QaId> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_clock_going_backwards_keeps_order() {
        let gen = StdIdGenerator::new(Arc::new(FixedClock(1_760_000_000_000)));
        let first = gen.next_id();
        let gen_rewound = StdIdGenerator {
            clock: Arc::new(FixedClock(1_600_000_000_000)),
            last: AtomicU64::new(gen.last.load(Ordering::SeqCst)),
        };
        let second = gen_rewound.next_id();
        assert!(first < second);
    }

    #[test]
    fn test_far_future_clock_still_gives_distinct_ids() {
        // 2048-01-01: 旧 8 文字形式では上限に張り付いていた時刻
        let gen = StdIdGenerator::new(Arc::new(FixedClock(2_461_449_600_000)));
        let ids: Vec<QaId> = (0..300).map(|_| gen.next_id()).collect();
        let unique: HashSet<&QaId> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(ids.iter().all(|id| id.as_str().len() == 11));

        // 3000-01-01
        let far = StdIdGenerator::new(Arc::new(FixedClock(32_503_680_000_000)));
        let a = far.next_id();
        let b = far.next_id();
        assert!(a < b);
    }

    #[test]
    fn test_to_base62_is_zero_padded() {
        assert_eq!(to_base62(0), "00000000000");
        assert_eq!(to_base62(61), "0000000000z");
        assert_eq!(to_base62(62), "00000000010");
        assert_eq!(to_base62(u64::MAX), "LygHa16AHYF");
    }
}
