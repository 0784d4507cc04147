//! Note ID generation.
//!
//! # Responsibility
//! - Issue opaque note ids that are unique for the lifetime of a store.
//!
//! # Invariants
//! - Ids compose a wall-clock time component with a random suffix, both
//!   rendered in lowercase base-36.
//! - The time component never decreases within one process, even if the
//!   system clock steps backwards.
//! - Collision is treated as a defect, not a handled case; there is no
//!   retry path.

use crate::model::note::NoteId;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static LAST_TIME_COMPONENT: AtomicU64 = AtomicU64::new(0);

/// Generates one note id: base-36 millis followed by 64 random bits in
/// base-36.
pub fn generate_note_id() -> NoteId {
    // The low half of a v4 UUID carries enough of its 122 random bits.
    let (_, entropy) = Uuid::new_v4().as_u64_pair();

    let mut id = encode_base36(u128::from(monotonic_millis()));
    id.push_str(&encode_base36(u128::from(entropy)));
    id
}

/// Current epoch milliseconds, clamped so repeated calls never decrease.
fn monotonic_millis() -> u64 {
    let now = Utc::now().timestamp_millis().max(0) as u64;
    let previous = LAST_TIME_COMPONENT.fetch_max(now, Ordering::Relaxed);
    now.max(previous)
}

fn encode_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::{encode_base36, generate_note_id, monotonic_millis};
    use std::collections::HashSet;

    #[test]
    fn encode_base36_matches_known_values() {
        assert_eq!(encode_base36(0), "0");
        assert_eq!(encode_base36(35), "z");
        assert_eq!(encode_base36(36), "10");
        assert_eq!(encode_base36(1_234_567_890), "kf12oi");
    }

    #[test]
    fn generated_ids_are_unique_and_base36() {
        let ids: HashSet<String> = (0..1_000).map(|_| generate_note_id()).collect();
        assert_eq!(ids.len(), 1_000);
        for id in &ids {
            assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn time_component_never_decreases() {
        let mut previous = monotonic_millis();
        for _ in 0..100 {
            let current = monotonic_millis();
            assert!(current >= previous);
            previous = current;
        }
    }
}
