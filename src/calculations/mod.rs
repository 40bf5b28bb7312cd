pub mod capacity;
pub mod forecast;
pub mod kpi;
pub mod utilization;

use std::collections::HashMap;
use std::hash::Hash;

/// Round to the nearest integer with halves going up.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Index a slice by id. The first record wins when ids repeat.
pub(crate) fn index_by<T, K, F>(items: &[T], key: F) -> HashMap<K, &T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        map.entry(key(item)).or_insert(item);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::round_half_up;

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(49.5), 50);
        assert_eq!(round_half_up(49.49), 49);
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(112.5), 113);
    }
}
