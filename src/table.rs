//! 실험 관측값을 누적하는 표. 행 순서는 입력 순서를 그대로 유지하고,
//! 이미 본 키는 집합으로 관리해 중복 삽입을 O(1)로 거른다.

use std::collections::HashSet;
use std::hash::Hash;

/// 표에 들어갈 수 있는 한 행. 같은 키의 행은 한 번만 기록된다.
pub trait Observation {
    type Key: Copy + Eq + Hash;

    fn key(&self) -> Self::Key;
}

/// 강한 타입의 관측 표.
#[derive(Debug, Clone)]
pub struct ObservationTable<R: Observation> {
    rows: Vec<R>,
    seen: HashSet<R::Key>,
}

impl<R: Observation> Default for ObservationTable<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<R: Observation> ObservationTable<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 행을 추가한다. 같은 키가 이미 있으면 아무 것도 하지 않고 `false`를 반환한다.
    pub fn insert(&mut self, row: R) -> bool {
        if !self.seen.insert(row.key()) {
            return false;
        }
        self.rows.push(row);
        true
    }

    pub fn contains_key(&self, key: &R::Key) -> bool {
        self.seen.contains(key)
    }

    /// 입력 순서대로의 행 목록.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.seen.clear();
    }
}

impl<R: Observation + Clone> ObservationTable<R> {
    /// 주어진 기준으로 정렬한 사본. 원본의 입력 순서는 건드리지 않는다.
    pub fn sorted_by<F>(&self, mut sort_key: F) -> Vec<R>
    where
        F: FnMut(&R) -> f64,
    {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Reading {
        id: u32,
        value: f64,
    }

    impl Observation for Reading {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }
    }

    #[test]
    fn duplicate_keys_are_ignored() {
        let mut table = ObservationTable::new();
        assert!(table.insert(Reading { id: 1, value: 1.0 }));
        assert!(table.insert(Reading { id: 2, value: 2.0 }));
        assert!(!table.insert(Reading { id: 1, value: 9.0 }));
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].value, 1.0);
    }

    #[test]
    fn sorted_copy_keeps_insertion_order() {
        let mut table = ObservationTable::new();
        table.insert(Reading { id: 3, value: 3.0 });
        table.insert(Reading { id: 1, value: 1.0 });
        let sorted = table.sorted_by(|r| r.value);
        assert_eq!(sorted[0].id, 1);
        assert_eq!(table.rows()[0].id, 3);
    }

    #[test]
    fn clear_forgets_seen_keys() {
        let mut table = ObservationTable::new();
        table.insert(Reading { id: 1, value: 1.0 });
        table.clear();
        assert!(table.is_empty());
        assert!(!table.contains_key(&1));
        assert!(table.insert(Reading { id: 1, value: 1.0 }));
    }
}
