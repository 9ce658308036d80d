use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridseek_core::Coord;

/// Heap entry ordered by `(priority, seq)`. The coordinate is payload only.
#[derive(Clone, Copy, Debug)]
struct Entry {
    priority: f64,
    seq: u64,
    coord: Coord,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest priority first, and
        // the earliest insertion among equal priorities.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of cells awaiting expansion (the open list).
///
/// Priorities are not keys: any number of entries may share a priority or a
/// coordinate. Equal priorities pop in insertion order. There is no
/// decrease-key; a better entry is simply pushed and the outdated one is
/// discarded by the caller when it surfaces.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Insert `coord` with the given priority.
    pub fn push(&mut self, priority: f64, coord: Coord) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            coord,
        });
    }

    /// Remove and return the lowest-priority entry.
    pub fn pop_min(&mut self) -> Option<(f64, Coord)> {
        self.heap.pop().map(|e| (e.priority, e.coord))
    }

    /// The lowest-priority entry, without removing it.
    pub fn peek_min(&self) -> Option<(f64, Coord)> {
        self.heap.peek().map(|e| (e.priority, e.coord))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(f: &mut Frontier) -> Vec<(f64, Coord)> {
        std::iter::from_fn(|| f.pop_min()).collect()
    }

    #[test]
    fn pops_in_priority_order() {
        let mut f = Frontier::new();
        f.push(3.0, Coord::new(0, 3));
        f.push(1.0, Coord::new(0, 1));
        f.push(2.5, Coord::new(0, 2));
        let order: Vec<_> = drain(&mut f).into_iter().map(|(_, c)| c.col).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!(f.is_empty());
    }

    #[test]
    fn equal_priorities_do_not_collide() {
        let mut f = Frontier::new();
        for col in 0..5 {
            f.push(4.0, Coord::new(0, col));
        }
        assert_eq!(f.len(), 5);
        let order: Vec<_> = drain(&mut f).into_iter().map(|(_, c)| c.col).collect();
        // FIFO among ties.
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn duplicate_coordinates_coexist() {
        let mut f = Frontier::new();
        let c = Coord::new(2, 2);
        f.push(5.0, c);
        f.push(3.0, c);
        assert_eq!(f.pop_min(), Some((3.0, c)));
        assert_eq!(f.pop_min(), Some((5.0, c)));
        assert_eq!(f.pop_min(), None);
    }

    #[test]
    fn ties_after_interleaving_stay_fifo() {
        let mut f = Frontier::new();
        f.push(1.0, Coord::new(0, 0));
        f.push(2.0, Coord::new(1, 0));
        assert_eq!(f.pop_min(), Some((1.0, Coord::new(0, 0))));
        f.push(2.0, Coord::new(2, 0));
        f.push(0.5, Coord::new(3, 0));
        assert_eq!(f.peek_min(), Some((0.5, Coord::new(3, 0))));
        let order: Vec<_> = drain(&mut f).into_iter().map(|(_, c)| c.row).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn zero_and_negative_zero_priorities() {
        let mut f = Frontier::new();
        f.push(0.0, Coord::new(0, 0));
        f.push(-0.0, Coord::new(0, 1));
        f.push(f64::INFINITY, Coord::new(0, 2));
        // total_cmp orders -0.0 before 0.0.
        let order: Vec<_> = drain(&mut f).into_iter().map(|(_, c)| c.col).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }
}
