//! Round-robin assignment of inputs to workers.
//!
//! Input `i` belongs to worker `i % W`, at local position `i / W`. The inverse,
//! [`Partition::global_index`], is what lets results finishing in any order
//! land back in input order.

/// How `total` inputs are spread over workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    total: usize,
    workers: usize,
}

impl Partition {
    /// Spread `total` inputs over at most `concurrency` workers.
    ///
    /// Never plans more workers than inputs: 7 inputs at concurrency 20 use
    /// 7 workers, and an empty batch uses none.
    pub fn new(total: usize, concurrency: usize) -> Self {
        Self {
            total,
            workers: concurrency.min(total),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of workers to spawn.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// How many inputs `worker` processes.
    pub fn assigned(&self, worker: usize) -> usize {
        if worker >= self.workers {
            return 0;
        }
        (self.total - worker).div_ceil(self.workers)
    }

    /// Original index of the item at local `position` within `worker`.
    pub fn global_index(&self, worker: usize, position: usize) -> usize {
        worker + position * self.workers
    }

    /// Original indices handled by `worker`, ascending.
    pub fn indices(&self, worker: usize) -> impl Iterator<Item = usize> + use<> {
        let partition = *self;
        (0..self.assigned(worker)).map(move |position| partition.global_index(worker, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_count_is_capped_by_inputs() {
        assert_eq!(Partition::new(50, 20).workers(), 20);
        assert_eq!(Partition::new(7, 20).workers(), 7);
        assert_eq!(Partition::new(2, 10).workers(), 2);
        assert_eq!(Partition::new(0, 10).workers(), 0);
    }

    #[test]
    fn every_index_is_assigned_exactly_once() {
        for (total, concurrency) in [(1, 1), (10, 3), (50, 20), (7, 20), (13, 4)] {
            let partition = Partition::new(total, concurrency);
            let mut seen: Vec<usize> = (0..partition.workers())
                .flat_map(|worker| partition.indices(worker))
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..total).collect::<Vec<_>>(), "total={total} concurrency={concurrency}");
        }
    }

    #[test]
    fn global_index_inverts_round_robin() {
        let partition = Partition::new(10, 3);
        assert_eq!(partition.indices(0).collect::<Vec<_>>(), vec![0, 3, 6, 9]);
        assert_eq!(partition.indices(1).collect::<Vec<_>>(), vec![1, 4, 7]);
        assert_eq!(partition.indices(2).collect::<Vec<_>>(), vec![2, 5, 8]);
        for i in 0..10 {
            assert_eq!(partition.global_index(i % 3, i / 3), i);
        }
    }

    #[test]
    fn workers_beyond_plan_get_nothing() {
        let partition = Partition::new(3, 10);
        assert_eq!(partition.assigned(3), 0);
        assert_eq!(partition.indices(5).count(), 0);
    }
}
