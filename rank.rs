use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use itertools::Itertools;

use crate::arena::{RecordArena, RecordId};

/// One ranking candidate.
///
/// Ordered by frequency; equal frequencies fall back to allocation order
/// (earlier-seen compares greater) so the order is total, but callers
/// must not rely on any particular placement between ties.
#[derive(PartialEq, Eq)]
struct Candidate {
    frequency: u32,
    id: RecordId,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Candidate) -> Ordering {
        self.frequency
            .cmp(&other.frequency)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Candidate) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Select the `n` most frequent records, most frequent first.
///
/// Walks every arena block once, keeping a min-heap of at most `n`
/// candidates, so the full record set is never sorted. Returns fewer
/// than `n` entries when the arena holds fewer records, and nothing when
/// `n` is zero.
pub fn top_n(arena: &RecordArena, n: usize) -> Vec<RecordId> {
    if n == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Candidate>> = BinaryHeap::with_capacity(n + 1);
    for (id, record) in arena.iter() {
        let candidate = Candidate { frequency: record.frequency, id };
        if heap.len() < n {
            heap.push(Reverse(candidate));
        } else if let Some(mut weakest) = heap.peek_mut() {
            if candidate > weakest.0 {
                *weakest = Reverse(candidate);
            }
        }
    }

    heap.into_iter()
        .map(|Reverse(candidate)| candidate)
        .sorted_unstable_by(|a, b| b.cmp(a))
        .map(|candidate| candidate.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{BLOCK_CAPACITY, WordRecord};
    use crate::buffer::Span;

    fn arena_with_frequencies(frequencies: &[u32]) -> (RecordArena, Vec<RecordId>) {
        let mut arena = RecordArena::new();
        let ids = frequencies
            .iter()
            .enumerate()
            .map(|(start, &frequency)| {
                arena
                    .allocate(WordRecord {
                        span: Span { start, len: 1 },
                        frequency,
                        slot: 0,
                        next: None,
                    })
                    .unwrap()
            })
            .collect();
        (arena, ids)
    }

    fn frequencies_of(arena: &RecordArena, ranked: &[RecordId]) -> Vec<u32> {
        ranked.iter().map(|&id| arena.get(id).frequency).collect()
    }

    #[test]
    fn ranks_by_descending_frequency() {
        let (arena, ids) = arena_with_frequencies(&[2, 7, 1, 5, 3]);
        let ranked = top_n(&arena, 3);
        assert_eq!(ranked, vec![ids[1], ids[3], ids[4]]);
        assert_eq!(frequencies_of(&arena, &ranked), vec![7, 5, 3]);
    }

    #[test]
    fn zero_selects_nothing() {
        let (arena, _) = arena_with_frequencies(&[4, 4, 4]);
        assert!(top_n(&arena, 0).is_empty());
    }

    #[test]
    fn oversized_n_returns_every_record_once() {
        let (arena, _) = arena_with_frequencies(&[2, 9, 4]);
        let ranked = top_n(&arena, 100);
        assert_eq!(frequencies_of(&arena, &ranked), vec![9, 4, 2]);
    }

    #[test]
    fn empty_arena_ranks_to_nothing() {
        let arena = RecordArena::new();
        assert!(top_n(&arena, 5).is_empty());
    }

    #[test]
    fn result_is_non_increasing_even_with_ties() {
        let (arena, _) = arena_with_frequencies(&[3, 1, 3, 2, 3, 1]);
        let ranked = top_n(&arena, 4);
        let frequencies = frequencies_of(&arena, &ranked);
        assert_eq!(frequencies, vec![3, 3, 3, 2]);
    }

    #[test]
    fn selection_reaches_past_the_first_block() {
        // plant the maximum beyond the first block boundary so a ranker
        // that only reads the first block would miss it
        let mut frequencies = vec![1u32; BLOCK_CAPACITY + 10];
        frequencies[BLOCK_CAPACITY + 4] = 50;
        frequencies[3] = 20;

        let (arena, ids) = arena_with_frequencies(&frequencies);
        assert!(arena.block_count() > 1);

        let ranked = top_n(&arena, 2);
        assert_eq!(ranked, vec![ids[BLOCK_CAPACITY + 4], ids[3]]);
    }
}
