use crate::arena::{RecordArena, RecordId, WordRecord};
use crate::buffer::Span;
use crate::error::Error;

/// Chained hash table with a fixed, power-of-two bucket count.
///
/// The table never rehashes: the working set is one bounded corpus, so
/// long chains are an accepted cost. Keeping the bucket count fixed also
/// keeps slots identical across tables, should the scan ever be split
/// into per-worker tables merged bucket-by-bucket.
pub struct WordTable {
    buckets: Vec<Option<RecordId>>,
    mask: u32,
    distinct: usize,
}

impl WordTable {
    /// `bucket_count` must be a power of two; slots are selected by
    /// masking the hash instead of taking a modulo.
    pub fn new(bucket_count: usize) -> Result<WordTable, Error> {
        debug_assert!(bucket_count.is_power_of_two());

        let mut buckets = Vec::new();
        buckets.try_reserve_exact(bucket_count).map_err(|_| Error::OutOfMemory {
            what: "bucket array",
            requested: bucket_count * std::mem::size_of::<Option<RecordId>>(),
        })?;
        buckets.resize(bucket_count, None);

        Ok(WordTable {
            buckets,
            mask: (bucket_count - 1) as u32,
            distinct: 0,
        })
    }

    /// Distinct words inserted so far.
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    /// Find the record for `span`, or insert a fresh one with frequency 1.
    ///
    /// A hit bumps the record's frequency. A miss allocates from `arena`
    /// and appends the new record to the *end* of its bucket chain, so
    /// records within a bucket stay in first-seen order. Returns the
    /// handle and whether an insert happened.
    pub fn lookup_or_insert(
        &mut self,
        text: &[u8],
        span: Span,
        hash: u32,
        arena: &mut RecordArena,
    ) -> Result<(RecordId, bool), Error> {
        let slot = (hash & self.mask) as usize;
        let word = span.bytes(text);

        let mut tail = None;
        let mut cursor = self.buckets[slot];
        while let Some(id) = cursor {
            let record = arena.get(id);
            debug_assert_eq!(record.slot, slot as u32);
            if record.span.bytes(text) == word {
                arena.get_mut(id).frequency += 1;
                return Ok((id, false));
            }
            tail = Some(id);
            cursor = record.next;
        }

        let id = arena.allocate(WordRecord {
            span,
            frequency: 1,
            slot: slot as u32,
            next: None,
        })?;
        match tail {
            Some(prev) => arena.get_mut(prev).next = Some(id),
            None => self.buckets[slot] = Some(id),
        }
        self.distinct += 1;
        Ok((id, true))
    }
}

#[cfg(test)]
impl WordTable {
    fn chain(&self, slot: usize, arena: &RecordArena) -> Vec<RecordId> {
        let mut ids = Vec::new();
        let mut cursor = self.buckets[slot];
        while let Some(id) = cursor {
            ids.push(id);
            cursor = arena.get(id).next;
        }
        ids
    }
}
