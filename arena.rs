use crate::buffer::Span;
use crate::error::Error;

/// Records per block. Blocks are appended as they fill and are never
/// reallocated, so a `RecordId` handed out once stays valid for the life
/// of the arena.
pub const BLOCK_CAPACITY: usize = 1 << 14;

/// Stable, opaque handle to a record in a `RecordArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecordId(u32);

/// One distinct word: where it lives in the corpus, how often it was
/// seen, and where it sits in the hash table.
#[derive(Debug)]
pub struct WordRecord {
    pub span: Span,
    pub frequency: u32,
    /// Bucket this record hashed to, cached at insert time.
    pub slot: u32,
    /// Next record in the same bucket chain.
    pub next: Option<RecordId>,
}

/// Grow-only storage for word records.
///
/// Allocation bumps a cursor in the tail block; a full tail gets a fresh
/// block appended behind it. Records are never moved or freed
/// individually, only in bulk when the arena is dropped.
pub struct RecordArena {
    blocks: Vec<Vec<WordRecord>>,
}

impl RecordArena {
    pub fn new() -> RecordArena {
        RecordArena { blocks: Vec::new() }
    }

    /// Number of live records across all blocks.
    pub fn len(&self) -> usize {
        match self.blocks.last() {
            Some(tail) => (self.blocks.len() - 1) * BLOCK_CAPACITY + tail.len(),
            None => 0,
        }
    }

    /// Blocks allocated so far.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Move `record` into the next free slot and return its handle.
    ///
    /// Appends a new block first when the tail block is full; only that
    /// block reservation can fail.
    pub fn allocate(&mut self, record: WordRecord) -> Result<RecordId, Error> {
        if self.blocks.last().is_none_or(|tail| tail.len() == BLOCK_CAPACITY) {
            let mut block = Vec::new();
            block.try_reserve_exact(BLOCK_CAPACITY).map_err(|_| Error::OutOfMemory {
                what: "record block",
                requested: BLOCK_CAPACITY * std::mem::size_of::<WordRecord>(),
            })?;
            self.blocks.push(block);
        }

        let block_index = self.blocks.len() - 1;
        let tail = &mut self.blocks[block_index];
        let id = RecordId((block_index * BLOCK_CAPACITY + tail.len()) as u32);
        tail.push(record);
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> &WordRecord {
        let index = id.0 as usize;
        &self.blocks[index / BLOCK_CAPACITY][index % BLOCK_CAPACITY]
    }

    pub fn get_mut(&mut self, id: RecordId) -> &mut WordRecord {
        let index = id.0 as usize;
        &mut self.blocks[index / BLOCK_CAPACITY][index % BLOCK_CAPACITY]
    }

    /// Visit every record in every block, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &WordRecord)> {
        self.blocks
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, record)| (RecordId(index as u32), record))
    }
}
