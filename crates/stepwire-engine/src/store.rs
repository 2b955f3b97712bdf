//! Record store and cursor.
//!
//! The store is an ordered list of record slots, one per body record,
//! indexed by record ordinal. A slot is `None` for an empty record (a blank
//! body line, or a record whose fields were never flushed). The cursor
//! selects the record that field lookups and mutations act on.

use stepwire_arena::SpanHandle;

/// A committed record: its bytes in the arena and its rebuild limit.
///
/// The limit is fixed when the record is first committed, one less than
/// the capacity of the block that received it. Rebuilds through
/// `set_field_value` are clamped to it and carry it over to the new span,
/// so later growth of that block never raises it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordSpan {
    handle: SpanHandle,
    limit: usize,
}

impl RecordSpan {
    /// Pair a handle with its rebuild limit.
    pub fn new(handle: SpanHandle, limit: usize) -> Self {
        Self { handle, limit }
    }

    /// Where the record's bytes live.
    pub fn handle(&self) -> SpanHandle {
        self.handle
    }

    /// Most bytes a rebuilt record may occupy.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The same limit over a new span.
    pub fn with_handle(self, handle: SpanHandle) -> Self {
        Self { handle, ..self }
    }
}

/// Ordered record slots plus the current-record cursor.
///
/// Invariant: the cursor is `None` exactly when the store is empty.
#[derive(Debug)]
pub struct RecordStore {
    spans: Vec<Option<RecordSpan>>,
    cursor: Option<usize>,
}

impl RecordStore {
    /// Create an empty store with room for `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            spans: Vec::with_capacity(capacity),
            cursor: None,
        }
    }

    /// Drop all records and reset the cursor. Capacity is kept.
    pub fn clear(&mut self) {
        self.spans.clear();
        self.cursor = None;
    }

    /// Append a record and advance the cursor by one.
    pub fn push(&mut self, span: Option<RecordSpan>) {
        self.spans.push(span);
        self.goto_next();
    }

    /// Assign the last record. Returns `false` if the store is empty.
    pub fn set_last(&mut self, span: Option<RecordSpan>) -> bool {
        match self.spans.last_mut() {
            Some(slot) => {
                *slot = span;
                true
            }
            None => false,
        }
    }

    /// Replace the record at `index`. Returns `false` if out of range.
    pub fn replace(&mut self, index: usize, span: Option<RecordSpan>) -> bool {
        match self.spans.get_mut(index) {
            Some(slot) => {
                *slot = span;
                true
            }
            None => false,
        }
    }

    /// The slot at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<Option<RecordSpan>> {
        self.spans.get(index).copied()
    }

    /// The record under the cursor, if the cursor is on a non-empty record.
    pub fn current(&self) -> Option<RecordSpan> {
        self.cursor.and_then(|i| self.get(i)).flatten()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Iterate over all slots in record order.
    pub fn iter(&self) -> impl Iterator<Item = Option<RecordSpan>> + '_ {
        self.spans.iter().copied()
    }

    /// The cursor position.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Move the cursor to record 0. No-op on an empty store.
    pub fn goto_first(&mut self) {
        if !self.spans.is_empty() {
            self.cursor = Some(0);
        }
    }

    /// Advance the cursor by one.
    ///
    /// Not bounds-checked: the cursor may move past the last record, after
    /// which lookups find nothing. On an empty store this is a no-op.
    pub fn goto_next(&mut self) {
        self.cursor = match self.cursor {
            Some(i) => Some(i.saturating_add(1)),
            None if !self.spans.is_empty() => Some(0),
            None => None,
        };
    }
}
