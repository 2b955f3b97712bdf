//! The [`StepPackage`] message container.

use std::fmt;
use std::io;

use stepwire_arena::{ArenaPool, ArenaStats, SpanHandle};
use stepwire_codec::{
    find_value, format_header, normalize_body_line, parse_header, rebuild_with_value, split_lines,
    unescape, HeaderMap,
};
use stepwire_core::grammar::LINE_END;
use stepwire_core::FieldId;

use crate::builder::RecordBuilder;
use crate::config::PackageConfig;
use crate::error::PackageError;
use crate::store::{RecordSpan, RecordStore};

/// One Stepwire message: a header map plus arena-backed body records.
///
/// A package is reused across messages. [`init()`](Self::init) clears it
/// while keeping the arena blocks, record slots, and build buffer
/// allocated, so steady-state encode/decode does not touch the heap.
///
/// Lookups are relative to the cursor. Decoding leaves the cursor on
/// record 0; building leaves it on the record last appended.
#[derive(Debug)]
pub struct StepPackage {
    header: HeaderMap,
    store: RecordStore,
    pool: ArenaPool,
    builder: RecordBuilder,
    /// Rebuild target for `set_field_value`.
    scratch: Vec<u8>,
}

impl StepPackage {
    /// Create an empty package.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::Arena`] if the arena configuration is invalid.
    pub fn new(config: PackageConfig) -> Result<Self, PackageError> {
        config.validate()?;
        let PackageConfig {
            arena,
            record_capacity,
            build_buffer_capacity,
        } = config;
        Ok(Self {
            header: HeaderMap::new(),
            store: RecordStore::new(record_capacity),
            pool: ArenaPool::new(arena)?,
            builder: RecordBuilder::new(build_buffer_capacity),
            scratch: Vec::with_capacity(build_buffer_capacity),
        })
    }

    /// Reset to an empty message: no header fields, no records, no cursor.
    ///
    /// Every borrowed view and [`SpanHandle`](stepwire_arena::SpanHandle)
    /// from before the call is invalidated.
    pub fn init(&mut self) {
        self.header.clear();
        self.store.clear();
        self.builder.clear();
        self.pool.reset();
    }

    // ── decode ──────────────────────────────────────────────────

    /// Decode a whole message, replacing the current contents.
    ///
    /// The first line is the header. Every following line becomes one
    /// record; a blank line becomes an empty record. The cursor is left
    /// on record 0 if there is one.
    ///
    /// # Errors
    ///
    /// [`PackageError::EmptyPackage`] for empty input, or
    /// [`PackageError::Arena`] if a body line does not fit the arena. On
    /// error the package holds a partial decode and should be discarded.
    pub fn set_package(&mut self, src: &str) -> Result<(), PackageError> {
        self.init();
        if src.is_empty() {
            return Err(PackageError::EmptyPackage);
        }

        let mut lines = split_lines(src);
        if let Some(head) = lines.next() {
            parse_header(head, &mut self.header);
        }
        for line in lines {
            let body = normalize_body_line(line.as_bytes());
            let span = if body.is_empty() {
                None
            } else {
                Some(self.commit(&body)?)
            };
            self.store.push(span);
        }
        self.store.goto_first();
        Ok(())
    }

    /// Decode only the header line of `src`, discarding any body lines.
    ///
    /// # Errors
    ///
    /// [`PackageError::MissingHeaderTerminator`] if `src` has no `\n`. The
    /// package is left untouched in that case.
    pub fn set_package_head(&mut self, src: &str) -> Result<(), PackageError> {
        let Some(end) = src.find(LINE_END as char) else {
            return Err(PackageError::MissingHeaderTerminator);
        };
        self.init();
        parse_header(&src[..end], &mut self.header);
        Ok(())
    }

    // ── encode ──────────────────────────────────────────────────

    /// Serialise the whole message into wire bytes.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pool.used_size() + self.store.len() + 64);
        // Writes into a Vec cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    /// Write the whole message to `w`.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `w`.
    pub fn write_to<W: io::Write>(&self, mut w: W) -> io::Result<()> {
        w.write_all(self.base_record().as_bytes())?;
        for record in self.records() {
            w.write_all(record)?;
            w.write_all(&[LINE_END])?;
        }
        Ok(())
    }

    /// The formatted header line, including its `\n`.
    pub fn base_record(&self) -> String {
        let mut out = String::with_capacity(self.header.len() * 16 + 1);
        format_header(&self.header, &mut out);
        out
    }

    /// Records `start..end`, each followed by `\n`.
    ///
    /// `end` is clamped to the record count; an empty or inverted range
    /// yields an empty string.
    pub fn formatted_records(&self, start: usize, end: usize) -> String {
        let end = end.min(self.store.len());
        if start >= end {
            return String::new();
        }
        let mut out = Vec::new();
        for record in (start..end).filter_map(|i| self.record(i)) {
            out.extend_from_slice(record);
            out.push(LINE_END);
        }
        String::from_utf8(out)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }

    // ── build ───────────────────────────────────────────────────

    /// Start a new record and move the cursor onto it.
    ///
    /// A record still being built is flushed first.
    ///
    /// # Errors
    ///
    /// [`PackageError::Arena`] if that flush fails. The new record is not
    /// started in that case.
    pub fn append_record(&mut self) -> Result<(), PackageError> {
        if !self.builder.is_empty() {
            self.end_append_record()?;
        }
        self.store.push(None);
        Ok(())
    }

    /// Add `id=value&` to the record being built.
    ///
    /// Set `escape` for free-text values that may contain reserved bytes.
    pub fn add_field_value(&mut self, id: impl Into<FieldId>, value: impl fmt::Display, escape: bool) {
        self.builder.push_field(id.into(), &value, escape);
    }

    /// Commit the record being built into the arena.
    ///
    /// No-op if no fields were added. Fields added before any
    /// [`append_record()`](Self::append_record) form their own record.
    ///
    /// # Errors
    ///
    /// [`PackageError::Arena`] if the record does not fit. The pending
    /// fields are dropped and the record stays empty.
    pub fn end_append_record(&mut self) -> Result<(), PackageError> {
        if self.builder.is_empty() {
            return Ok(());
        }
        let result = self
            .pool
            .allocate(self.builder.as_bytes())
            .map(|handle| RecordSpan::new(handle, self.limit_for(handle)));
        let len = self.builder.len();
        self.builder.clear();
        match result {
            Ok(span) => {
                if self.store.is_empty() {
                    self.store.push(None);
                }
                self.store.set_last(Some(span));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(len, error = %e, "dropping record that does not fit the arena");
                Err(e.into())
            }
        }
    }

    // ── mutate ──────────────────────────────────────────────────

    /// Set field `id` of the current record to `value`, escaped.
    ///
    /// An existing value is replaced and every other field is kept byte
    /// for byte; a missing field is appended. The record is rewritten into
    /// a fresh arena span. If the result is longer than the record's limit
    /// (the capacity of the block that first received it, minus one) it is
    /// truncated to that length, backing off to the previous character
    /// boundary so the record stays valid UTF-8. The limit never changes
    /// across rebuilds.
    ///
    /// # Errors
    ///
    /// [`PackageError::NoCurrentRecord`] if the cursor is not on a
    /// non-empty record, [`PackageError::Arena`] if the new span cannot be
    /// allocated. The record is unchanged on error.
    pub fn set_field_value(&mut self, id: impl Into<FieldId>, value: impl fmt::Display) -> Result<(), PackageError> {
        let id = id.into();
        let (Some(index), Some(span)) = (self.store.cursor(), self.store.current()) else {
            return Err(PackageError::NoCurrentRecord);
        };
        let record = self.pool.resolve(span.handle())?;
        rebuild_with_value(record, id, &value, &mut self.scratch);

        let limit = span.limit();
        if self.scratch.len() > limit {
            let cut = floor_char_boundary(&self.scratch, limit);
            tracing::warn!(%id, len = self.scratch.len(), limit, cut, "truncating record to its limit");
            self.scratch.truncate(cut);
        }

        let handle = self.pool.allocate(&self.scratch)?;
        self.store.replace(index, Some(span.with_handle(handle)));
        Ok(())
    }

    /// Set header field `id`. The value is stored as given and escaped
    /// when the header is serialised.
    pub fn set_base_field_value(&mut self, id: impl Into<FieldId>, value: impl fmt::Display) {
        self.header.insert(id.into(), value.to_string());
    }

    // ── lookup ──────────────────────────────────────────────────

    /// Header field `id`, unescaped.
    pub fn get_base_field_value(&self, id: impl Into<FieldId>) -> Option<&str> {
        self.header.get(&id.into()).map(String::as_str)
    }

    /// Raw (escaped) value of field `id` in the current record.
    ///
    /// `None` if there is no current record or the field is absent. A
    /// present field with an empty value yields `Some(&[])`.
    pub fn find_item(&self, id: impl Into<FieldId>) -> Option<&[u8]> {
        let span = self.store.current()?;
        let record = self.pool.resolve(span.handle()).ok()?;
        find_value(record, id.into())
    }

    /// Unescaped value of field `id` in the current record.
    pub fn get_step_value_by_id(&self, id: impl Into<FieldId>) -> Option<String> {
        self.find_item(id)
            .map(|raw| String::from_utf8_lossy(&unescape(raw)).into_owned())
    }

    /// Raw value of field `id` in the record still being built.
    ///
    /// An empty value counts as absent.
    pub fn find_pending_item(&self, id: impl Into<FieldId>) -> Option<&[u8]> {
        find_value(self.builder.as_bytes(), id.into()).filter(|v| !v.is_empty())
    }

    // ── navigation ──────────────────────────────────────────────

    /// Move the cursor to the first record.
    pub fn goto_first(&mut self) {
        self.store.goto_first();
    }

    /// Advance the cursor by one. Past the last record, lookups find nothing.
    pub fn goto_next(&mut self) {
        self.store.goto_next();
    }

    /// Number of body records.
    pub fn records_count(&self) -> usize {
        self.store.len()
    }

    /// The cursor. `None` exactly when there are no records.
    pub fn cursor(&self) -> Option<usize> {
        self.store.cursor()
    }

    // ── inspection ──────────────────────────────────────────────

    /// The header fields.
    pub fn header(&self) -> &HeaderMap {
        &self.header
    }

    /// Raw bytes of record `index`. An empty record yields `Some(&[])`.
    pub fn record(&self, index: usize) -> Option<&[u8]> {
        match self.store.get(index)? {
            Some(span) => self.pool.resolve(span.handle()).ok(),
            None => Some(&[]),
        }
    }

    /// Raw bytes of every record, in order.
    pub fn records(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.store.iter().map(|span| match span {
            Some(span) => self.pool.resolve(span.handle()).unwrap_or_default(),
            None => &[],
        })
    }

    /// Arena usage counters.
    pub fn arena_stats(&self) -> ArenaStats {
        self.pool.stats()
    }
}

impl StepPackage {
    /// Copy one record into the arena and fix its rebuild limit.
    fn commit(&mut self, bytes: &[u8]) -> Result<RecordSpan, PackageError> {
        let handle = self.pool.allocate(bytes)?;
        Ok(RecordSpan::new(handle, self.limit_for(handle)))
    }

    /// One less than the capacity of the block `handle` landed in.
    fn limit_for(&self, handle: SpanHandle) -> usize {
        self.pool
            .block_capacity(handle)
            .unwrap_or_else(|| self.pool.config().max_span())
            .saturating_sub(1)
    }
}

/// Largest index `<= at` that starts a UTF-8 character in `bytes`.
fn floor_char_boundary(bytes: &[u8], at: usize) -> usize {
    let mut cut = at.min(bytes.len());
    // Continuation bytes are 0b10xx_xxxx.
    while cut > 0 && cut < bytes.len() && bytes[cut] & 0xC0 == 0x80 {
        cut -= 1;
    }
    cut
}

impl fmt::Display for StepPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_record())?;
        for record in self.records() {
            f.write_str(&String::from_utf8_lossy(record))?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}
