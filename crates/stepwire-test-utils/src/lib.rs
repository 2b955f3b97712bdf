//! Test utilities for Stepwire development.
//!
//! Provides ordered record fixtures ([`RecordFixture`], [`MessageFixture`])
//! that render to expected wire text and load into a
//! [`StepPackage`], plus canned messages in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use indexmap::IndexMap;
use stepwire_core::FieldId;
use stepwire_engine::{PackageConfig, PackageError, StepPackage};

/// One record's fields in insertion order.
///
/// Values are plain text; [`to_wire`](RecordFixture::to_wire) assumes they
/// hold no reserved bytes unless they were added with
/// [`text`](RecordFixture::text).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordFixture {
    fields: IndexMap<FieldId, (String, bool)>,
}

impl RecordFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field written verbatim.
    pub fn field(mut self, id: i32, value: impl ToString) -> Self {
        self.fields.insert(FieldId(id), (value.to_string(), false));
        self
    }

    /// Add a free-text field that is escaped on the wire.
    pub fn text(mut self, id: i32, value: impl ToString) -> Self {
        self.fields.insert(FieldId(id), (value.to_string(), true));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.keys().copied()
    }

    /// Unescaped value of `id`.
    pub fn value(&self, id: i32) -> Option<&str> {
        self.fields.get(&FieldId(id)).map(|(v, _)| v.as_str())
    }

    /// Expected wire bytes, without the line terminator.
    pub fn to_wire(&self) -> String {
        self.fields
            .iter()
            .map(|(id, (value, escape))| {
                let value = if *escape {
                    escape_expected(value)
                } else {
                    value.clone()
                };
                format!("{id}={value}&")
            })
            .collect()
    }

    /// Add this record to `pkg` through the build API.
    pub fn append_to(&self, pkg: &mut StepPackage) -> Result<(), PackageError> {
        pkg.append_record()?;
        for (id, (value, escape)) in &self.fields {
            pkg.add_field_value(*id, value, *escape);
        }
        pkg.end_append_record()
    }
}

/// A header plus records, built in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageFixture {
    pub header: IndexMap<FieldId, String>,
    pub records: Vec<RecordFixture>,
}

impl MessageFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, id: i32, value: impl ToString) -> Self {
        self.header.insert(FieldId(id), value.to_string());
        self
    }

    pub fn record(mut self, record: RecordFixture) -> Self {
        self.records.push(record);
        self
    }

    /// Build a fresh package holding this message.
    pub fn build(&self) -> Result<StepPackage, PackageError> {
        let mut pkg = StepPackage::new(PackageConfig::default())?;
        self.build_into(&mut pkg)?;
        Ok(pkg)
    }

    /// Reset `pkg` and build this message into it.
    pub fn build_into(&self, pkg: &mut StepPackage) -> Result<(), PackageError> {
        pkg.init();
        for (id, value) in &self.header {
            pkg.set_base_field_value(*id, value);
        }
        for record in &self.records {
            record.append_to(pkg)?;
        }
        Ok(())
    }
}

/// Minimal escape used to compute expected wire text independently of the
/// codec under test.
fn escape_expected(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '=' => out.push_str("\\a"),
            '&' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

/// A package with default configuration.
pub fn package() -> StepPackage {
    match StepPackage::new(PackageConfig::default()) {
        Ok(pkg) => pkg,
        Err(e) => panic!("default package config rejected: {e}"),
    }
}
