//! Benchmark payloads for the Stepwire codec.
//!
//! - [`Profile`]: message shape (record count, fields per record, value length)
//! - [`Payload::generate`]: deterministic message content from a seed
//! - [`reference_message`] / [`stress_message`]: ready-made wire text

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stepwire_core::FieldId;
use stepwire_engine::{PackageConfig, PackageError, StepPackage};

/// Shape of a generated message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    pub records: usize,
    pub fields_per_record: usize,
    pub max_value_len: usize,
    /// Percentage of free-text fields that contain reserved bytes.
    pub reserved_percent: u32,
}

impl Profile {
    /// A typical quote response: 100 records of 10 short fields.
    pub const REFERENCE: Profile = Profile {
        records: 100,
        fields_per_record: 10,
        max_value_len: 12,
        reserved_percent: 10,
    };

    /// A large query result: 2000 records of 30 fields.
    pub const STRESS: Profile = Profile {
        records: 2000,
        fields_per_record: 30,
        max_value_len: 24,
        reserved_percent: 25,
    };
}

/// A generated message: header fields and records of `(id, value, escape)`.
#[derive(Clone, Debug)]
pub struct Payload {
    pub header: Vec<(FieldId, String)>,
    pub records: Vec<Vec<(FieldId, String, bool)>>,
}

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const RESERVED: &[char] = &['=', '&', '\\', '\n'];

impl Payload {
    /// Generate a payload of the given shape. Same seed, same payload.
    pub fn generate(profile: Profile, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let header = vec![
            (FieldId(1), rng.gen_range(100..1000).to_string()),
            (FieldId(2), "0".to_owned()),
            (FieldId(3), profile.records.to_string()),
        ];
        let records = (0..profile.records)
            .map(|_| {
                (0..profile.fields_per_record)
                    .map(|f| {
                        let id = FieldId(10 + f as i32);
                        let free_text = f % 3 == 2;
                        let mut value = random_text(&mut rng, profile.max_value_len);
                        if free_text && rng.gen_range(0..100) < profile.reserved_percent {
                            let at = rng.gen_range(0..=value.len());
                            value.insert(at, RESERVED[rng.gen_range(0..RESERVED.len())]);
                        }
                        (id, value, free_text)
                    })
                    .collect()
            })
            .collect();
        Self { header, records }
    }

    /// Build this payload into `pkg`, replacing its contents.
    pub fn build_into(&self, pkg: &mut StepPackage) -> Result<(), PackageError> {
        pkg.init();
        for (id, value) in &self.header {
            pkg.set_base_field_value(*id, value);
        }
        for record in &self.records {
            pkg.append_record()?;
            for (id, value, escape) in record {
                pkg.add_field_value(*id, value, *escape);
            }
        }
        pkg.end_append_record()
    }

    /// Serialised wire text.
    pub fn to_wire(&self) -> Result<String, PackageError> {
        let mut pkg = StepPackage::new(PackageConfig::default())?;
        self.build_into(&mut pkg)?;
        Ok(pkg.to_string())
    }
}

fn random_text(rng: &mut ChaCha8Rng, max_len: usize) -> String {
    let len = rng.gen_range(1..=max_len.max(1));
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Wire text for [`Profile::REFERENCE`].
pub fn reference_message(seed: u64) -> Result<String, PackageError> {
    Payload::generate(Profile::REFERENCE, seed).to_wire()
}

/// Wire text for [`Profile::STRESS`].
pub fn stress_message(seed: u64) -> Result<String, PackageError> {
    Payload::generate(Profile::STRESS, seed).to_wire()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let a = reference_message(42).unwrap();
        let b = reference_message(42).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, reference_message(43).unwrap());
    }

    #[test]
    fn reference_message_decodes() {
        let wire = reference_message(7).unwrap();
        let mut pkg = StepPackage::new(PackageConfig::default()).unwrap();
        pkg.set_package(&wire).unwrap();
        assert_eq!(pkg.records_count(), Profile::REFERENCE.records);
        assert_eq!(pkg.base_field_i64(3), Some(100));
    }

    #[test]
    fn free_text_survives_the_wire() {
        let payload = Payload::generate(Profile::REFERENCE, 1);
        let mut pkg = StepPackage::new(PackageConfig::default()).unwrap();
        pkg.set_package(&payload.to_wire().unwrap()).unwrap();
        for record in &payload.records {
            for (id, value, _) in record {
                assert_eq!(pkg.get_step_value_by_id(*id).as_deref(), Some(value.as_str()));
            }
            pkg.goto_next();
        }
    }
}
