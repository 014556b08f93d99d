use std::fmt;

use crate::{admit::admits, field_type::FieldType};

/// The types a column may still be, narrowed one value at a time.
///
/// A set only ever loses members; nothing re-adds a type once a value has
/// disproved it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateSet {
    bits: u8,
}

impl CandidateSet {
    pub fn full() -> Self {
        let bits = FieldType::ALL.iter().fold(0, |acc, ty| acc | ty.bit());
        Self { bits }
    }

    pub fn contains(&self, field_type: FieldType) -> bool {
        self.bits & field_type.bit() != 0
    }

    pub fn remove(&mut self, field_type: FieldType) {
        self.bits &= !field_type.bit();
    }

    pub fn is_subset_of(&self, other: &CandidateSet) -> bool {
        self.bits & !other.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldType> + '_ {
        FieldType::ALL.into_iter().filter(|ty| self.contains(*ty))
    }

    /// Drops every candidate `value` disproves.
    pub fn narrow(&mut self, value: &str) {
        for candidate in FieldType::ALL {
            if self.contains(candidate) && !admits(value, candidate) {
                self.remove(candidate);
            }
        }
    }

    /// Highest-ranked survivor. When both temporal kinds survive this
    /// returns [`FieldType::Date`]; callers disambiguate with a second pass.
    pub fn best(&self) -> Option<FieldType> {
        self.iter().fold(None, |best: Option<FieldType>, ty| match best {
            Some(current) if current.rank() >= ty.rank() => Some(current),
            _ => Some(ty),
        })
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Debug for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
