use serde::{Deserialize, Serialize};

use crate::instruments::Underlying;

/// Lookup of underlyings by id. Storage is someone else's concern; this is
/// the only question the creation workflow needs answered.
pub trait UnderlyingSource {
    fn find_underlying(&self, id: u64) -> Option<&Underlying>;
}

/// In-memory list of underlyings, typically loaded from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnderlyingCatalog {
    underlyings: Vec<Underlying>,
}

impl UnderlyingCatalog {
    pub fn new(underlyings: Vec<Underlying>) -> Self {
        UnderlyingCatalog { underlyings }
    }

    pub fn insert(&mut self, underlying: Underlying) {
        match self.underlyings.iter_mut().find(|u| u.id == underlying.id) {
            Some(existing) => *existing = underlying,
            None => self.underlyings.push(underlying),
        }
    }

    pub fn len(&self) -> usize {
        self.underlyings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.underlyings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Underlying> {
        self.underlyings.iter()
    }
}

impl UnderlyingSource for UnderlyingCatalog {
    fn find_underlying(&self, id: u64) -> Option<&Underlying> {
        self.underlyings.iter().find(|u| u.id == id)
    }
}
