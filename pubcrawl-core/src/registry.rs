//! Fixed-size registry of candidate venues.
//!
//! Planning code refers to venues through [`PubIndex`] values, positions in
//! the registry that double as row and column indices of the
//! [`DistanceMatrix`](crate::DistanceMatrix).

use std::collections::HashSet;
use std::fmt;

use geo::Coord;
use thiserror::Error;

use crate::Pub;

/// Position of a venue within a [`PubRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PubIndex(usize);

impl PubIndex {
    /// Wrap a raw registry position.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the raw registry position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for PubIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors returned by [`PubRegistry::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two venues share the same identifier.
    #[error("duplicate pub id {id:?}")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },
}

/// Immutable, ordered collection of venues for a planning session.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pubcrawl_core::{Pub, PubIndex, PubRegistry};
///
/// # fn main() -> Result<(), pubcrawl_core::RegistryError> {
/// let registry = PubRegistry::new(vec![
///     Pub::new("a", "Alpha", Coord { x: 0.0, y: 0.0 }),
///     Pub::new("b", "Bravo", Coord { x: 0.1, y: 0.0 }),
/// ])?;
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.get(PubIndex::new(1)).map(|p| p.id.as_str()), Some("b"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PubRegistry {
    pubs: Vec<Pub>,
}

impl PubRegistry {
    /// Validate and construct a registry. Identifiers must be unique.
    pub fn new(pubs: Vec<Pub>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(pubs.len());
        if let Some(repeated) = pubs.iter().find(|venue| !seen.insert(venue.id.as_str())) {
            return Err(RegistryError::DuplicateId {
                id: repeated.id.clone(),
            });
        }
        Ok(Self { pubs })
    }

    /// Number of venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pubs.len()
    }

    /// Whether the registry holds no venues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pubs.is_empty()
    }

    /// Look up a venue by index.
    #[must_use]
    pub fn get(&self, index: PubIndex) -> Option<&Pub> {
        self.pubs.get(index.get())
    }

    /// Location of the venue at `index`.
    #[must_use]
    pub fn location(&self, index: PubIndex) -> Option<Coord<f64>> {
        self.get(index).map(|venue| venue.location)
    }

    /// Iterate venues with their indices in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (PubIndex, &Pub)> + '_ {
        self.pubs
            .iter()
            .enumerate()
            .map(|(idx, venue)| (PubIndex::new(idx), venue))
    }

    /// Venue identifiers in registry order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.pubs.iter().map(|venue| venue.id.as_str())
    }
}
