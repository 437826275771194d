//! Routes through venues between a fixed start and end.
//!
//! A [`Route`] always opens with [`RouteElement::Start`], closes with
//! [`RouteElement::End`] and visits each venue at most once in between.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::PubIndex;

/// A single stop on a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RouteElement {
    /// The caller's start location.
    Start,
    /// The caller's end location.
    End,
    /// A venue from the registry.
    Pub(PubIndex),
}

impl RouteElement {
    /// Return the venue index for [`RouteElement::Pub`] values.
    #[must_use]
    pub const fn pub_index(self) -> Option<PubIndex> {
        match self {
            Self::Pub(index) => Some(index),
            Self::Start | Self::End => None,
        }
    }
}

impl fmt::Display for RouteElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
            Self::Pub(index) => write!(f, "pub {index}"),
        }
    }
}

/// Errors returned when constructing a [`Route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The sequence does not open with `Start`.
    #[error("route must begin at the start marker")]
    MissingStart,
    /// The sequence does not close with `End`.
    #[error("route must finish at the end marker")]
    MissingEnd,
    /// A `Start` or `End` marker appears between the endpoints.
    #[error("marker {element} may only appear at the route boundary")]
    MisplacedMarker {
        /// The offending marker.
        element: RouteElement,
    },
    /// A venue is visited twice.
    #[error("pub {index} is visited more than once")]
    DuplicatePub {
        /// The repeated venue.
        index: PubIndex,
    },
}

/// An ordered walk from the start marker, through venues, to the end marker.
///
/// # Examples
/// ```
/// use pubcrawl_core::{PubIndex, Route, RouteElement};
///
/// # fn main() -> Result<(), pubcrawl_core::RouteError> {
/// let route = Route::new(vec![PubIndex::new(4), PubIndex::new(2)])?;
/// assert_eq!(route.len(), 4);
/// assert_eq!(route.elements().first(), Some(&RouteElement::Start));
/// assert_eq!(route.elements().last(), Some(&RouteElement::End));
/// assert_eq!(route.pubs().collect::<Vec<_>>(), vec![PubIndex::new(4), PubIndex::new(2)]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<RouteElement>", into = "Vec<RouteElement>")
)]
pub struct Route {
    elements: Vec<RouteElement>,
}

impl Route {
    /// Build a route visiting `pubs` in order. Venues must be distinct.
    pub fn new(pubs: Vec<PubIndex>) -> Result<Self, RouteError> {
        let mut seen = HashSet::with_capacity(pubs.len());
        if let Some(repeated) = pubs.iter().find(|index| !seen.insert(**index)) {
            return Err(RouteError::DuplicatePub { index: *repeated });
        }
        let mut elements = Vec::with_capacity(pubs.len() + 2);
        elements.push(RouteElement::Start);
        elements.extend(pubs.into_iter().map(RouteElement::Pub));
        elements.push(RouteElement::End);
        Ok(Self { elements })
    }

    /// A route that walks straight from start to end.
    ///
    /// # Examples
    /// ```
    /// use pubcrawl_core::{Route, RouteElement};
    ///
    /// let route = Route::empty();
    /// assert_eq!(route.elements(), &[RouteElement::Start, RouteElement::End]);
    /// assert_eq!(route.pub_count(), 0);
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self {
            elements: vec![RouteElement::Start, RouteElement::End],
        }
    }

    /// Validate an explicit element sequence.
    pub fn from_elements(elements: Vec<RouteElement>) -> Result<Self, RouteError> {
        if elements.first() != Some(&RouteElement::Start) {
            return Err(RouteError::MissingStart);
        }
        if elements.len() < 2 || elements.last() != Some(&RouteElement::End) {
            return Err(RouteError::MissingEnd);
        }
        let interior = elements.get(1..elements.len() - 1).unwrap_or_default();
        let mut pubs = Vec::with_capacity(interior.len());
        for element in interior {
            match element {
                RouteElement::Pub(index) => pubs.push(*index),
                marker => {
                    return Err(RouteError::MisplacedMarker { element: *marker });
                }
            }
        }
        Self::new(pubs)
    }

    /// The full element sequence, markers included.
    #[must_use]
    pub fn elements(&self) -> &[RouteElement] {
        &self.elements
    }

    /// Number of elements, markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`: a route holds at least its two markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of venues visited.
    #[must_use]
    pub fn pub_count(&self) -> usize {
        self.elements.len().saturating_sub(2)
    }

    /// Venues in visiting order.
    pub fn pubs(&self) -> impl Iterator<Item = PubIndex> + '_ {
        self.elements.iter().filter_map(|element| element.pub_index())
    }

    /// Consecutive element pairs, one per walked leg.
    pub fn legs(&self) -> impl Iterator<Item = (RouteElement, RouteElement)> + '_ {
        self.elements
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some((*from, *to)),
                _ => None,
            })
    }

    /// Return a copy with the elements at positions `i..=j` reversed.
    ///
    /// Both positions must lie strictly inside the markers and `i < j`;
    /// otherwise `None` is returned. The result keeps every route invariant.
    ///
    /// # Examples
    /// ```
    /// use pubcrawl_core::{PubIndex, Route};
    ///
    /// let route = Route::new((0..3).map(PubIndex::new).collect()).unwrap();
    /// let flipped = route.with_reversed_segment(1, 3).unwrap();
    /// assert_eq!(
    ///     flipped.pubs().map(PubIndex::get).collect::<Vec<_>>(),
    ///     vec![2, 1, 0]
    /// );
    /// assert!(route.with_reversed_segment(0, 2).is_none());
    /// ```
    #[must_use]
    pub fn with_reversed_segment(&self, i: usize, j: usize) -> Option<Self> {
        let last_interior = self.elements.len().checked_sub(2)?;
        if i == 0 || i >= j || j > last_interior {
            return None;
        }
        let mut elements = self.elements.clone();
        elements.get_mut(i..=j)?.reverse();
        Some(Self { elements })
    }
}

impl TryFrom<Vec<RouteElement>> for Route {
    type Error = RouteError;

    fn try_from(elements: Vec<RouteElement>) -> Result<Self, Self::Error> {
        Self::from_elements(elements)
    }
}

impl From<Route> for Vec<RouteElement> {
    fn from(route: Route) -> Self {
        route.elements
    }
}
