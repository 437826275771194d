use geo::Coord;

/// Postal address of a venue, as far as the source data knows it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Address {
    /// Street line.
    pub street: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
}

/// A pub that may appear on a crawl.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pubcrawl_core::Pub;
///
/// let venue = Pub::new("p-1", "The Old Duke", Coord { x: -2.5935, y: 51.4508 });
///
/// assert_eq!(venue.id, "p-1");
/// assert!(venue.address.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pub {
    /// Stable identifier from the source dataset.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Postal address, when known.
    pub address: Option<Address>,
}

impl Pub {
    /// Construct a `Pub` without an address.
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            address: None,
        }
    }

    /// Attach a postal address.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use pubcrawl_core::{Address, Pub};
    ///
    /// let venue = Pub::new("p-1", "The Old Duke", Coord { x: 0.0, y: 0.0 }).with_address(
    ///     Address {
    ///         street: Some("45 King Street".into()),
    ///         postal_code: Some("BS1 4ER".into()),
    ///     },
    /// );
    /// assert_eq!(
    ///     venue.address.and_then(|a| a.postal_code).as_deref(),
    ///     Some("BS1 4ER")
    /// );
    /// ```
    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pub_has_no_address() {
        let venue = Pub::new("a", "Alpha", Coord { x: 1.0, y: 2.0 });
        assert_eq!(venue.name, "Alpha");
        assert_eq!(venue.location, Coord { x: 1.0, y: 2.0 });
        assert!(venue.address.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn address_uses_camel_case_postal_code() {
        let address: Address =
            serde_json::from_str(r#"{"street":"1 Quay St","postalCode":"BS1 1AA"}"#)
                .expect("address should deserialise");
        assert_eq!(address.postal_code.as_deref(), Some("BS1 1AA"));
    }
}
