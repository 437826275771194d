//! Venue loading from `pubs.json`.
//!
//! The file is a JSON array of records shaped like
//! `{"id", "name", "address": {"street", "postalCode"}, "latitude", "longitude"}`.
//! Records without usable coordinates are skipped with a warning; the
//! remaining records keep their file order, which fixes each venue's
//! [`PubIndex`](pubcrawl_core::PubIndex).

use std::io::{BufReader, Read};

use camino::Utf8Path;
use geo::Coord;
use log::{debug, warn};
use pubcrawl_core::{Address, Pub, PubRegistry};
use serde::Deserialize;

use crate::LoadError;
use crate::fs::open_file;

#[derive(Debug, Deserialize)]
struct PubRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

impl PubRecord {
    fn into_pub(self) -> Option<Pub> {
        let (Some(y), Some(x)) = (self.latitude, self.longitude) else {
            warn!("skipping pub {}: missing coordinates", self.id);
            return None;
        };
        if !(x.is_finite() && y.is_finite()) {
            warn!("skipping pub {}: non-finite coordinates", self.id);
            return None;
        }
        let name = self.name.unwrap_or_else(|| self.id.clone());
        let venue = Pub::new(self.id, name, Coord { x, y });
        Some(match self.address {
            Some(address) => venue.with_address(address),
            None => venue,
        })
    }
}

/// Parse pub records from `reader`, dropping records without coordinates.
///
/// # Errors
///
/// Returns the `serde_json` error when the input is not an array of pub
/// records.
///
/// # Examples
/// ```
/// use pubcrawl_data::read_pubs;
///
/// let json = r#"[
///     {"id": "a", "name": "The Albion", "latitude": 51.45, "longitude": -2.59},
///     {"id": "b", "name": "No Location"}
/// ]"#;
/// let pubs = read_pubs(json.as_bytes())?;
/// assert_eq!(pubs.len(), 1);
/// assert_eq!(pubs[0].location.x, -2.59);
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn read_pubs<R: Read>(reader: R) -> Result<Vec<Pub>, serde_json::Error> {
    let records: Vec<PubRecord> = serde_json::from_reader(reader)?;
    let total = records.len();
    let pubs: Vec<Pub> = records.into_iter().filter_map(PubRecord::into_pub).collect();
    debug!("read {} of {total} pub records", pubs.len());
    Ok(pubs)
}

/// Load `path` into a [`PubRegistry`].
///
/// # Errors
///
/// Returns [`LoadError`] when the file cannot be read or parsed, or when two
/// records share an identifier.
pub fn load_pubs(path: &Utf8Path) -> Result<PubRegistry, LoadError> {
    let file = open_file(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let pubs = read_pubs(BufReader::new(file)).map_err(|source| LoadError::ParsePubs {
        path: path.to_path_buf(),
        source,
    })?;
    PubRegistry::new(pubs).map_err(|source| LoadError::Registry {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubcrawl_core::RegistryError;
    use rstest::rstest;

    #[rstest]
    fn records_keep_file_order_and_addresses() {
        let json = r#"[
            {
                "id": "42",
                "name": "The Old Duke",
                "address": {"street": "45 King Street", "postalCode": "BS1 4ER"},
                "latitude": 51.4512,
                "longitude": -2.5942
            },
            {"id": "7", "name": "The Llandoger Trow", "latitude": 51.4510, "longitude": -2.5939}
        ]"#;

        let pubs = read_pubs(json.as_bytes()).expect("valid records");

        let ids: Vec<&str> = pubs.iter().map(|venue| venue.id.as_str()).collect();
        assert_eq!(ids, ["42", "7"]);
        let address = pubs[0].address.as_ref().expect("address kept");
        assert_eq!(address.postal_code.as_deref(), Some("BS1 4ER"));
        assert_eq!(pubs[0].location, Coord { x: -2.5942, y: 51.4512 });
        assert!(pubs[1].address.is_none());
    }

    #[rstest]
    #[case(r#"[{"id": "a", "name": "A", "longitude": -2.59}]"#)]
    #[case(r#"[{"id": "a", "name": "A", "latitude": 51.45}]"#)]
    #[case(r#"[{"id": "a", "name": "A", "latitude": null, "longitude": null}]"#)]
    fn records_without_coordinates_are_skipped(#[case] json: &str) {
        let pubs = read_pubs(json.as_bytes()).expect("valid records");

        assert!(pubs.is_empty());
    }

    #[rstest]
    fn missing_name_falls_back_to_id() {
        let json = r#"[{"id": "n1", "latitude": 51.45, "longitude": -2.59}]"#;

        let pubs = read_pubs(json.as_bytes()).expect("valid records");

        assert_eq!(pubs[0].name, "n1");
    }

    #[rstest]
    fn non_array_input_is_rejected() {
        assert!(read_pubs(r#"{"id": "a"}"#.as_bytes()).is_err());
    }

    #[rstest]
    fn duplicate_ids_are_rejected() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("pubs.json"))
            .expect("utf-8 path");
        std::fs::write(
            &path,
            r#"[
                {"id": "a", "name": "A", "latitude": 51.0, "longitude": -2.0},
                {"id": "a", "name": "B", "latitude": 51.1, "longitude": -2.1}
            ]"#,
        )
        .expect("write pubs");

        let err = load_pubs(&path).expect_err("duplicate ids");

        assert!(matches!(
            err,
            LoadError::Registry {
                source: RegistryError::DuplicateId { .. },
                ..
            }
        ));
    }

    #[rstest]
    fn missing_file_reports_the_path() {
        let err = load_pubs(Utf8Path::new("/nonexistent/pubs.json")).expect_err("no file");

        assert!(matches!(err, LoadError::Read { ref path, .. } if path == "/nonexistent/pubs.json"));
    }
}
