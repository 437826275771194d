//! OSRM API response types for the Table and Route services.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service> and
//! <http://project-osrm.org/docs/v5.24.0/api/#route-service>.

use serde::Deserialize;

/// Status code OSRM returns for successful requests.
const OK_CODE: &str = "Ok";

/// OSRM Table API response requested with `annotations=distance`.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM, e.g. `"Ok"`, `"InvalidQuery"` or `"NoTable"`.
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Matrix of walking distances in meters.
    ///
    /// `distances[i][j]` is the distance from the i-th to the j-th
    /// coordinate. Values are `None` when no route exists between a pair.
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == OK_CODE
    }
}

/// OSRM Route API response requested with full GeoJSON overview and steps.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM, e.g. `"Ok"` or `"NoRoute"`.
    pub code: String,
    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,
    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == OK_CODE
    }
}

/// One route between the requested waypoints.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Route length in meters.
    pub distance: f64,
    /// Route duration in seconds.
    pub duration: f64,
    /// Full route geometry.
    pub geometry: GeoJsonLine,
    /// Legs between consecutive waypoints.
    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
}

/// GeoJSON `LineString` geometry with `[longitude, latitude]` positions.
#[derive(Debug, Deserialize)]
pub struct GeoJsonLine {
    /// Positions along the line.
    pub coordinates: Vec<[f64; 2]>,
}

/// A leg between two waypoints.
#[derive(Debug, Deserialize)]
pub struct OsrmLeg {
    /// Manoeuvres along the leg.
    #[serde(default)]
    pub steps: Vec<OsrmStep>,
}

/// A single manoeuvre.
#[derive(Debug, Deserialize)]
pub struct OsrmStep {
    /// Name of the way; empty when unnamed.
    #[serde(default)]
    pub name: String,
    /// Step length in meters.
    pub distance: f64,
    /// Step duration in seconds.
    pub duration: f64,
    /// Manoeuvre performed at the start of the step.
    pub maneuver: OsrmManeuver,
}

/// Manoeuvre descriptor.
#[derive(Debug, Deserialize)]
pub struct OsrmManeuver {
    /// Manoeuvre type, e.g. `"depart"` or `"turn"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Direction modifier, e.g. `"left"`.
    pub modifier: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_table_response() {
        let json = r#"{
            "code": "Ok",
            "distances": [[0.0, 412.3], [398.1, 0.0]]
        }"#;

        let response: TableResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        assert!(response.message.is_none());
        let distances = response.distances.expect("should have distances");
        assert_eq!(distances.len(), 2);
        assert_eq!(distances[0][1], Some(412.3));
        assert_eq!(distances[1][0], Some(398.1));
    }

    #[test]
    fn deserialise_table_error_response() {
        let json = r#"{
            "code": "InvalidQuery",
            "message": "Coordinates are invalid"
        }"#;

        let response: TableResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(response.message.as_deref(), Some("Coordinates are invalid"));
        assert!(response.distances.is_none());
    }

    #[test]
    fn deserialise_table_response_with_nulls() {
        let json = r#"{
            "code": "Ok",
            "distances": [[0.0, null], [null, 0.0]]
        }"#;

        let response: TableResponse = serde_json::from_str(json).expect("should deserialise");

        let distances = response.distances.expect("should have distances");
        assert_eq!(distances[0][1], None);
        assert_eq!(distances[1][0], None);
    }

    #[test]
    fn deserialise_route_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 250.5,
                "duration": 180.2,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-2.5935, 51.4508], [-2.5921, 51.4512]]
                },
                "legs": [{
                    "steps": [
                        {
                            "name": "King Street",
                            "distance": 250.5,
                            "duration": 180.2,
                            "maneuver": {"type": "depart", "location": [-2.5935, 51.4508]}
                        },
                        {
                            "distance": 0.0,
                            "duration": 0.0,
                            "maneuver": {"type": "arrive", "modifier": "left"}
                        }
                    ]
                }]
            }]
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let route = response.routes.first().expect("one route");
        assert_eq!(route.geometry.coordinates.len(), 2);
        let steps = &route.legs[0].steps;
        assert_eq!(steps[0].name, "King Street");
        assert_eq!(steps[0].maneuver.kind, "depart");
        assert_eq!(steps[1].name, "");
        assert_eq!(steps[1].maneuver.modifier.as_deref(), Some("left"));
    }

    #[test]
    fn deserialise_route_error_response() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert!(response.routes.is_empty());
    }
}
