use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::SetupError;

pub const DEFAULT_LIMIT: usize = 50;

/// Geographic rectangle, in `minLat,minLon,maxLat,maxLon` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl FromStr for BoundingBox {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SetupError::InvalidBounds(s.to_string());

        let coords = s
            .split(',')
            .map(|part| part.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(invalid)?;

        match coords.as_slice() {
            &[min_lat, min_lon, max_lat, max_lon] => Ok(BoundingBox {
                min_lat,
                min_lon,
                max_lat,
                max_lon,
            }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

/// Query filters for one invocation. Only constructible through
/// [`FilterSpec::new`], so a held value is always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    aircraft_type: Option<String>,
    registration: Option<String>,
    bounds: Option<BoundingBox>,
    limit: usize,
}

impl FilterSpec {
    pub fn new(
        aircraft_type: Option<String>,
        registration: Option<String>,
        bounds: Option<BoundingBox>,
        limit: usize,
    ) -> Result<Self, SetupError> {
        if limit == 0 {
            return Err(SetupError::InvalidLimit);
        }
        Ok(Self {
            aircraft_type,
            registration,
            bounds,
            limit,
        })
    }

    pub fn aircraft_type(&self) -> Option<&str> {
        self.aircraft_type.as_deref()
    }

    pub fn registration(&self) -> Option<&str> {
        self.registration.as_deref()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Query pairs for the filters that are present, in a stable order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(ref aircraft_type) = self.aircraft_type {
            pairs.push(("aircraft_type".to_string(), aircraft_type.clone()));
        }
        if let Some(ref registration) = self.registration {
            pairs.push(("registration".to_string(), registration.clone()));
        }
        if let Some(bounds) = self.bounds {
            pairs.push(("bounds".to_string(), bounds.to_string()));
        }
        pairs
    }

    /// Client-side check. With a filter set, a record matches only when the
    /// field is present as a string equal to the requested value.
    pub fn matches(&self, record: &Value) -> bool {
        field_matches(record, "aircraft_type", self.aircraft_type.as_deref())
            && field_matches(record, "registration", self.registration.as_deref())
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            aircraft_type: None,
            registration: None,
            bounds: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn field_matches(record: &Value, field: &str, wanted: Option<&str>) -> bool {
    match wanted {
        Some(wanted) => record.get(field).and_then(Value::as_str) == Some(wanted),
        None => true,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_bounds_works() {
        assert_eq!(
            "30,-120,40,-110".parse::<BoundingBox>().unwrap(),
            BoundingBox {
                min_lat: 30.0,
                min_lon: -120.0,
                max_lat: 40.0,
                max_lon: -110.0,
            }
        );

        assert_eq!(
            " 51.5 , -0.5 ,52.1, 0.25".parse::<BoundingBox>().unwrap(),
            BoundingBox {
                min_lat: 51.5,
                min_lon: -0.5,
                max_lat: 52.1,
                max_lon: 0.25,
            }
        );
    }

    #[test]
    fn parse_bounds_errors() {
        for bad in [
            "",
            "30,-120,40",
            "30,-120,40,-110,5",
            "30,-120,forty,-110",
            "30;-120;40;-110",
            "30,,40,-110",
            "inf,0,0,0",
            "NaN,0,0,0",
        ] {
            assert!(bad.parse::<BoundingBox>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn bounds_display_keeps_order() {
        let bounds: BoundingBox = "30,-120,40.5,-110".parse().unwrap();
        assert_eq!(bounds.to_string(), "30,-120,40.5,-110");
    }

    #[test]
    fn limit_zero_is_rejected() {
        assert_eq!(
            FilterSpec::new(None, None, None, 0),
            Err(SetupError::InvalidLimit)
        );
    }

    #[test]
    fn query_pairs_omit_absent_filters() {
        assert!(FilterSpec::default().query_pairs().is_empty());

        let spec = FilterSpec::new(Some("C17".into()), None, None, 20).unwrap();
        assert_eq!(
            spec.query_pairs(),
            vec![("aircraft_type".to_string(), "C17".to_string())]
        );
    }

    #[test]
    fn query_pairs_all_filters() {
        let spec = FilterSpec::new(
            Some("KC135".into()),
            Some("N12345".into()),
            Some("30,-120,40,-110".parse().unwrap()),
            5,
        )
        .unwrap();

        assert_eq!(
            spec.query_pairs(),
            vec![
                ("aircraft_type".to_string(), "KC135".to_string()),
                ("registration".to_string(), "N12345".to_string()),
                ("bounds".to_string(), "30,-120,40,-110".to_string()),
            ]
        );
    }

    #[test]
    fn matches_compares_field_value() {
        let spec = FilterSpec::new(Some("C17".into()), None, None, 10).unwrap();

        assert!(spec.matches(&json!({"aircraft_type": "C17"})));
        assert!(!spec.matches(&json!({"aircraft_type": "B738"})));
    }

    #[test]
    fn matches_drops_records_without_field() {
        let spec = FilterSpec::new(Some("C17".into()), None, None, 10).unwrap();

        assert!(!spec.matches(&json!({"callsign": "UAL1", "type": "B738"})));
        assert!(!spec.matches(&json!({"aircraft_type": null})));
        assert!(!spec.matches(&json!({"aircraft_type": 17})));
        assert!(!spec.matches(&json!(["abc", 1, 2])));
    }

    #[test]
    fn matches_requires_both_filters() {
        let spec = FilterSpec::new(Some("C17".into()), Some("05-5140".into()), None, 10).unwrap();

        assert!(spec.matches(&json!({"aircraft_type": "C17", "registration": "05-5140"})));
        assert!(!spec.matches(&json!({"aircraft_type": "C17", "registration": "N1"})));
    }

    #[test]
    fn default_spec_matches_everything() {
        let spec = FilterSpec::default();
        assert_eq!(spec.limit(), DEFAULT_LIMIT);
        assert!(spec.matches(&json!({"aircraft_type": "A320"})));
        assert!(spec.matches(&json!({"callsign": "RCH123"})));
        assert!(spec.matches(&json!(["abc", 1, 2])));
    }
}
