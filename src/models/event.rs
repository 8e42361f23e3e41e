use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Spatial reference every stored location is tagged with (WGS84).
pub const WGS84_SRID: i32 = 4326;

/// GeoJSON geometry as produced by `ST_AsGeoJSON`. Only points are stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        /// `[longitude, latitude]`
        coordinates: [f64; 2],
    },
}

impl Geometry {
    pub fn point(lng: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: [lng, lat],
        }
    }

    pub fn lng(&self) -> f64 {
        match self {
            Geometry::Point { coordinates } => coordinates[0],
        }
    }

    pub fn lat(&self) -> f64 {
        match self {
            Geometry::Point { coordinates } => coordinates[1],
        }
    }
}

/// An event as returned by the API. `lat`, `lng` and `geometry` are all
/// projections of the single stored location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub etkinlik_name: String,
    pub description: Option<String>,
    pub topluluk: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub geometry: Option<Geometry>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape read back from the `events` table.
#[derive(Debug, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub topluluk: Option<String>,
    pub geometry: Option<Json<Geometry>>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        let geometry = row.geometry.map(|Json(g)| g);
        Self {
            id: row.id,
            etkinlik_name: row.title.clone(),
            title: row.title,
            description: row.description,
            topluluk: row.topluluk,
            lat: geometry.map(|g| g.lat()),
            lng: geometry.map(|g| g.lng()),
            geometry,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Create payload. The name travels as `etkinlik_name` but `title` is
/// accepted too. Nothing beyond numeric coordinates is checked here; the
/// store enforces the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    #[serde(rename = "etkinlik_name", alias = "title", default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub topluluk: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewEvent {
    pub fn location(&self) -> Geometry {
        Geometry::point(self.lng, self.lat)
    }
}

/// Update payload: only the name can change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameEvent {
    #[serde(rename = "etkinlik_name", alias = "title", default)]
    pub title: Option<String>,
}

/// Query string of `GET /api/events`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventFilter {
    pub topluluk: Option<String>,
    pub q: Option<String>,
}

impl EventFilter {
    /// Empty parameters (`?topluluk=&q=`) count as absent.
    pub fn normalized(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            topluluk: non_empty(self.topluluk),
            q: non_empty(self.q),
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        let community_ok = match &self.topluluk {
            Some(t) => event.topluluk.as_deref() == Some(t.as_str()),
            None => true,
        };
        let name_ok = match &self.q {
            Some(q) => event.title.to_lowercase().contains(&q.to_lowercase()),
            None => true,
        };
        community_ok && name_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geometry_matches_geojson_point() {
        let geometry: Geometry =
            serde_json::from_value(json!({"type": "Point", "coordinates": [32.73, 39.87]}))
                .unwrap();
        assert_eq!(geometry.lng(), 32.73);
        assert_eq!(geometry.lat(), 39.87);
        assert_eq!(
            serde_json::to_value(geometry).unwrap(),
            json!({"type": "Point", "coordinates": [32.73, 39.87]})
        );
    }

    #[test]
    fn test_new_event_accepts_title_or_etkinlik_name() {
        let from_title: NewEvent =
            serde_json::from_value(json!({"title": "Fuar", "lat": 39.87, "lng": 32.73})).unwrap();
        let from_name: NewEvent = serde_json::from_value(
            json!({"etkinlik_name": "Fuar", "lat": 39.87, "lng": 32.73, "topluluk": "IEEE"}),
        )
        .unwrap();

        assert_eq!(from_title.title.as_deref(), Some("Fuar"));
        assert_eq!(from_name.title.as_deref(), Some("Fuar"));
        assert_eq!(from_name.topluluk.as_deref(), Some("IEEE"));
        assert_eq!(from_name.location(), Geometry::point(32.73, 39.87));
    }

    #[test]
    fn test_new_event_rejects_non_numeric_coordinates() {
        let parsed =
            serde_json::from_value::<NewEvent>(json!({"title": "x", "lat": "north", "lng": 1.0}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_row_projects_lat_lng_from_geometry() {
        let now = Utc::now();
        let event = Event::from(EventRow {
            id: 3,
            title: "Fuar".into(),
            description: None,
            topluluk: Some("IEEE".into()),
            geometry: Some(Json(Geometry::point(32.73, 39.87))),
            image_url: None,
            created_at: now,
            updated_at: now,
        });

        assert_eq!(event.etkinlik_name, "Fuar");
        assert_eq!(event.lat, Some(39.87));
        assert_eq!(event.lng, Some(32.73));
    }

    #[test]
    fn test_row_without_location_has_no_coordinates() {
        let now = Utc::now();
        let event = Event::from(EventRow {
            id: 4,
            title: "Online".into(),
            description: None,
            topluluk: None,
            geometry: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        });

        assert!(event.lat.is_none());
        assert!(event.lng.is_none());
        assert!(event.geometry.is_none());
    }

    #[test]
    fn test_filter_normalizes_empty_values() {
        let filter = EventFilter {
            topluluk: Some(String::new()),
            q: Some("  ".into()),
        }
        .normalized();
        assert_eq!(filter, EventFilter::default());
    }
}
