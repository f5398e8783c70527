//! Column layout of the hybrid-zone sample table.
//!
//! [`Schema::default`] describes the field survey export: eleven yearly
//! survival columns, a contiguous block of 101 marker columns, color scores,
//! a phenotype category and five geolocation columns. A JSON file can
//! override any of these; missing fields keep their defaults.
//!
//! ```
//! use snapzone_data::schema::Schema;
//!
//! let schema: Schema = serde_json::from_str(r#"{ "years": [2012, 2013] }"#).unwrap();
//! assert_eq!(schema.years, [2012, 2013]);
//! assert_eq!(schema.marker_block, (6, 106));
//! assert_eq!(schema.alive_column(2012), "AliveRec_2012");
//! ```

use serde::{Deserialize, Serialize};

/// Number of markers known to be linked to flower color.
pub const COLOR_LINKED_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Survey years, one survival column per year.
    pub years: Vec<u16>,
    /// Inclusive physical column range holding the marker calls.
    pub marker_block: (usize, usize),
    /// Survival column name prefix; the year is appended.
    pub alive_column_prefix: String,
    pub id_column: String,
    pub red_column: String,
    pub yellow_column: String,
    pub category_column: String,
    pub geolocation: GeolocationColumns,
    /// Markers moved as a group by the color-aware reorder strategies.
    pub color_linked_markers: [String; COLOR_LINKED_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationColumns {
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub easting: String,
    pub northing: String,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            years: (2009..=2019).collect(),
            marker_block: (6, 106),
            alive_column_prefix: "AliveRec_".to_owned(),
            id_column: "PlantID_final".to_owned(),
            red_column: "Red_final".to_owned(),
            yellow_column: "Yellow_final".to_owned(),
            category_column: "phenoCat_final".to_owned(),
            geolocation: GeolocationColumns::default(),
            color_linked_markers: ["ROS1", "ROS2", "EL", "SULF", "INC", "VENOSA"]
                .map(str::to_owned),
        }
    }
}

impl Default for GeolocationColumns {
    fn default() -> Self {
        Self {
            latitude: "Latitude".to_owned(),
            longitude: "Longitude".to_owned(),
            altitude: "Altitude".to_owned(),
            easting: "Easting".to_owned(),
            northing: "Northing".to_owned(),
        }
    }
}

impl Schema {
    #[must_use]
    pub fn alive_column(&self, year: u16) -> String {
        format!("{}{year}", self.alive_column_prefix)
    }
}

/// Flower color phenotype category.
///
/// The declaration order is the canonical category order used for sorting
/// and reporting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PhenoCategory {
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "FR")]
    FullRed,
    #[serde(rename = "WO")]
    WeakOrange,
    #[serde(rename = "WR")]
    WeakRed,
    #[serde(rename = "FO")]
    FullOrange,
    #[serde(rename = "W")]
    White,
}

impl PhenoCategory {
    pub const ALL: [Self; 6] = [
        Self::Yellow,
        Self::FullRed,
        Self::WeakOrange,
        Self::WeakRed,
        Self::FullOrange,
        Self::White,
    ];

    /// Short code as recorded in the category column.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Yellow => "Y",
            Self::FullRed => "FR",
            Self::WeakOrange => "WO",
            Self::WeakRed => "WR",
            Self::FullOrange => "FO",
            Self::White => "W",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yellow => "Yellow",
            Self::FullRed => "Full red",
            Self::WeakOrange => "Weak Orange",
            Self::WeakRed => "Weak red",
            Self::FullOrange => "Full Orange",
            Self::White => "White",
        }
    }

    /// Looks up a category by its exact code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Position in [`PhenoCategory::ALL`].
    #[must_use]
    pub const fn rank(self) -> usize {
        self as usize
    }
}
