//! Structured view of one table row.
//!
//! A [`Sample`] is projected on demand from a [`Row`] and the active marker
//! order. It is never cached: after a re-sort or reorder, projecting again
//! gives the new view.
//!
//! Numeric fields are read with [`Reading::parse`]. Unparsable values are
//! kept as [`Reading::NotANumber`] instead of failing the projection.

use std::collections::BTreeMap;

use serde::Serialize;
use snapzone_stats::reading::Reading;

use crate::{
    schema::{PhenoCategory, Schema},
    table::Row,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub id: String,
    /// Years whose survival flag reads exactly 1, ascending.
    pub years_alive: Vec<u16>,
    pub year_first: Option<u16>,
    pub year_last: Option<u16>,
    /// Raw survival flag per year; not validated.
    pub alive_by_year: BTreeMap<u16, Reading>,
    /// Marker readings in active order.
    pub markers: Vec<MarkerReading>,
    pub color: Color,
    pub geolocation: Geolocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerReading {
    pub name: String,
    pub value: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Color {
    pub red: Reading,
    pub yellow: Reading,
    /// Category code as recorded; may be outside the known categories.
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geolocation {
    pub lat: Reading,
    pub long: Reading,
    pub altitude: Reading,
    pub easting: Reading,
    pub northing: Reading,
}

impl Sample {
    /// Projects `row` into a sample using the given marker order.
    ///
    /// Missing text fields become empty strings, missing numeric fields
    /// become [`Reading::NotANumber`].
    #[must_use]
    pub fn project(row: &Row, schema: &Schema, active_order: &[String]) -> Self {
        let number = |column: &str| Reading::parse_field(row.get(column));
        let text = |column: &str| row.get(column).unwrap_or_default().to_owned();

        let alive_by_year = schema
            .years
            .iter()
            .map(|&year| (year, number(&schema.alive_column(year))))
            .collect::<BTreeMap<_, _>>();
        // map iteration is ascending by year
        let years_alive = alive_by_year
            .iter()
            .filter(|(_, flag)| flag.is_exactly(1.0))
            .map(|(year, _)| *year)
            .collect::<Vec<_>>();

        let markers = active_order
            .iter()
            .map(|name| MarkerReading {
                name: name.clone(),
                value: number(name),
            })
            .collect();

        let geo = &schema.geolocation;
        Self {
            id: text(&schema.id_column),
            year_first: years_alive.first().copied(),
            year_last: years_alive.last().copied(),
            years_alive,
            alive_by_year,
            markers,
            color: Color {
                red: number(&schema.red_column),
                yellow: number(&schema.yellow_column),
                category: text(&schema.category_column),
            },
            geolocation: Geolocation {
                lat: number(&geo.latitude),
                long: number(&geo.longitude),
                altitude: number(&geo.altitude),
                easting: number(&geo.easting),
                northing: number(&geo.northing),
            },
        }
    }

    /// Reading for a marker in the active order.
    #[must_use]
    pub fn marker(&self, name: &str) -> Option<Reading> {
        self.markers
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }
}

impl Color {
    #[must_use]
    pub fn known_category(&self) -> Option<PhenoCategory> {
        PhenoCategory::from_code(&self.category)
    }
}
