//! Parameterized SELECT builders for `station_facilities`.
//!
//! All user-supplied values go through sea-query value binding; nothing here
//! formats a filter value into SQL text.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ColumnTrait, DbBackend, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Select,
    Statement,
};

use crate::entities::{prelude::*, station_facilities};
use crate::models::{FilterCriteria, LineMatch};

const LIKE_ESCAPE: char = '\\';

/// Lookup query: line, then station, then kind, ordered by station name.
#[must_use]
pub fn lookup(criteria: &FilterCriteria) -> Select<StationFacilities> {
    let mut query = StationFacilities::find();

    if let Some(line) = criteria.line_name() {
        query = match criteria.line_match() {
            LineMatch::Exact => query.filter(station_facilities::Column::LineNm.eq(line)),
            LineMatch::Contains => query.filter(
                station_facilities::Column::LineNm
                    .like(LikeExpr::new(format!("%{}%", escape_like(line))).escape(LIKE_ESCAPE)),
            ),
        };
    }

    if let Some(station) = criteria.station_name() {
        query = query.filter(station_facilities::Column::StnNm.eq(station));
    }

    if let Some(kind) = criteria.facility_kind() {
        query = query.filter(station_facilities::Column::FcltKind.eq(kind));
    }

    query.order_by_asc(station_facilities::Column::StnNm)
}

/// Rows touched at or after `since`, newest first.
#[must_use]
pub fn updated_since(since: DateTime<Utc>) -> Select<StationFacilities> {
    StationFacilities::find()
        .filter(station_facilities::Column::UpdatedAt.gte(since))
        .order_by_desc(station_facilities::Column::UpdatedAt)
}

/// Distinct station names in ascending order.
#[must_use]
pub fn station_names() -> Select<StationFacilities> {
    StationFacilities::find()
        .select_only()
        .column(station_facilities::Column::StnNm)
        .distinct()
        .order_by_asc(station_facilities::Column::StnNm)
}

/// Renders the lookup query as SQL template plus ordered bind values.
#[must_use]
pub fn lookup_statement(backend: DbBackend, criteria: &FilterCriteria) -> Statement {
    lookup(criteria).build(backend)
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
