//! Price rule entity: one published version of a fare type's tariff

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Price rule model
///
/// Money columns hold canonical decimal strings (e.g. `"1.80"`) so no
/// binary floating point ever touches a tariff.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_rules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// City administrative code, e.g. "110000"
    pub city_code: String,

    pub vehicle_type: String,

    /// `{city_code}${vehicle_type}`
    pub fare_type: String,

    /// Unique together with `fare_type`
    pub fare_version: i32,

    pub start_fare: String,

    /// Kilometres included in the start fare
    pub start_mile: i32,

    pub unit_price_per_mile: String,

    pub unit_price_per_minute: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
