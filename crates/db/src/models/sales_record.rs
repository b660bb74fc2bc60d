//! Sales record entity model: monthly sales figures for one book.

use risuspubl_core::entity::{unknown_field, Entity, EntityKind};
use risuspubl_core::error::CoreError;
use risuspubl_core::types::DbId;
use risuspubl_core::validation::{Bounds, ParamSpec, ParamType, ParamValue, ValidatedParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sales_records` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SalesRecord {
    pub sales_record_id: DbId,
    pub book_id: DbId,
    pub year: i64,
    pub month: i64,
    pub copies_sold: i64,
    pub gross_profit: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSalesRecord {
    pub book_id: DbId,
    pub year: i64,
    pub month: i64,
    pub copies_sold: i64,
    pub gross_profit: f64,
    pub net_profit: f64,
}

impl Entity for SalesRecord {
    type New = NewSalesRecord;

    const KIND: EntityKind = EntityKind::SalesRecord;

    const PARAMS: &'static [ParamSpec] = &[
        ParamSpec::required("book_id", ParamType::Int, Bounds::Default),
        ParamSpec::required("year", ParamType::Int, Bounds::int(1990, 2099)),
        ParamSpec::required("month", ParamType::Int, Bounds::int(1, 12)),
        ParamSpec::required("copies_sold", ParamType::Int, Bounds::int_at_least(0)),
        ParamSpec::required("gross_profit", ParamType::Float, Bounds::float_at_least(0.0)),
        ParamSpec::required("net_profit", ParamType::Float, Bounds::float_at_least(0.0)),
    ];

    fn id(&self) -> DbId {
        self.sales_record_id
    }

    fn build(mut values: ValidatedParams) -> Result<NewSalesRecord, CoreError> {
        Ok(NewSalesRecord {
            book_id: values.required("book_id")?,
            year: values.required("year")?,
            month: values.required("month")?,
            copies_sold: values.required("copies_sold")?,
            gross_profit: values.required("gross_profit")?,
            net_profit: values.required("net_profit")?,
        })
    }

    fn assign(&mut self, field: &str, value: ParamValue) -> Result<(), CoreError> {
        match field {
            "book_id" => self.book_id = value.into_field(field)?,
            "year" => self.year = value.into_field(field)?,
            "month" => self.month = value.into_field(field)?,
            "copies_sold" => self.copies_sold = value.into_field(field)?,
            "gross_profit" => self.gross_profit = value.into_field(field)?,
            "net_profit" => self.net_profit = value.into_field(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}
