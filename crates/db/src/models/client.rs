//! Client entity model.

use risuspubl_core::entity::{unknown_field, Entity, EntityKind};
use risuspubl_core::error::CoreError;
use risuspubl_core::types::DbId;
use risuspubl_core::validation::{Bounds, ParamSpec, ParamType, ParamValue, ValidatedParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clients` table. Every client is served by one salesperson.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Client {
    pub client_id: DbId,
    pub salesperson_id: DbId,
    pub email_address: String,
    pub phone_number: String,
    pub business_name: String,
    pub street_address: String,
    pub city: String,
    pub state_or_province: String,
    pub zipcode: String,
    pub country: String,
}

/// A client not yet inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub salesperson_id: DbId,
    pub email_address: String,
    pub phone_number: String,
    pub business_name: String,
    pub street_address: String,
    pub city: String,
    pub state_or_province: String,
    pub zipcode: String,
    pub country: String,
}

impl Entity for Client {
    type New = NewClient;

    const KIND: EntityKind = EntityKind::Client;

    const PARAMS: &'static [ParamSpec] = &[
        ParamSpec::required("salesperson_id", ParamType::Int, Bounds::Default),
        ParamSpec::required("email_address", ParamType::Str, Bounds::Default),
        ParamSpec::required("phone_number", ParamType::Str, Bounds::length(11, 11)),
        ParamSpec::required("business_name", ParamType::Str, Bounds::Default),
        ParamSpec::required("street_address", ParamType::Str, Bounds::Default),
        ParamSpec::required("city", ParamType::Str, Bounds::Default),
        ParamSpec::required("state_or_province", ParamType::Str, Bounds::length(2, 4)),
        ParamSpec::required("zipcode", ParamType::Str, Bounds::length(5, 9)),
        ParamSpec::required("country", ParamType::Str, Bounds::Default),
    ];

    fn id(&self) -> DbId {
        self.client_id
    }

    fn build(mut values: ValidatedParams) -> Result<NewClient, CoreError> {
        Ok(NewClient {
            salesperson_id: values.required("salesperson_id")?,
            email_address: values.required("email_address")?,
            phone_number: values.required("phone_number")?,
            business_name: values.required("business_name")?,
            street_address: values.required("street_address")?,
            city: values.required("city")?,
            state_or_province: values.required("state_or_province")?,
            zipcode: values.required("zipcode")?,
            country: values.required("country")?,
        })
    }

    fn assign(&mut self, field: &str, value: ParamValue) -> Result<(), CoreError> {
        let slot = match field {
            "salesperson_id" => {
                self.salesperson_id = value.into_field(field)?;
                return Ok(());
            }
            "email_address" => &mut self.email_address,
            "phone_number" => &mut self.phone_number,
            "business_name" => &mut self.business_name,
            "street_address" => &mut self.street_address,
            "city" => &mut self.city,
            "state_or_province" => &mut self.state_or_province,
            "zipcode" => &mut self.zipcode,
            "country" => &mut self.country,
            _ => return Err(unknown_field(Self::KIND, field)),
        };
        *slot = value.into_field(field)?;
        Ok(())
    }
}
