//! Repository for the `clients` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::PgEntity;
use crate::models::client::{Client, NewClient};

const COLUMNS: &str = "client_id, salesperson_id, email_address, phone_number, business_name, \
                       street_address, city, state_or_province, zipcode, country";

pub struct ClientRepo;

impl ClientRepo {
    pub async fn create(conn: &mut PgConnection, input: &NewClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (salesperson_id, email_address, phone_number, business_name,
                                  street_address, city, state_or_province, zipcode, country)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(input.salesperson_id)
            .bind(&input.email_address)
            .bind(&input.phone_number)
            .bind(&input.business_name)
            .bind(&input.street_address)
            .bind(&input.city)
            .bind(&input.state_or_province)
            .bind(&input.zipcode)
            .bind(&input.country)
            .fetch_one(conn)
            .await
    }

    pub async fn update(conn: &mut PgConnection, client: &Client) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                salesperson_id = $2,
                email_address = $3,
                phone_number = $4,
                business_name = $5,
                street_address = $6,
                city = $7,
                state_or_province = $8,
                zipcode = $9,
                country = $10
             WHERE client_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(client.client_id)
            .bind(client.salesperson_id)
            .bind(&client.email_address)
            .bind(&client.phone_number)
            .bind(&client.business_name)
            .bind(&client.street_address)
            .bind(&client.city)
            .bind(&client.state_or_province)
            .bind(&client.zipcode)
            .bind(&client.country)
            .fetch_optional(conn)
            .await
    }
}

#[async_trait]
impl PgEntity for Client {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert(conn: &mut PgConnection, new: &NewClient) -> Result<Self, sqlx::Error> {
        ClientRepo::create(conn, new).await
    }

    async fn update(conn: &mut PgConnection, entity: &Self) -> Result<Option<Self>, sqlx::Error> {
        ClientRepo::update(conn, entity).await
    }
}
