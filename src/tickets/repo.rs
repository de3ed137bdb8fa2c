use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub ticket_type: String,
    pub credits_charged: i32,
    pub issued_at: OffsetDateTime,
    pub event_name: String,
    pub holder_name: String,
    pub email: String,
    pub phone: String,
    pub seat_number: String,
    pub status: String,
    pub is_sold: bool,
}

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub ticket_type: String,
    pub credits_charged: i32,
    pub event_name: String,
    pub holder_name: String,
    pub email: String,
    pub phone: String,
    pub seat_number: String,
    pub status: String,
    pub is_sold: bool,
}

/// Inserts one ticket; `id` and `issued_at` are assigned by the database.
pub async fn insert_ticket(db: &PgPool, ticket: &NewTicket) -> anyhow::Result<Ticket> {
    let row = sqlx::query_as::<_, Ticket>(
        r#"
        INSERT INTO tickets
            (ticket_type, credits_charged, event_name, holder_name,
             email, phone, seat_number, status, is_sold)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, ticket_type, credits_charged, issued_at, event_name,
                  holder_name, email, phone, seat_number, status, is_sold
        "#,
    )
    .bind(&ticket.ticket_type)
    .bind(ticket.credits_charged)
    .bind(&ticket.event_name)
    .bind(&ticket.holder_name)
    .bind(&ticket.email)
    .bind(&ticket.phone)
    .bind(&ticket.seat_number)
    .bind(&ticket.status)
    .bind(ticket.is_sold)
    .fetch_one(db)
    .await?;
    Ok(row)
}
