use tracing::info;

use crate::error::DbError;
use crate::pool::Database;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BLOB PRIMARY KEY NOT NULL,
    email TEXT NOT NULL UNIQUE,
    hashed_password TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('admin', 'receptionist')),
    created_at TEXT NOT NULL
)"#;

const CREATE_PROFESSIONALS: &str = r#"
CREATE TABLE IF NOT EXISTS professionals (
    id BLOB PRIMARY KEY NOT NULL,
    full_name TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('nurse', 'assistant')),
    created_at TEXT NOT NULL
)"#;

const CREATE_TREATMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS treatments (
    id BLOB PRIMARY KEY NOT NULL,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
    price_cents INTEGER NOT NULL CHECK (price_cents >= 0),
    created_at TEXT NOT NULL
)"#;

const CREATE_PATIENTS: &str = r#"
CREATE TABLE IF NOT EXISTS patients (
    id BLOB PRIMARY KEY NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT UNIQUE,
    phone TEXT NOT NULL,
    birth_date TEXT,
    created_at TEXT NOT NULL
)"#;

const CREATE_BOOKINGS: &str = r#"
CREATE TABLE IF NOT EXISTS bookings (
    id BLOB PRIMARY KEY NOT NULL,
    date TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    attention_status TEXT NOT NULL DEFAULT 'confirmed'
        CHECK (attention_status IN ('scheduled', 'confirmed', 'waiting', 'attended')),
    payment_status TEXT NOT NULL DEFAULT 'pending'
        CHECK (payment_status IN ('paid', 'pending')),
    created_at TEXT NOT NULL,
    patient_id BLOB NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
    professional_id BLOB NOT NULL REFERENCES professionals(id) ON DELETE CASCADE,
    treatment_id BLOB NOT NULL REFERENCES treatments(id) ON DELETE CASCADE
)"#;

const CREATE_BOOKING_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_bookings_patient ON bookings(patient_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_professional ON bookings(professional_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_treatment ON bookings(treatment_id)",
];

/// Creates any missing table. Safe to run on every start.
pub async fn bootstrap(db: &Database) -> Result<(), DbError> {
    let mut tx = db.pool().begin().await?;

    for statement in [
        CREATE_USERS,
        CREATE_PROFESSIONALS,
        CREATE_TREATMENTS,
        CREATE_PATIENTS,
        CREATE_BOOKINGS,
    ]
    .into_iter()
    .chain(CREATE_BOOKING_INDEXES)
    {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;
    info!("Database schema ready");
    Ok(())
}
