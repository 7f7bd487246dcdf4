/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stable identity string handed over by the identity provider
/// (the `sub` claim of the bearer token).
pub type Identity = String;
