/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Calendar dates (publication dates, due dates) carry no time component.
pub type Date = chrono::NaiveDate;
