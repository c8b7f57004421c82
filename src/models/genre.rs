use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Genre model for reading from database
///
/// `deleted_at` is the soft-delete marker; live rows have it unset.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::genres)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub deleted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Genre {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// NewGenre model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::genres)]
pub struct NewGenre {
    pub name: String,
}

/// UpdateGenre model for partial updates
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::genres)]
pub struct UpdateGenre {
    pub name: Option<String>,
}
