//! Infrastructure storage layer - `SeaORM` persistence for bugs.
//!
//! - `entity` - `SeaORM` entity for the `bugs` table
//! - `mapper` - conversions between the entity and the SDK `Bug` model
//! - `migrations` - schema migrations
//! - `sea_orm_repo` - `BugsRepository` implementation

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;

pub use sea_orm_repo::OrmBugsRepository;

use sea_orm::DbErr;

use crate::domain::error::DomainError;

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::database(e.to_string())
}
