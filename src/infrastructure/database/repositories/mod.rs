//! SeaORM-backed repository implementations

pub mod employee_repository;
pub mod sale_repository;
pub mod spare_repository;
pub mod user_repository;

pub use employee_repository::EmployeeRepository;
pub use sale_repository::SaleRepository;
pub use spare_repository::SpareRepository;
pub use user_repository::UserRepository;

use crate::domain::DomainError;

/// Map a database error into the domain taxonomy.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::migrator::Migrator;

    /// Fresh in-memory database with the real schema.
    ///
    /// The pool is pinned to one connection: every pooled `sqlite::memory:`
    /// connection is a distinct database, so a larger pool would hand out
    /// connections that never saw the migrations.
    pub async fn setup_db() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);

        let db = Database::connect(opts)
            .await
            .expect("connect to in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        db
    }
}
