use crate::errors::PropertiesError;
use crate::settings::Database as DbCfg;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Connects to the configured store and brings its schema up to date.
pub async fn init(cfg: &DbCfg) -> Result<DatabaseConnection, PropertiesError> {
    let db = Database::connect(&cfg.url).await?;
    Migrator::up(&db, None).await?;
    tracing::info!("Database schema is up to date");
    Ok(db)
}
