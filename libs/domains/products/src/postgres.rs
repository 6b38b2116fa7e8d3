use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NewProduct, Product},
    repository::ProductRepository,
};

/// [`ProductRepository`] backed by the `products` table.
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn save(&self, product: NewProduct) -> ProductResult<Product> {
        let name = product.name.clone();
        let active_model: entity::ActiveModel = product.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ProductError::from_insert(e, &name))?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn row(id: i64, name: &str) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            description: None,
            price: 9.99,
        }
    }

    #[tokio::test]
    async fn test_find_by_name_maps_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(7, "Widget")]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.find_by_name("Widget").await.unwrap().unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.description, None);
    }

    #[tokio::test]
    async fn test_find_by_name_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.find_by_name("Nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "Widget")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo
            .save(NewProduct {
                name: "Widget".to_string(),
                description: None,
                price: 9.99,
            })
            .await
            .unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.price, 9.99);
    }

    #[tokio::test]
    async fn test_query_failure_is_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.find_by_name("Widget").await.unwrap_err();
        assert!(matches!(err, ProductError::Database(msg) if msg.contains("connection reset")));
    }
}
