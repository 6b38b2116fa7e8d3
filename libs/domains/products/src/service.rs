use std::sync::Arc;
use tracing::instrument;

use crate::error::{ErrorKind, ProductError, ProductResult};
use crate::models::{AddProductRequest, Product};
use crate::repository::ProductRepository;

/// Catalog operations: lookup by name and validated, unique-name creation.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Look a product up by its exact name.
    ///
    /// `Ok(None)` means the query succeeded and nothing matched.
    #[instrument(skip(self))]
    pub async fn get_product(&self, name: &str) -> ProductResult<Option<Product>> {
        if name.trim().is_empty() {
            return Err(ProductError::InvalidRequest(
                "Product name must not be blank".to_string(),
            ));
        }

        let product = self
            .repository
            .find_by_name(name)
            .await
            .inspect_err(log_storage_failure)?;
        if product.is_none() {
            tracing::debug!("No product found");
        }
        Ok(product)
    }

    /// Validate and store a new product.
    ///
    /// Checks run in order (body present, name, price) and stop at the first
    /// failure. The name is trimmed before the uniqueness check and storage.
    #[instrument(skip(self, request))]
    pub async fn add_product(&self, request: Option<AddProductRequest>) -> ProductResult<Product> {
        let request = request.ok_or_else(|| {
            ProductError::InvalidRequest("Request body is required".to_string())
        })?;

        if let Some(violation) = request.violations().into_iter().next() {
            return Err(ProductError::InvalidRequest(violation.message.to_string()));
        }

        let new_product = request.into_new_product().ok_or_else(|| {
            ProductError::Internal("validated request lost a required field".to_string())
        })?;

        if let Some(existing) = self
            .repository
            .find_by_name(&new_product.name)
            .await
            .inspect_err(log_storage_failure)?
        {
            tracing::info!(
                existing_id = existing.id,
                name = %new_product.name,
                "Product name already taken"
            );
            return Err(ProductError::DuplicateName(new_product.name));
        }

        let product = self
            .repository
            .save(new_product)
            .await
            .inspect_err(log_storage_failure)?;
        tracing::info!(product_id = product.id, name = %product.name, "Product added");
        Ok(product)
    }
}

fn log_storage_failure(err: &ProductError) {
    if err.kind() == ErrorKind::Internal {
        tracing::error!(error = %err, "Product storage failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewProduct;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use tracing_test::traced_test;

    fn stored(id: i64, name: &str, price: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            price,
        }
    }

    /// Mock that fails the test if storage is touched.
    fn untouched_repo() -> MockProductRepository {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_name().never();
        mock_repo.expect_save().never();
        mock_repo
    }

    #[tokio::test]
    async fn test_get_product_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_name()
            .with(eq("Widget"))
            .times(1)
            .returning(|_| Ok(Some(stored(1, "Widget", 9.99))));

        let service = ProductService::new(mock_repo);
        let product = service.get_product("Widget").await.unwrap().unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.price, 9.99);
    }

    #[tokio::test]
    async fn test_get_product_missing_is_none() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_name()
            .with(eq("Nonexistent"))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        assert!(service.get_product("Nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_product_uses_name_as_given() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_name()
            .with(eq(" Widget "))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        assert!(service.get_product(" Widget ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_product_blank_name_skips_storage() {
        let service = ProductService::new(untouched_repo());

        for name in ["", "   ", "\t\n"] {
            let err = service.get_product(name).await.unwrap_err();
            assert!(matches!(err, ProductError::InvalidRequest(_)));
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_get_product_storage_failure_is_internal() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_name()
            .returning(|_| Err(ProductError::Database("connection refused".to_string())));

        let service = ProductService::new(mock_repo);
        let err = service.get_product("Widget").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(logs_contain("Product storage failed"));
        assert!(logs_contain("connection refused"));
    }

    #[tokio::test]
    async fn test_add_product_creates_with_trimmed_name() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_name()
            .with(eq("Widget"))
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_save()
            .withf(|p: &NewProduct| p.name == "Widget" && p.price == 9.99)
            .times(1)
            .returning(|p| Ok(stored(42, &p.name, p.price)));

        let service = ProductService::new(mock_repo);
        let product = service
            .add_product(Some(AddProductRequest::new("  Widget  ", 9.99)))
            .await
            .unwrap();

        assert_eq!(product.id, 42);
        assert_eq!(product.name, "Widget");
    }

    #[tokio::test]
    async fn test_add_product_keeps_description() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_name().returning(|_| Ok(None));
        mock_repo
            .expect_save()
            .withf(|p: &NewProduct| p.description.as_deref() == Some("blue"))
            .times(1)
            .returning(|p| {
                Ok(Product {
                    id: 3,
                    name: p.name,
                    description: p.description,
                    price: p.price,
                })
            });

        let service = ProductService::new(mock_repo);
        let request = AddProductRequest::new("Widget", 1.5).with_description("blue");
        let product = service.add_product(Some(request)).await.unwrap();

        assert_eq!(product.description.as_deref(), Some("blue"));
    }

    #[tokio::test]
    async fn test_add_product_duplicate_name_skips_save() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_name()
            .with(eq("Widget"))
            .returning(|_| Ok(Some(stored(1, "Widget", 9.99))));
        mock_repo.expect_save().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .add_product(Some(AddProductRequest::new("Widget", 5.0)))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::DuplicateName(name) if name == "Widget"));
    }

    #[tokio::test]
    async fn test_add_product_invalid_requests_skip_storage() {
        let service = ProductService::new(untouched_repo());

        let cases = [
            None,
            Some(AddProductRequest::new("", 1.0)),
            Some(AddProductRequest::new("   ", 1.0)),
            Some(AddProductRequest::new("X", -1.0)),
            Some(AddProductRequest {
                name: Some("X".to_string()),
                price: None,
                description: None,
            }),
        ];

        for request in cases {
            let err = service.add_product(request).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        }
    }

    #[tokio::test]
    async fn test_add_product_reports_name_before_price() {
        let service = ProductService::new(untouched_repo());

        let err = service
            .add_product(Some(AddProductRequest::new(" ", -5.0)))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::InvalidRequest(msg) if msg.contains("name")));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_add_product_save_failure_is_internal() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_name().returning(|_| Ok(None));
        mock_repo
            .expect_save()
            .returning(|_| Err(ProductError::Database("disk full".to_string())));

        let service = ProductService::new(mock_repo);
        let err = service
            .add_product(Some(AddProductRequest::new("Widget", 9.99)))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(logs_contain("disk full"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_add_product_store_side_duplicate_is_conflict() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_name()
            .with(eq("Widget"))
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_save()
            .times(1)
            .returning(|p| Err(ProductError::DuplicateName(p.name)));

        let service = ProductService::new(mock_repo);
        let err = service
            .add_product(Some(AddProductRequest::new("Widget", 9.99)))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(matches!(err, ProductError::DuplicateName(name) if name == "Widget"));
        assert!(!logs_contain("Product storage failed"));
    }
}
