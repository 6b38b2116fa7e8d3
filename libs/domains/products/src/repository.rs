use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};

/// Persistence gateway for products.
///
/// Implementations: [`PgProductRepository`](crate::postgres::PgProductRepository)
/// for PostgreSQL and [`InMemoryProductRepository`] for tests and local runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// First product whose name equals `name` exactly (case-sensitive, no trimming).
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// Insert a product and return it with its assigned id.
    ///
    /// Fails with `DuplicateName` if the name is already taken.
    async fn save(&self, product: NewProduct) -> ProductResult<Product>;
}

/// Process-local store. Ids start at 1 and increase monotonically.
#[derive(Default)]
pub struct InMemoryProductRepository {
    state: RwLock<InMemoryState>,
}

#[derive(Default)]
struct InMemoryState {
    products: Vec<Product>,
    last_id: i64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.iter().find(|p| p.name == name).cloned())
    }

    async fn save(&self, product: NewProduct) -> ProductResult<Product> {
        let mut state = self.state.write().await;
        if state.products.iter().any(|p| p.name == product.name) {
            return Err(ProductError::DuplicateName(product.name));
        }

        state.last_id += 1;
        let stored = Product {
            id: state.last_id,
            name: product.name,
            description: product.description,
            price: product.price,
        };
        state.products.push(stored.clone());
        Ok(stored)
    }
}
