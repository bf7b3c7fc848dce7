//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    domain::products::{
        data::NewProduct, errors::ProductsServiceError, filter::ProductFilter,
        records::ProductRecord, repository::PgProductsRepository,
    },
    pagination::{Page, PageRequest, offset},
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    pool: PgPool,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.pool.begin().await?;

        let count = u64::try_from(self.repository.count_products(&mut tx, &filter).await?)?;
        let number = page.resolve(count)?;

        let products = self
            .repository
            .list_products(
                &mut tx,
                &filter,
                i64::try_from(page.size)?,
                i64::try_from(offset(number, page.size))?,
            )
            .await?;

        tx.commit().await?;

        Ok(Page::new(products, count, number, page.size))
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.pool.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves one page of products matching `filter`, ordered by ascending id.
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
