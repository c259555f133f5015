//! Read-side port over the token, branch and wine store.
//!
//! The guest menu service needs exactly three lookups. Rows come back
//! unvalidated; lifecycle rules live in the domain.

use async_trait::async_trait;

use crate::domain::{ErrorCode, QrToken, TokenRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading the catalogue store.
    pub enum MenuCatalogueRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "catalogue store connection failed: {message}" => ErrorCode::ServerError,
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "catalogue store query failed: {message}" => ErrorCode::ServerError,
    }
}

/// Branch row.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchRecord {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub owner_id: Option<String>,
}

/// Wine row joined onto a stock row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WineRecord {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub winery: Option<String>,
    pub grape_variety: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub vintage: Option<String>,
    pub wine_type: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub body_level: Option<f64>,
    pub sweetness_level: Option<f64>,
    pub acidity_level: Option<f64>,
    pub intensity_level: Option<f64>,
    pub fizziness_level: Option<f64>,
}

/// Per-branch stock row. `wine` is `None` when the join found nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRecord {
    pub wine_id: String,
    pub stock_quantity: i64,
    pub price_by_glass: Option<f64>,
    pub price_by_bottle: Option<f64>,
    pub wine: Option<WineRecord>,
}

/// Port for reading tokens, branches and stock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuCatalogueRepository: Send + Sync {
    /// Token row for `token`, if one exists.
    async fn find_token(
        &self,
        token: &QrToken,
    ) -> Result<Option<TokenRecord>, MenuCatalogueRepositoryError>;

    /// Branch row for `branch_id`, if one exists.
    async fn find_branch(
        &self,
        branch_id: &str,
    ) -> Result<Option<BranchRecord>, MenuCatalogueRepositoryError>;

    /// Every stock row of the branch in a stable order.
    async fn list_stock(
        &self,
        branch_id: &str,
    ) -> Result<Vec<StockRecord>, MenuCatalogueRepositoryError>;
}

/// Fixture implementation with an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMenuCatalogueRepository;

#[async_trait]
impl MenuCatalogueRepository for FixtureMenuCatalogueRepository {
    async fn find_token(
        &self,
        _token: &QrToken,
    ) -> Result<Option<TokenRecord>, MenuCatalogueRepositoryError> {
        Ok(None)
    }

    async fn find_branch(
        &self,
        _branch_id: &str,
    ) -> Result<Option<BranchRecord>, MenuCatalogueRepositoryError> {
        Ok(None)
    }

    async fn list_stock(
        &self,
        _branch_id: &str,
    ) -> Result<Vec<StockRecord>, MenuCatalogueRepositoryError> {
        Ok(Vec::new())
    }
}
