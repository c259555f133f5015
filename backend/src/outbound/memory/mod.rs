//! In-memory catalogue store.
//!
//! Implements `MenuCatalogueRepository` over maps built once at startup,
//! optionally from a JSON fixture file:
//!
//! ```json
//! {
//!   "tokens":   [{ "token": "abc123", "type": "guest", "branch_id": "b-1",
//!                  "expires_at": "2030-01-01T00:00:00Z", "max_uses": 10, "current_uses": 0 }],
//!   "branches": [{ "id": "b-1", "name": "Centro", "owner_id": "o-1" }],
//!   "wines":    [{ "id": "w-1", "owner_id": "o-1", "name": "Rioja", "type": "red" }],
//!   "stock":    [{ "branch_id": "b-1", "wine_id": "w-1", "stock_quantity": 3,
//!                  "price_by_glass": 4.5 }]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::{
    BranchRecord, MenuCatalogueRepository, MenuCatalogueRepositoryError, StockRecord, WineRecord,
};
use crate::domain::{QrToken, TokenRecord};

/// Failures while loading a catalogue fixture.
#[derive(Debug, Error)]
pub enum CatalogueFixtureError {
    /// The file could not be read.
    #[error("failed to read catalogue fixture {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid fixture document.
    #[error("invalid catalogue fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FixtureDocument {
    tokens: Vec<TokenRow>,
    branches: Vec<BranchRow>,
    wines: Vec<WineRow>,
    stock: Vec<StockRow>,
}

#[derive(Debug, Deserialize)]
struct TokenRow {
    token: String,
    #[serde(rename = "type")]
    token_type: String,
    #[serde(default)]
    branch_id: Option<String>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    max_uses: Option<u32>,
    #[serde(default)]
    current_uses: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct BranchRow {
    id: String,
    name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    owner_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WineRow {
    id: String,
    owner_id: String,
    name: String,
    #[serde(default)]
    winery: Option<String>,
    #[serde(default)]
    grape_variety: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    vintage: Option<String>,
    #[serde(rename = "type", default)]
    wine_type: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    body_level: Option<f64>,
    #[serde(default)]
    sweetness_level: Option<f64>,
    #[serde(default)]
    acidity_level: Option<f64>,
    #[serde(default)]
    intensity_level: Option<f64>,
    #[serde(default)]
    fizziness_level: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct StockRow {
    branch_id: String,
    wine_id: String,
    stock_quantity: i64,
    #[serde(default)]
    price_by_glass: Option<f64>,
    #[serde(default)]
    price_by_bottle: Option<f64>,
}

impl From<WineRow> for WineRecord {
    fn from(row: WineRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            winery: row.winery,
            grape_variety: row.grape_variety,
            region: row.region,
            country: row.country,
            vintage: row.vintage,
            wine_type: row.wine_type,
            description: row.description,
            image_url: row.image_url,
            body_level: row.body_level,
            sweetness_level: row.sweetness_level,
            acidity_level: row.acidity_level,
            intensity_level: row.intensity_level,
            fizziness_level: row.fizziness_level,
        }
    }
}

/// Read-only catalogue held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMenuCatalogue {
    tokens: HashMap<String, TokenRecord>,
    branches: HashMap<String, BranchRecord>,
    stock: HashMap<String, Vec<StockRecord>>,
}

impl InMemoryMenuCatalogue {
    /// Load a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogueFixtureError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogueFixtureError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parse a fixture document.
    ///
    /// Stock rows keep document order within each branch. A stock row whose
    /// wine is not listed joins to nothing.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw` is not a valid fixture document.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogueFixtureError> {
        let document: FixtureDocument = serde_json::from_str(raw)?;
        let wines: HashMap<String, WineRecord> = document
            .wines
            .into_iter()
            .map(|row| (row.id.clone(), WineRecord::from(row)))
            .collect();

        let tokens = document
            .tokens
            .into_iter()
            .map(|row| {
                (
                    row.token,
                    TokenRecord {
                        token_type: row.token_type,
                        branch_id: row.branch_id,
                        expires_at: row.expires_at,
                        max_uses: row.max_uses,
                        current_uses: row.current_uses,
                    },
                )
            })
            .collect();

        let branches = document
            .branches
            .into_iter()
            .map(|row| {
                (
                    row.id.clone(),
                    BranchRecord {
                        id: row.id,
                        name: row.name,
                        address: row.address,
                        owner_id: row.owner_id,
                    },
                )
            })
            .collect();

        let mut stock: HashMap<String, Vec<StockRecord>> = HashMap::new();
        for row in document.stock {
            let wine = wines.get(&row.wine_id).cloned();
            stock.entry(row.branch_id).or_default().push(StockRecord {
                wine_id: row.wine_id,
                stock_quantity: row.stock_quantity,
                price_by_glass: row.price_by_glass,
                price_by_bottle: row.price_by_bottle,
                wine,
            });
        }

        Ok(Self {
            tokens,
            branches,
            stock,
        })
    }

    /// Number of tokens held.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

#[async_trait]
impl MenuCatalogueRepository for InMemoryMenuCatalogue {
    async fn find_token(
        &self,
        token: &QrToken,
    ) -> Result<Option<TokenRecord>, MenuCatalogueRepositoryError> {
        Ok(self.tokens.get(token.as_str()).cloned())
    }

    async fn find_branch(
        &self,
        branch_id: &str,
    ) -> Result<Option<BranchRecord>, MenuCatalogueRepositoryError> {
        Ok(self.branches.get(branch_id).cloned())
    }

    async fn list_stock(
        &self,
        branch_id: &str,
    ) -> Result<Vec<StockRecord>, MenuCatalogueRepositoryError> {
        Ok(self.stock.get(branch_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "tokens": [
            { "token": "abc123", "type": "guest", "branch_id": "b-1",
              "expires_at": "2030-01-01T00:00:00Z", "max_uses": 5, "current_uses": 1 }
        ],
        "branches": [{ "id": "b-1", "name": "Centro", "owner_id": "o-1" }],
        "wines": [{ "id": "w-1", "owner_id": "o-1", "name": "Rioja", "type": "red" }],
        "stock": [
            { "branch_id": "b-1", "wine_id": "w-1", "stock_quantity": 3, "price_by_glass": 4.5 },
            { "branch_id": "b-1", "wine_id": "w-missing", "stock_quantity": 1 }
        ]
    }"#;

    #[fixture]
    fn catalogue() -> InMemoryMenuCatalogue {
        InMemoryMenuCatalogue::from_json_str(FIXTURE).expect("fixture parses")
    }

    #[rstest]
    #[tokio::test]
    async fn finds_tokens_and_branches(catalogue: InMemoryMenuCatalogue) {
        let token = QrToken::new("abc123").expect("valid token");
        let record = catalogue
            .find_token(&token)
            .await
            .expect("lookup")
            .expect("token exists");
        assert_eq!(record.token_type, "guest");
        assert_eq!(record.max_uses, Some(5));

        let branch = catalogue
            .find_branch("b-1")
            .await
            .expect("lookup")
            .expect("branch exists");
        assert_eq!(branch.owner_id.as_deref(), Some("o-1"));
        assert!(catalogue.find_branch("b-2").await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn stock_joins_wines_in_document_order(catalogue: InMemoryMenuCatalogue) {
        let stock = catalogue.list_stock("b-1").await.expect("lookup");
        assert_eq!(stock.len(), 2);
        assert_eq!(
            stock[0].wine.as_ref().map(|wine| wine.name.as_str()),
            Some("Rioja")
        );
        assert!(stock[1].wine.is_none());
        assert!(catalogue.list_stock("b-2").await.expect("lookup").is_empty());
    }

    #[rstest]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(FIXTURE.as_bytes()).expect("write fixture");
        let catalogue = InMemoryMenuCatalogue::load(file.path()).expect("loads");
        assert_eq!(catalogue.token_count(), 1);
    }

    #[rstest]
    #[case::not_json("tokens")]
    #[case::bad_date(r#"{"tokens":[{"token":"t","type":"guest","expires_at":"soon"}]}"#)]
    fn rejects_invalid_documents(#[case] raw: &str) {
        assert!(matches!(
            InMemoryMenuCatalogue::from_json_str(raw),
            Err(CatalogueFixtureError::Parse(_))
        ));
    }

    #[rstest]
    fn missing_file_is_a_read_error() {
        let err = InMemoryMenuCatalogue::load(Path::new("/nonexistent/catalogue.json"))
            .expect_err("missing file");
        assert!(matches!(err, CatalogueFixtureError::Read { .. }));
    }
}
