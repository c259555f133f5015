//! Guest token authorization and menu assembly.
//!
//! Backs the in-process `public-menu` endpoint. Lifecycle rules are applied
//! in a fixed order: type, expiry, use count, branch. Expiry and exhausted
//! uses share the `token_expired` wire code.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    BranchRecord, MenuCatalogueRepository, MenuCatalogueRepositoryError, StockRecord,
};
use crate::domain::{Branch, ErrorCode, MenuResult, QrToken, Wine, WineCategory};

/// Token type that unlocks a guest menu.
pub const GUEST_TOKEN_TYPE: &str = "guest";

/// Token row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub token_type: String,
    pub branch_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<u32>,
    pub current_uses: Option<u32>,
}

/// Apply the guest lifecycle rules, returning the branch to serve.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use menu_viewer::domain::{ErrorCode, TokenRecord, authorize_guest};
///
/// let record = TokenRecord {
///     token_type: "guest".into(),
///     branch_id: Some("b-1".into()),
///     expires_at: None,
///     max_uses: Some(3),
///     current_uses: Some(3),
/// };
/// assert_eq!(authorize_guest(&record, Utc::now()), Err(ErrorCode::TokenExpired));
/// ```
pub fn authorize_guest(record: &TokenRecord, now: DateTime<Utc>) -> Result<&str, ErrorCode> {
    if record.token_type != GUEST_TOKEN_TYPE {
        return Err(ErrorCode::NotGuest);
    }
    if record.expires_at.is_some_and(|expires_at| expires_at <= now) {
        return Err(ErrorCode::TokenExpired);
    }
    if let (Some(max_uses), Some(current_uses)) = (record.max_uses, record.current_uses) {
        if current_uses >= max_uses {
            return Err(ErrorCode::TokenExpired);
        }
    }
    record
        .branch_id
        .as_deref()
        .filter(|branch_id| !branch_id.trim().is_empty())
        .ok_or(ErrorCode::NotFound)
}

/// Resolves guest tokens against the catalogue store.
#[derive(Clone)]
pub struct GuestMenuService {
    repository: Arc<dyn MenuCatalogueRepository>,
    clock: Arc<dyn Clock>,
}

impl GuestMenuService {
    /// Create the service over a store and a clock.
    pub fn new(repository: Arc<dyn MenuCatalogueRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Authorize `token` and assemble its branch menu.
    pub async fn resolve(&self, token: &QrToken) -> Result<MenuResult, ErrorCode> {
        let prefix = token.log_prefix();
        let record = self
            .repository
            .find_token(token)
            .await
            .map_err(|err| store_failure("token lookup", &prefix, &err))?
            .ok_or(ErrorCode::NotFound)?;

        let branch_id = authorize_guest(&record, self.clock.utc()).inspect_err(|code| {
            info!(token = %prefix, %code, "guest token refused");
        })?;

        let branch = self
            .repository
            .find_branch(branch_id)
            .await
            .map_err(|err| store_failure("branch lookup", &prefix, &err))?
            .ok_or(ErrorCode::NotFound)?;
        let owner_id = branch
            .owner_id
            .clone()
            .filter(|owner| !owner.trim().is_empty())
            .ok_or(ErrorCode::NotFound)?;

        let stock = self
            .repository
            .list_stock(branch_id)
            .await
            .map_err(|err| store_failure("stock listing", &prefix, &err))?;

        let wines = stock
            .into_iter()
            .filter_map(|row| wine_from_stock(row, &owner_id))
            .collect();
        Ok(MenuResult {
            branch: into_branch(branch),
            wines,
        })
    }
}

fn store_failure(stage: &'static str, prefix: &str, err: &MenuCatalogueRepositoryError) -> ErrorCode {
    error!(stage, token = %prefix, error = %err, "catalogue store failed");
    err.code()
}

fn into_branch(record: BranchRecord) -> Branch {
    Branch {
        id: record.id,
        name: record.name,
        address: record.address,
    }
}

/// Negative stock rows are dropped. A missing join, or a wine owned by
/// someone other than the branch owner, renders as a placeholder entry.
fn wine_from_stock(row: StockRecord, owner_id: &str) -> Option<Wine> {
    let stock_quantity = u32::try_from(row.stock_quantity).ok()?;
    let wine = match row.wine.filter(|wine| wine.owner_id == owner_id) {
        Some(wine) => Wine {
            id: wine.id,
            name: wine.name,
            winery: wine.winery,
            grape_variety: wine.grape_variety,
            region: wine.region,
            country: wine.country,
            vintage: wine.vintage,
            wine_type: wine
                .wine_type
                .unwrap_or_else(|| WineCategory::Other.as_str().to_owned()),
            description: wine.description,
            image_url: wine.image_url,
            body_level: wine.body_level,
            sweetness_level: wine.sweetness_level,
            acidity_level: wine.acidity_level,
            intensity_level: wine.intensity_level,
            fizziness_level: wine.fizziness_level,
            stock_quantity,
            price_by_glass: row.price_by_glass,
            price_by_bottle: row.price_by_bottle,
        },
        None => Wine {
            id: row.wine_id,
            name: String::new(),
            winery: None,
            grape_variety: None,
            region: None,
            country: None,
            vintage: None,
            wine_type: WineCategory::Other.as_str().to_owned(),
            description: None,
            image_url: None,
            body_level: None,
            sweetness_level: None,
            acidity_level: None,
            intensity_level: None,
            fizziness_level: None,
            stock_quantity,
            price_by_glass: row.price_by_glass,
            price_by_bottle: row.price_by_bottle,
        },
    };
    Some(wine)
}
