//! Response bodies for the guest-facing views.
//!
//! Views carry everything a client needs to render: the menu or the staff
//! invite summary, plus links into the companion app.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AppLinks, Availability, Branch, Locale, MenuResult, QrPayload, Wine, WineCategory};

/// Companion app hand-off links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppLinksView {
    /// `<scheme>://qr/<rawEncoded>`.
    #[schema(example = "cellarium://qr/%7B%22type%22%3A%22guest%22%7D")]
    pub deep_link: String,
    pub ios_store: String,
    pub android_store: String,
}

impl AppLinksView {
    /// Links for `payload`.
    pub fn for_payload(links: &AppLinks, payload: &QrPayload) -> Self {
        Self {
            deep_link: links.deep_link(payload.raw_encoded()),
            ios_store: links.ios_store().to_string(),
            android_store: links.android_store().to_string(),
        }
    }
}

/// A wine with its derived display fields.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WineView {
    #[serde(flatten)]
    pub wine: Wine,
    pub availability: Availability,
    pub category: WineCategory,
}

impl From<Wine> for WineView {
    fn from(wine: Wine) -> Self {
        Self {
            availability: wine.availability(),
            category: wine.category(),
            wine,
        }
    }
}

/// Guest menu.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    pub locale: Locale,
    pub branch: Branch,
    /// Every in-stock row, sold-out wines included.
    pub wines: Vec<WineView>,
    pub app_links: AppLinksView,
}

impl MenuView {
    /// Assemble the view for a resolved menu.
    pub fn new(locale: Locale, payload: &QrPayload, menu: MenuResult, links: &AppLinks) -> Self {
        Self {
            locale,
            branch: menu.branch,
            wines: menu.wines.into_iter().map(WineView::from).collect(),
            app_links: AppLinksView::for_payload(links, payload),
        }
    }
}

/// Staff onboarding landing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffInviteView {
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    /// The payload as scanned, to post back with the registration form.
    pub data: String,
    pub app_links: AppLinksView,
}

impl StaffInviteView {
    /// Assemble the view for an invite payload.
    pub fn new(locale: Locale, payload: &QrPayload, links: &AppLinks) -> Self {
        Self {
            locale,
            branch_id: payload.branch_id().map(str::to_owned),
            branch_name: payload.branch_name().map(str::to_owned),
            data: payload.raw_encoded().to_owned(),
            app_links: AppLinksView::for_payload(links, payload),
        }
    }
}

/// Result of scanning a QR code.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum QrView {
    Menu(MenuView),
    StaffInvite(StaffInviteView),
}
