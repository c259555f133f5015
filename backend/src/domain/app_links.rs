//! Links handing a resolved QR over to the companion native app.

use url::Url;

/// Deep-link scheme and store listings for the companion app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLinks {
    scheme: String,
    ios_store: Url,
    android_store: Url,
}

impl AppLinks {
    /// Bundle a deep-link scheme with the two store URLs.
    #[must_use]
    pub fn new(scheme: impl Into<String>, ios_store: Url, android_store: Url) -> Self {
        Self {
            scheme: scheme.into(),
            ios_store,
            android_store,
        }
    }

    /// Build `<scheme>://qr/<raw_encoded>`.
    ///
    /// The payload is inserted as received; it is already percent-encoded.
    ///
    /// # Examples
    /// ```
    /// use menu_viewer::domain::AppLinks;
    /// use url::Url;
    ///
    /// let links = AppLinks::new(
    ///     "cellarium",
    ///     Url::parse("https://apps.apple.com/").expect("url"),
    ///     Url::parse("https://play.google.com/store").expect("url"),
    /// );
    /// assert_eq!(links.deep_link("%7B%7D"), "cellarium://qr/%7B%7D");
    /// ```
    #[must_use]
    pub fn deep_link(&self, raw_encoded: &str) -> String {
        format!("{}://qr/{raw_encoded}", self.scheme)
    }

    /// App Store listing.
    #[must_use]
    pub fn ios_store(&self) -> &Url {
        &self.ios_store
    }

    /// Play Store listing.
    #[must_use]
    pub fn android_store(&self) -> &Url {
        &self.android_store
    }
}
