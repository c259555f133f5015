//! Menu snapshot returned by the menu resolution endpoint.
//!
//! The snapshot is server-owned and read-only: the viewer holds it for one
//! render and never mutates it. Field names follow the backend's snake_case
//! wire format.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Upper bound of every sensory level.
pub const SENSORY_LEVEL_MAX: f64 = 5.0;

/// Branch the menu belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Branch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// A wine offered at the branch.
///
/// Both prices are independently optional; a wine with neither is a valid
/// display-only entry. Sensory levels are each optional and range over 0–5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Wine {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub winery: Option<String>,
    #[serde(default)]
    pub grape_variety: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub vintage: Option<String>,
    #[serde(rename = "type", default = "default_wine_type")]
    pub wine_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub body_level: Option<f64>,
    #[serde(default)]
    pub sweetness_level: Option<f64>,
    #[serde(default)]
    pub acidity_level: Option<f64>,
    #[serde(default)]
    pub intensity_level: Option<f64>,
    #[serde(default)]
    pub fizziness_level: Option<f64>,
    pub stock_quantity: u32,
    #[serde(default)]
    pub price_by_glass: Option<f64>,
    #[serde(default)]
    pub price_by_bottle: Option<f64>,
}

fn default_wine_type() -> String {
    WineCategory::Other.as_str().to_owned()
}

/// Display grouping derived from the free-form wine type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WineCategory {
    Red,
    White,
    Rose,
    Sparkling,
    Other,
}

impl WineCategory {
    /// Classify a backend wine type; anything unrecognised is `Other`.
    #[must_use]
    pub fn from_wine_type(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "red" => Self::Red,
            "white" => Self::White,
            "rose" | "rosé" => Self::Rose,
            "sparkling" => Self::Sparkling,
            _ => Self::Other,
        }
    }

    /// Wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::White => "white",
            Self::Rose => "rose",
            Self::Sparkling => "sparkling",
            Self::Other => "other",
        }
    }
}

/// Whether a wine can currently be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    SoldOut,
}

impl Wine {
    /// Availability derived from stock.
    #[must_use]
    pub fn availability(&self) -> Availability {
        if self.stock_quantity > 0 {
            Availability::Available
        } else {
            Availability::SoldOut
        }
    }

    /// Display grouping for the wine.
    #[must_use]
    pub fn category(&self) -> WineCategory {
        WineCategory::from_wine_type(&self.wine_type)
    }

    /// True when neither a glass nor a bottle price is set.
    #[must_use]
    pub fn is_unpriced(&self) -> bool {
        self.price_by_glass.is_none() && self.price_by_bottle.is_none()
    }

    fn sensory_levels(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("body_level", self.body_level),
            ("acidity_level", self.acidity_level),
            ("sweetness_level", self.sweetness_level),
            ("intensity_level", self.intensity_level),
            ("fizziness_level", self.fizziness_level),
        ]
    }

    fn validate(&self) -> Result<(), MenuShapeError> {
        for (field, level) in self.sensory_levels() {
            if let Some(level) = level {
                if !level.is_finite() || !(0.0..=SENSORY_LEVEL_MAX).contains(&level) {
                    return Err(MenuShapeError::SensoryLevelOutOfRange {
                        wine_id: self.id.clone(),
                        field,
                    });
                }
            }
        }
        for (field, price) in [
            ("price_by_glass", self.price_by_glass),
            ("price_by_bottle", self.price_by_bottle),
        ] {
            if let Some(price) = price {
                if !price.is_finite() || price < 0.0 {
                    return Err(MenuShapeError::InvalidPrice {
                        wine_id: self.id.clone(),
                        field,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Shape violations found in a successful menu response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuShapeError {
    /// Branch id or name is blank.
    #[error("branch {field} must not be blank")]
    BlankBranchField { field: &'static str },
    /// A sensory level is outside 0–5 or not a number.
    #[error("wine {wine_id} has {field} outside 0-5")]
    SensoryLevelOutOfRange { wine_id: String, field: &'static str },
    /// A price is negative or not a number.
    #[error("wine {wine_id} has an invalid {field}")]
    InvalidPrice { wine_id: String, field: &'static str },
}

/// Branch plus its wine list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuResult {
    pub branch: Branch,
    pub wines: Vec<Wine>,
}

impl MenuResult {
    /// Check the invariants the backend contract promises.
    ///
    /// # Examples
    /// ```
    /// use menu_viewer::domain::{Branch, MenuResult};
    ///
    /// let menu = MenuResult {
    ///     branch: Branch { id: "b-1".into(), name: "Centro".into(), address: None },
    ///     wines: Vec::new(),
    /// };
    /// assert!(menu.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), MenuShapeError> {
        if self.branch.id.trim().is_empty() {
            return Err(MenuShapeError::BlankBranchField { field: "id" });
        }
        if self.branch.name.trim().is_empty() {
            return Err(MenuShapeError::BlankBranchField { field: "name" });
        }
        self.wines.iter().try_for_each(Wine::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn wine() -> Wine {
        serde_json::from_value(json!({
            "id": "w-1",
            "name": "Malbec Reserva",
            "type": "red",
            "stock_quantity": 4,
            "price_by_glass": null,
            "price_by_bottle": 540.0,
            "body_level": 4
        }))
        .expect("fixture wine deserialises")
    }

    #[fixture]
    fn menu(wine: Wine) -> MenuResult {
        MenuResult {
            branch: Branch {
                id: "b-1".to_owned(),
                name: "Centro".to_owned(),
                address: Some("Av. Reforma 1".to_owned()),
            },
            wines: vec![wine],
        }
    }

    #[rstest]
    fn missing_optional_fields_default_to_none(wine: Wine) {
        assert_eq!(wine.winery, None);
        assert_eq!(wine.acidity_level, None);
        assert_eq!(wine.body_level, Some(4.0));
        assert!(!wine.is_unpriced());
    }

    #[rstest]
    fn negative_stock_fails_to_deserialise() {
        let result = serde_json::from_value::<Wine>(json!({
            "id": "w-2",
            "name": "Rosado",
            "type": "rose",
            "stock_quantity": -1
        }));
        assert!(result.is_err());
    }

    #[rstest]
    fn unpriced_wine_is_valid(mut menu: MenuResult) {
        menu.wines[0].price_by_bottle = None;
        assert!(menu.wines[0].is_unpriced());
        assert!(menu.validate().is_ok());
    }

    #[rstest]
    #[case(0, Availability::SoldOut)]
    #[case(1, Availability::Available)]
    fn availability_follows_stock(mut wine: Wine, #[case] stock: u32, #[case] expected: Availability) {
        wine.stock_quantity = stock;
        assert_eq!(wine.availability(), expected);
    }

    #[rstest]
    #[case("red", WineCategory::Red)]
    #[case(" White ", WineCategory::White)]
    #[case("rosé", WineCategory::Rose)]
    #[case("sparkling", WineCategory::Sparkling)]
    #[case("orange", WineCategory::Other)]
    fn categorises_wine_types(#[case] raw: &str, #[case] expected: WineCategory) {
        assert_eq!(WineCategory::from_wine_type(raw), expected);
    }

    #[rstest]
    #[case(-0.5)]
    #[case(5.5)]
    #[case(f64::NAN)]
    fn rejects_out_of_range_sensory_levels(mut menu: MenuResult, #[case] level: f64) {
        menu.wines[0].fizziness_level = Some(level);
        assert!(matches!(
            menu.validate(),
            Err(MenuShapeError::SensoryLevelOutOfRange { field: "fizziness_level", .. })
        ));
    }

    #[rstest]
    fn rejects_negative_prices(mut menu: MenuResult) {
        menu.wines[0].price_by_glass = Some(-10.0);
        assert!(matches!(
            menu.validate(),
            Err(MenuShapeError::InvalidPrice { field: "price_by_glass", .. })
        ));
    }

    #[rstest]
    fn rejects_blank_branch_name(mut menu: MenuResult) {
        menu.branch.name = "  ".to_owned();
        assert_eq!(
            menu.validate(),
            Err(MenuShapeError::BlankBranchField { field: "name" })
        );
    }
}
