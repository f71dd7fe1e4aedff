use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A catalog item, as handed to the page templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub id: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub price: String,
    pub original_price: Option<String>,
}

/// Discount percentage of a record. Always finite and `>= 0`.
///
/// A missing or `null` value reads as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "Option<f64>")]
pub struct Percentage(f64);

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PercentageError {
    #[error("percentage must be a finite number, got {0}")]
    NotFinite(f64),
    #[error("percentage must not be negative, got {0}")]
    Negative(f64),
}

impl Percentage {
    pub fn new(value: f64) -> Result<Self, PercentageError> {
        if !value.is_finite() {
            return Err(PercentageError::NotFinite(value));
        }
        if value < 0.0 {
            return Err(PercentageError::Negative(value));
        }
        Ok(Percentage(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_discount(self) -> bool {
        self.0 > 0.0
    }
}

impl TryFrom<Option<f64>> for Percentage {
    type Error = PercentageError;

    fn try_from(value: Option<f64>) -> Result<Self, Self::Error> {
        value.map_or(Ok(Percentage::default()), Percentage::new)
    }
}

/// One loaded record: the product plus its discount.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ScrapedRecord")]
pub struct PricedProduct {
    pub product: Product,
    pub percentage: Percentage,
}

impl PricedProduct {
    pub fn is_discounted(&self) -> bool {
        self.percentage.is_discount()
    }
}

/// On-disk shape of one record: a flat object.
///
/// Keys are read in snake_case; the Go-style names the first scraper
/// emitted (`Name`, `URL`, `ImgURL`, ...) are accepted as aliases.
#[derive(Deserialize)]
struct ScrapedRecord {
    #[serde(alias = "Name")]
    name: String,
    #[serde(default, alias = "ID")]
    id: Option<String>,
    #[serde(default, alias = "URL")]
    url: String,
    #[serde(default, alias = "ImgURL")]
    image_url: Option<String>,
    #[serde(default, alias = "Price")]
    price: String,
    #[serde(default, alias = "OriginalPrice")]
    original_price: Option<String>,
    #[serde(default, alias = "Percentage")]
    percentage: Percentage,
}

impl From<ScrapedRecord> for PricedProduct {
    fn from(r: ScrapedRecord) -> Self {
        PricedProduct {
            product: Product {
                name: r.name,
                id: r.id,
                url: r.url,
                image_url: r.image_url,
                price: r.price,
                original_price: r.original_price,
            },
            percentage: r.percentage,
        }
    }
}
