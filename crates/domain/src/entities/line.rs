//! Transit lines and product classes

use std::fmt;

use serde::{Deserialize, Serialize};

/// Product (means of transport) class a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    /// ICE, TGV, Railjet
    HighSpeedTrain,
    /// IC/EC and regional trains (RE/RB)
    RegionalTrain,
    /// S-Bahn
    SuburbanTrain,
    /// U-Bahn / metro
    Subway,
    /// Tram / Straßenbahn
    Tram,
    /// Bus
    Bus,
    /// Ferry
    Ferry,
    /// Cable car, funicular
    Cablecar,
    /// Taxi, on-demand services
    OnDemand,
}

impl Product {
    /// Every product class
    pub const ALL: [Self; 9] = [
        Self::HighSpeedTrain,
        Self::RegionalTrain,
        Self::SuburbanTrain,
        Self::Subway,
        Self::Tram,
        Self::Bus,
        Self::Ferry,
        Self::Cablecar,
        Self::OnDemand,
    ];

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HighSpeedTrain => "High-speed train",
            Self::RegionalTrain => "Regional train",
            Self::SuburbanTrain => "S-Bahn",
            Self::Subway => "U-Bahn",
            Self::Tram => "Tram",
            Self::Bus => "Bus",
            Self::Ferry => "Ferry",
            Self::Cablecar => "Cable car",
            Self::OnDemand => "On demand",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A transit line (e.g. "S5", "Bus 248")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Line name as shown to passengers
    pub name: String,
    /// Product class, if the provider reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    /// Direction / headsign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_products_are_distinct() {
        let mut products = Product::ALL.to_vec();
        products.sort();
        products.dedup();
        assert_eq!(products.len(), Product::ALL.len());
    }

    #[test]
    fn product_display() {
        assert_eq!(Product::SuburbanTrain.to_string(), "S-Bahn");
        assert_eq!(Product::Bus.to_string(), "Bus");
    }

    #[test]
    fn product_serializes_snake_case() {
        let json = serde_json::to_string(&Product::HighSpeedTrain).unwrap();
        assert_eq!(json, "\"high_speed_train\"");
    }

    #[test]
    fn line_skips_missing_fields() {
        let line = Line {
            name: "S5".to_string(),
            product: None,
            direction: None,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "S5" }));
    }
}
