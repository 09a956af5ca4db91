//! HAFAS provider configuration

use std::fmt;

use domain::Product;
use serde::{Deserialize, Serialize};

/// Product naming scheme of a transport.rest deployment
///
/// The DB endpoint and the Berlin/Brandenburg endpoints (VBB, BVG) use
/// different product keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HafasProfile {
    /// Deutsche Bahn (`nationalExpress`, `national`, `regionalExpress`, ...)
    #[default]
    Db,
    /// Verkehrsverbund Berlin-Brandenburg and BVG (`express`, `regional`, ...)
    Vbb,
}

impl HafasProfile {
    /// Upstream product keys and the product class each maps to
    #[must_use]
    pub const fn product_keys(&self) -> &'static [(&'static str, Product)] {
        match self {
            Self::Db => &[
                ("nationalExpress", Product::HighSpeedTrain),
                ("national", Product::RegionalTrain),
                ("regionalExpress", Product::RegionalTrain),
                ("regional", Product::RegionalTrain),
                ("suburban", Product::SuburbanTrain),
                ("bus", Product::Bus),
                ("ferry", Product::Ferry),
                ("subway", Product::Subway),
                ("tram", Product::Tram),
                ("taxi", Product::OnDemand),
            ],
            Self::Vbb => &[
                ("suburban", Product::SuburbanTrain),
                ("subway", Product::Subway),
                ("tram", Product::Tram),
                ("bus", Product::Bus),
                ("ferry", Product::Ferry),
                ("express", Product::HighSpeedTrain),
                ("regional", Product::RegionalTrain),
            ],
        }
    }

    /// Map an upstream product key to a product class
    #[must_use]
    pub fn product(&self, key: &str) -> Option<Product> {
        self.product_keys()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, product)| *product)
    }
}

impl fmt::Display for HafasProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Db => f.write_str("db"),
            Self::Vbb => f.write_str("vbb"),
        }
    }
}

/// Configuration for one transport.rest endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HafasConfig {
    /// Base URL of the transport.rest deployment
    pub base_url: String,

    /// Product naming scheme
    #[serde(default)]
    pub profile: HafasProfile,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Trips requested per page
    #[serde(default = "default_max_results")]
    pub max_results: u8,

    /// Time window of a departure board in minutes
    #[serde(default = "default_departures_duration_minutes")]
    pub departures_duration_minutes: u32,

    /// Language for names and remarks
    #[serde(default = "default_language")]
    pub language: String,
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_results() -> u8 {
    5
}

const fn default_departures_duration_minutes() -> u32 {
    60
}

fn default_language() -> String {
    "de".to_string()
}

impl HafasConfig {
    /// Configuration for an endpoint with default settings
    #[must_use]
    pub fn new(base_url: impl Into<String>, profile: HafasProfile) -> Self {
        Self {
            base_url: base_url.into(),
            profile,
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            departures_duration_minutes: default_departures_duration_minutes(),
            language: default_language(),
        }
    }

    /// Deutsche Bahn (all of Germany)
    #[must_use]
    pub fn db() -> Self {
        Self::new("https://v6.db.transport.rest", HafasProfile::Db)
    }

    /// Verkehrsverbund Berlin-Brandenburg
    #[must_use]
    pub fn vbb() -> Self {
        Self::new("https://v6.vbb.transport.rest", HafasProfile::Vbb)
    }

    /// Berliner Verkehrsbetriebe
    #[must_use]
    pub fn bvg() -> Self {
        Self::new("https://v6.bvg.transport.rest", HafasProfile::Vbb)
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            timeout_secs: 5,
            max_results: 2,
            ..Self::new(base_url, HafasProfile::Db)
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("base_url is not a valid URL: {}", self.base_url));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        if self.departures_duration_minutes == 0 {
            return Err("departures_duration_minutes must be greater than 0".to_string());
        }

        Ok(())
    }
}
