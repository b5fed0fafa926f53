pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod normalize;
pub mod translate;
pub mod upstream;
pub mod validate;
pub mod weekday;
pub mod xml;


// Test utilities - publicly exposed with test feature
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use config::{Config, ServiceKey, UpstreamConfig};
pub use error::{LookupError, UpstreamError, XmlError};
pub use lookup::lookup_pharmacies;
pub use models::{ErrorResponse, LookupQuery, LookupRequest, PharmacyList, PharmacyRecord};
pub use upstream::{PharmacyApiClient, PharmacySource};
pub use weekday::WeekdayTable;
