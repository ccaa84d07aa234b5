use serde::Deserialize;
use serde_json::Value;

use super::lenient;

/// LinkedIn company page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinCompanyResponse {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub slogan: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub headquarters: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub employee_count: Option<u64>,
    #[serde(default, alias = "companySize", deserialize_with = "lenient::opt_string")]
    pub size: Option<String>,
    #[serde(default, alias = "foundedOn", deserialize_with = "lenient::opt_i64")]
    pub founded: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub website: Option<String>,
    /// Either an array of strings or one comma-separated string.
    #[serde(default)]
    pub specialties: Option<Value>,
    #[serde(default, alias = "followers", deserialize_with = "lenient::opt_u64")]
    pub follower_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_verified: Option<bool>,
}
