use serde_json::Value;
use socialsync_core::{AccountExtension, LinkedinAccount, MediaRef, SocialAccount};

use crate::endpoints::LINKEDIN_COMPANY;
use crate::error::ScraperError;
use crate::types::LinkedinCompanyResponse;

use super::{ensure_success, require};

/// Normalizes a LinkedIn company page. Company pages are always business
/// accounts.
///
/// # Errors
///
/// - [`ScraperError::VendorFailure`] when the payload carries `success: false`.
/// - [`ScraperError::MissingField`] when the company id is absent.
pub fn normalize_linkedin_company(
    response: LinkedinCompanyResponse,
    requested_handle: &str,
) -> Result<SocialAccount, ScraperError> {
    ensure_success(response.success, LINKEDIN_COMPANY)?;
    let platform_user_id = require(response.id, LINKEDIN_COMPANY, "id")?;

    Ok(SocialAccount {
        platform_user_id,
        handle: requested_handle.to_owned(),
        display_name: response.name,
        bio: response.description.or(response.slogan),
        avatar: response.logo.map(MediaRef::image),
        avatar_hd: None,
        external_url: response.website.clone(),
        follower_count: response.follower_count,
        following_count: None,
        is_verified: response.is_verified.unwrap_or(false),
        is_business: true,
        extension: AccountExtension::Linkedin(LinkedinAccount {
            industry: response.industry,
            headquarters: response.headquarters,
            employee_count: response.employee_count,
            company_size: response.size,
            founded_year: response.founded.and_then(|y| i32::try_from(y).ok()),
            website: response.website,
            specialties: parse_specialties(response.specialties),
        }),
    })
}

fn parse_specialties(raw: Option<Value>) -> Vec<String> {
    let items: Vec<String> = match raw {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_owned).collect(),
        _ => Vec::new(),
    };
    items
        .into_iter()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}
