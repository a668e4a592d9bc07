//! Validation of Search Listings Items parameters
//!
//! Every field rule runs and every violation is recorded. The two cross-field
//! rules (identifier type requirement and the identifier/SKU-filter
//! exclusivity) run afterwards regardless of earlier failures.

use crate::api::models::{
    IdentifiersType, IncludedData, IssueSeverity, ListingStatus, SearchParams, SortBy, SortOrder,
};
use crate::utils::validation::{ViolationRule, Violations, is_blank, is_iso8601_datetime};
use std::ops::Deref;
use std::str::FromStr;

pub const MAX_IDENTIFIERS: usize = 20;
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 20;

/// Parameters that passed [`validate_params`].
///
/// Only validated parameters can be serialized into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedParams(SearchParams);

impl ValidatedParams {
    pub fn into_inner(self) -> SearchParams {
        self.0
    }
}

impl Deref for ValidatedParams {
    type Target = SearchParams;

    fn deref(&self) -> &SearchParams {
        &self.0
    }
}

pub fn validate_params(params: &SearchParams) -> Result<ValidatedParams, Violations> {
    let mut violations = Violations::new();

    if is_blank(&params.seller_id) {
        violations.push(
            "sellerId",
            ViolationRule::Required,
            "sellerId is required and must be a non-empty string",
        );
    }

    if params.marketplace_ids.len() != 1 {
        violations.push(
            "marketplaceIds",
            ViolationRule::Length,
            format!(
                "marketplaceIds must contain exactly one marketplace ID (received {})",
                params.marketplace_ids.len()
            ),
        );
    }
    if params.marketplace_ids.iter().any(|id| is_blank(id)) {
        violations.push(
            "marketplaceIds",
            ViolationRule::NonEmpty,
            "marketplaceIds must not contain empty values",
        );
    }

    if let Some(identifiers) = &params.identifiers {
        if identifiers.len() > MAX_IDENTIFIERS {
            violations.push(
                "identifiers",
                ViolationRule::Length,
                format!(
                    "identifiers accepts at most {} values (received {})",
                    MAX_IDENTIFIERS,
                    identifiers.len()
                ),
            );
        }
        if identifiers.iter().any(|id| is_blank(id)) {
            violations.push(
                "identifiers",
                ViolationRule::NonEmpty,
                "identifiers must not contain empty values",
            );
        }
    }

    check_one_of::<IdentifiersType>(
        &mut violations,
        "identifiersType",
        params.identifiers_type.as_deref(),
    );
    check_each_one_of::<IncludedData>(
        &mut violations,
        "includedData",
        params.included_data.as_deref(),
    );
    check_each_one_of::<IssueSeverity>(
        &mut violations,
        "withIssueSeverity",
        params.with_issue_severity.as_deref(),
    );
    check_each_one_of::<ListingStatus>(
        &mut violations,
        "withStatus",
        params.with_status.as_deref(),
    );
    check_each_one_of::<ListingStatus>(
        &mut violations,
        "withoutStatus",
        params.without_status.as_deref(),
    );
    check_one_of::<SortBy>(&mut violations, "sortBy", params.sort_by.as_deref());
    check_one_of::<SortOrder>(&mut violations, "sortOrder", params.sort_order.as_deref());

    if let Some(size) = params.page_size {
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
            violations.push(
                "pageSize",
                ViolationRule::Range,
                format!(
                    "pageSize must be between {} and {} (received {})",
                    MIN_PAGE_SIZE, MAX_PAGE_SIZE, size
                ),
            );
        }
    }

    for (field, value) in [
        ("createdAfter", &params.created_after),
        ("createdBefore", &params.created_before),
        ("lastUpdatedAfter", &params.last_updated_after),
        ("lastUpdatedBefore", &params.last_updated_before),
    ] {
        if let Some(value) = value {
            if !is_iso8601_datetime(value) {
                violations.push(
                    field,
                    ViolationRule::DateTime,
                    format!(
                        "{} must be an ISO-8601 date-time such as 2023-01-01T00:00:00Z (received '{}')",
                        field, value
                    ),
                );
            }
        }
    }

    let has_identifiers = params.identifiers.as_ref().is_some_and(|ids| !ids.is_empty());

    if has_identifiers && params.identifiers_type.is_none() {
        violations.push(
            "identifiersType",
            ViolationRule::ConditionalRequired,
            "identifiersType is required when identifiers are provided",
        );
    }

    // Reported once, naming every offending parameter
    let exclusive: Vec<&str> = [
        ("identifiers", has_identifiers),
        ("variationParentSku", params.variation_parent_sku.is_some()),
        ("packageHierarchySku", params.package_hierarchy_sku.is_some()),
    ]
    .into_iter()
    .filter_map(|(name, set)| set.then_some(name))
    .collect();

    if exclusive.len() > 1 {
        violations.push(
            exclusive.join(","),
            ViolationRule::MutuallyExclusive,
            format!(
                "Only one of identifiers, variationParentSku or packageHierarchySku may be provided, received: {}",
                exclusive.join(", ")
            ),
        );
    }

    violations.into_result(ValidatedParams(params.clone()))
}

fn check_one_of<T>(violations: &mut Violations, field: &str, value: Option<&str>)
where
    T: FromStr<Err = String>,
{
    if let Some(value) = value {
        if let Err(reason) = value.parse::<T>() {
            violations.push(field, ViolationRule::OneOf, format!("{}: {}", field, reason));
        }
    }
}

fn check_each_one_of<T>(violations: &mut Violations, field: &str, values: Option<&[String]>)
where
    T: FromStr<Err = String>,
{
    for value in values.unwrap_or_default() {
        check_one_of::<T>(violations, field, Some(value));
    }
}
