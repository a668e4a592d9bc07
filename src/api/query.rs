//! Query string and path encoding for Search Listings Items

use crate::core::params::ValidatedParams;

pub const SEARCH_LISTINGS_PATH: &str = "/listings/2021-08-01/items";

/// Path for a seller's listings, with the seller ID percent-encoded
pub fn search_path(seller_id: &str) -> String {
    format!("{}/{}", SEARCH_LISTINGS_PATH, urlencoding::encode(seller_id))
}

/// Serialize validated parameters into a URL query string.
///
/// Absent fields are skipped. Sequence fields produce one `key=value` pair per
/// element, in order, never comma-joined. `sellerId` travels in the path, not
/// here.
pub fn to_query_string(params: &ValidatedParams) -> String {
    let mut query = QueryBuilder::default();

    query.push_all("marketplaceIds", Some(&params.marketplace_ids));
    query.push("issueLocale", params.issue_locale.as_deref());
    query.push_all("includedData", params.included_data.as_ref());
    query.push_all("identifiers", params.identifiers.as_ref());
    query.push("identifiersType", params.identifiers_type.as_deref());
    query.push("variationParentSku", params.variation_parent_sku.as_deref());
    query.push("packageHierarchySku", params.package_hierarchy_sku.as_deref());
    query.push("createdAfter", params.created_after.as_deref());
    query.push("createdBefore", params.created_before.as_deref());
    query.push("lastUpdatedAfter", params.last_updated_after.as_deref());
    query.push("lastUpdatedBefore", params.last_updated_before.as_deref());
    query.push_all("withIssueSeverity", params.with_issue_severity.as_ref());
    query.push_all("withStatus", params.with_status.as_ref());
    query.push_all("withoutStatus", params.without_status.as_ref());
    query.push("sortBy", params.sort_by.as_deref());
    query.push("sortOrder", params.sort_order.as_deref());
    query.push("pageSize", params.page_size.map(|s| s.to_string()).as_deref());
    query.push("pageToken", params.page_token.as_deref());

    query.finish()
}

#[derive(Default)]
struct QueryBuilder {
    pairs: Vec<String>,
}

impl QueryBuilder {
    fn push(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.pairs.push(format!("{}={}", key, urlencoding::encode(value)));
        }
    }

    fn push_all(&mut self, key: &str, values: Option<&Vec<String>>) {
        for value in values.into_iter().flatten() {
            self.push(key, Some(value.as_str()));
        }
    }

    fn finish(self) -> String {
        self.pairs.join("&")
    }
}
