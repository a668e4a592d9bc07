use crate::utils::lenient::{
    lenient_opt, lenient_opt_string, lenient_opt_u64, lenient_string, lenient_strings, lenient_u64,
    lenient_vec,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Declares a wire enum with its string form, `FromStr` and the full value list
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// All accepted wire values, in declaration order
            pub fn wire_values() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(format!(
                        "'{}' is not one of {}",
                        other,
                        Self::wire_values().join(", ")
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Type of the values passed in `identifiers`
    IdentifiersType {
        Sku => "SKU",
        Asin => "ASIN",
        Ean => "EAN",
        Fnsku => "FNSKU",
        Gtin => "GTIN",
        Isbn => "ISBN",
        Jan => "JAN",
        Minsan => "MINSAN",
        Upc => "UPC",
    }
);

wire_enum!(
    /// Response sections to include for each item
    IncludedData {
        Summaries => "summaries",
        Attributes => "attributes",
        Issues => "issues",
        Offers => "offers",
        FulfillmentAvailability => "fulfillmentAvailability",
        Procurement => "procurement",
        Relationships => "relationships",
        ProductTypes => "productTypes",
    }
);

wire_enum!(IssueSeverity {
    Error => "ERROR",
    Warning => "WARNING",
    Info => "INFO",
});

wire_enum!(ListingStatus {
    Buyable => "BUYABLE",
    Discoverable => "DISCOVERABLE",
});

wire_enum!(SortBy {
    Sku => "sku",
    CreatedDate => "createdDate",
    LastUpdatedDate => "lastUpdatedDate",
});

wire_enum!(SortOrder {
    Asc => "ASC",
    Desc => "DESC",
});

/// Query for the Search Listings Items operation.
///
/// Values are kept in their wire form so that bad input surfaces as a
/// validation violation instead of a parse error. The builder methods take
/// the typed enums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub seller_id: String,
    #[serde(default)]
    pub marketplace_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_data: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiers_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_parent_sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_hierarchy_sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_issue_severity: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_status: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub without_status: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl SearchParams {
    pub fn new(seller_id: impl Into<String>, marketplace_id: impl Into<String>) -> Self {
        Self {
            seller_id: seller_id.into(),
            marketplace_ids: vec![marketplace_id.into()],
            ..Default::default()
        }
    }

    pub fn included_data(mut self, data: &[IncludedData]) -> Self {
        self.included_data = Some(data.iter().map(|d| d.as_str().to_string()).collect());
        self
    }

    pub fn identifiers<I, S>(mut self, identifiers_type: IdentifiersType, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers = Some(identifiers.into_iter().map(Into::into).collect());
        self.identifiers_type = Some(identifiers_type.as_str().to_string());
        self
    }

    pub fn variation_parent_sku(mut self, sku: impl Into<String>) -> Self {
        self.variation_parent_sku = Some(sku.into());
        self
    }

    pub fn package_hierarchy_sku(mut self, sku: impl Into<String>) -> Self {
        self.package_hierarchy_sku = Some(sku.into());
        self
    }

    pub fn with_issue_severity(mut self, severities: &[IssueSeverity]) -> Self {
        self.with_issue_severity =
            Some(severities.iter().map(|s| s.as_str().to_string()).collect());
        self
    }

    pub fn with_status(mut self, statuses: &[ListingStatus]) -> Self {
        self.with_status = Some(statuses.iter().map(|s| s.as_str().to_string()).collect());
        self
    }

    pub fn without_status(mut self, statuses: &[ListingStatus]) -> Self {
        self.without_status = Some(statuses.iter().map(|s| s.as_str().to_string()).collect());
        self
    }

    pub fn sort(mut self, by: SortBy, order: SortOrder) -> Self {
        self.sort_by = Some(by.as_str().to_string());
        self.sort_order = Some(order.as_str().to_string());
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }
}

// Response models
//
// The listings payload is passed through as-is. Every field tolerates null or
// a drifting scalar type so a well-formed page never fails to decode.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub number_of_results: u64,
    #[serde(
        default,
        deserialize_with = "lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub pagination: Option<Pagination>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub items: Vec<Item>,
}

impl SearchResponse {
    /// Type a success body. Only a body that is not JSON at all is an error;
    /// a JSON value that is not an object yields an empty response.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Value>(body)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            _ => Ok(Self::default()),
        }
    }

    pub fn next_token(&self) -> Option<&str> {
        self.pagination.as_ref().and_then(|p| p.next_token.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_token: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_token: Option<String>,
}

/// A listings item, as returned by the API.
///
/// Only `sku` is guaranteed; every section depends on `includedData`.
/// Members this model does not name are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sku: String,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub summaries: Vec<ItemSummary>,
    #[serde(
        default,
        deserialize_with = "lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub attributes: Option<serde_json::Map<String, Value>>,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub issues: Vec<ItemIssue>,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub offers: Vec<ItemOffer>,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fulfillment_availability: Vec<FulfillmentAvailability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procurement: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub relationships: Vec<ItemRelationships>,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub product_types: Vec<ItemProductType>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Item {
    /// Summary for the given marketplace, or the first one when none matches
    pub fn summary_for(&self, marketplace_id: &str) -> Option<&ItemSummary> {
        self.summaries
            .iter()
            .find(|s| s.marketplace_id == marketplace_id)
            .or_else(|| self.summaries.first())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    #[serde(default, deserialize_with = "lenient_string")]
    pub marketplace_id: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub asin: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub condition_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub status: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub fn_sku: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub main_image: Option<ItemImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemImage {
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemIssue {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub severity: String,
    #[serde(
        default,
        deserialize_with = "lenient_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attribute_names: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcements: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOffer {
    #[serde(default, deserialize_with = "lenient_string")]
    pub marketplace_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub offer_type: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Value>,
}

/// Amounts arrive as decimal strings but some marketplaces send bare numbers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentAvailability {
    #[serde(default, deserialize_with = "lenient_string")]
    pub fulfillment_channel_code: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRelationships {
    #[serde(default, deserialize_with = "lenient_string")]
    pub marketplace_id: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub relationships: Vec<ItemRelationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRelationship {
    #[serde(
        default,
        deserialize_with = "lenient_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub child_skus: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parent_skus: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_theme: Option<Value>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub relationship_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProductType {
    #[serde(default, deserialize_with = "lenient_string")]
    pub marketplace_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_type: String,
}
