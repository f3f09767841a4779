// SPDX-License-Identifier: GPL-3.0-or-later

use serde::de::{self, Deserializer};
use serde::Deserialize;
use url::Url;

use crate::decode;

/// An artwork rendition. The service keys the location under `#text`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub size: String,
    #[serde(rename = "#text")]
    pub url: Url,
}

/// Editorial summary attached to albums, tracks, and tags.
#[derive(Debug, Clone, Deserialize)]
pub struct Wiki {
    #[serde(default)]
    pub published: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Pagination metadata on search responses, assembled from the
/// OpenSearch fields the service scatters over the `results` block:
/// the `opensearch:Query` object only echoes the request
/// (`searchTerms`, `startPage`), while the totals sit beside it as
/// `opensearch:totalResults` and `opensearch:itemsPerPage`.
#[derive(Debug, Clone)]
pub struct SearchAttributes {
    /// The search terms echoed back, when the service included them.
    pub query: Option<String>,
    pub page: u32,
    pub total_results: u64,
    pub items_per_page: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OpenSearchQuery {
    #[serde(rename = "searchTerms", default)]
    search_terms: Option<String>,
    #[serde(rename = "startPage", default)]
    start_page: Option<decode::Scalar>,
}

/// Raw carrier flattened into each search envelope's `results` block.
/// All fields are optional on the wire; when every one is absent the
/// response simply has no attributes.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchMeta {
    #[serde(rename = "opensearch:Query", default)]
    query: Option<OpenSearchQuery>,
    #[serde(rename = "opensearch:totalResults", default)]
    total_results: Option<decode::Scalar>,
    #[serde(rename = "opensearch:itemsPerPage", default)]
    items_per_page: Option<decode::Scalar>,
}

impl SearchMeta {
    pub(crate) fn into_attributes<E: de::Error>(self) -> Result<Option<SearchAttributes>, E> {
        if self.query.is_none() && self.total_results.is_none() && self.items_per_page.is_none() {
            return Ok(None);
        }

        let entity = "search results";
        let query = self.query.unwrap_or_default();
        Ok(Some(SearchAttributes {
            page: decode::u32_or_zero(query.start_page, "startPage", entity)?,
            total_results: decode::u64_or_zero(
                self.total_results,
                "opensearch:totalResults",
                entity,
            )?,
            items_per_page: decode::u32_or_zero(
                self.items_per_page,
                "opensearch:itemsPerPage",
                entity,
            )?,
            query: decode::non_empty(query.search_terms),
        }))
    }
}

/// `@attr` pagination block on chart and top-item listings. These are
/// informational, so they soften to zero when missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartAttributes {
    #[serde(default, deserialize_with = "decode::soft_u32")]
    pub page: u32,
    #[serde(rename = "perPage", default, deserialize_with = "decode::soft_u32")]
    pub per_page: u32,
    #[serde(rename = "totalPages", default, deserialize_with = "decode::soft_u32")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "decode::soft_u64")]
    pub total: u64,
}

/// `@attr` block on user listings. Carries the username, which makes
/// malformed paging numbers attributable in the error message.
#[derive(Debug, Clone)]
pub struct UserAttributes {
    pub user: String,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub period: Option<String>,
}

impl<'de> Deserialize<'de> for UserAttributes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            user: String,
            page: decode::Scalar,
            #[serde(rename = "perPage")]
            per_page: decode::Scalar,
            #[serde(rename = "totalPages")]
            total_pages: decode::Scalar,
            total: decode::Scalar,
            #[serde(default)]
            period: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("user '{}'", raw.user);

        Ok(UserAttributes {
            page: strict_field(raw.page, "page", &entity)?,
            per_page: strict_field(raw.per_page, "perPage", &entity)?,
            total_pages: strict_field(raw.total_pages, "totalPages", &entity)?,
            total: strict_total(raw.total, &entity)?,
            period: raw.period,
            user: raw.user,
        })
    }
}

fn strict_field<E: de::Error>(value: decode::Scalar, field: &str, entity: &str) -> Result<u32, E> {
    let bad = || E::custom(format!("{field} is not a valid number for {entity}"));
    match value {
        decode::Scalar::Text(s) => s.parse().map_err(|_| bad()),
        decode::Scalar::Int(n) => u32::try_from(n).map_err(|_| bad()),
        decode::Scalar::Float(_) => Err(bad()),
    }
}

fn strict_total<E: de::Error>(value: decode::Scalar, entity: &str) -> Result<u64, E> {
    let bad = || E::custom(format!("total is not a valid number for {entity}"));
    match value {
        decode::Scalar::Text(s) => s.parse().map_err(|_| bad()),
        decode::Scalar::Int(n) => u64::try_from(n).map_err(|_| bad()),
        decode::Scalar::Float(_) => Err(bad()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_attributes_assemble_from_opensearch_fields() {
        let meta: SearchMeta = serde_json::from_str(
            r##"{
                "opensearch:Query": {"#text": "", "role": "request", "searchTerms": "believe", "startPage": "1"},
                "opensearch:totalResults": "198",
                "opensearch:startIndex": "0",
                "opensearch:itemsPerPage": "30"
            }"##,
        )
        .unwrap();
        let attrs = meta
            .into_attributes::<serde_json::Error>()
            .unwrap()
            .unwrap();
        assert_eq!(attrs.query.as_deref(), Some("believe"));
        assert_eq!(attrs.page, 1);
        assert_eq!(attrs.total_results, 198);
        assert_eq!(attrs.items_per_page, 30);
    }

    #[test]
    fn search_attributes_absent_entirely_yield_none() {
        let meta: SearchMeta = serde_json::from_str(r#"{}"#).unwrap();
        assert!(meta.into_attributes::<serde_json::Error>().unwrap().is_none());
    }

    #[test]
    fn search_attributes_reject_garbage_totals() {
        let meta: SearchMeta =
            serde_json::from_str(r#"{"opensearch:totalResults": "many"}"#).unwrap();
        let message = meta
            .into_attributes::<serde_json::Error>()
            .unwrap_err()
            .to_string();
        assert!(
            message.contains("opensearch:totalResults is not a valid number for search results"),
            "{message}"
        );
    }

    #[test]
    fn user_attributes_blame_the_user_on_bad_paging() {
        let result = serde_json::from_str::<UserAttributes>(
            r#"{"user": "alice", "page": "first", "perPage": "50", "totalPages": "1", "total": "3"}"#,
        );
        let message = result.unwrap_err().to_string();
        assert!(
            message.contains("page is not a valid number for user 'alice'"),
            "{message}"
        );
    }

    #[test]
    fn chart_attributes_soften_missing_fields() {
        let attrs: ChartAttributes = serde_json::from_str(r#"{"page": "2"}"#).unwrap();
        assert_eq!(attrs.page, 2);
        assert_eq!(attrs.total, 0);
    }
}
