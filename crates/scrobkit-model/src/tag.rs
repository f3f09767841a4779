// SPDX-License-Identifier: GPL-3.0-or-later

use serde::de::Deserializer;
use serde::Deserialize;
use url::Url;

use crate::common::{ChartAttributes, Wiki};
use crate::decode::{self, Scalar};

/// A tag, either standalone (`tag.getinfo`) or embedded in an entity's
/// tag list. Only the name is identity; the usage counters are
/// optional and soften when absent, but a present-and-unparseable
/// counter still fails.
#[derive(Debug, Clone)]
pub struct Tag {
    pub name: String,
    pub url: Option<Url>,
    pub count: Option<u64>,
    pub total: Option<u64>,
    pub reach: Option<u64>,
    pub wiki: Option<Wiki>,
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            #[serde(default)]
            url: Option<Url>,
            #[serde(default)]
            count: Option<Scalar>,
            #[serde(default)]
            total: Option<Scalar>,
            #[serde(default)]
            reach: Option<Scalar>,
            #[serde(default)]
            wiki: Option<Wiki>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("tag '{}'", raw.name);

        Ok(Tag {
            count: decode::opt_u64(raw.count, "count", &entity)?,
            total: decode::opt_u64(raw.total, "total", &entity)?,
            reach: decode::opt_u64(raw.reach, "reach", &entity)?,
            name: raw.name,
            url: raw.url,
            wiki: raw.wiki,
        })
    }
}

/// Inner `{"tag": [...]}` container shared by album/artist/track tag
/// blocks and the top-tags envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TagList {
    #[serde(default, deserialize_with = "crate::decode::one_or_many")]
    pub tag: Vec<Tag>,
}

/// Envelope for `tag.getinfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagResponse {
    pub tag: Tag,
}

/// Envelope for `tag.gettoptags`, `album.gettoptags`, and the other
/// top-tag listings (root key `toptags`).
#[derive(Debug, Clone)]
pub struct TopTags {
    pub tags: Vec<Tag>,
    pub attributes: ChartAttributes,
}

impl<'de> Deserialize<'de> for TopTags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            toptags: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            tag: Vec<Tag>,
            #[serde(rename = "@attr", default)]
            attr: Option<ChartAttributes>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(TopTags {
            tags: envelope.toptags.tag,
            attributes: envelope.toptags.attr.unwrap_or_default(),
        })
    }
}

/// Envelope for `tag.getsimilar`.
#[derive(Debug, Clone)]
pub struct SimilarTags {
    pub tags: Vec<Tag>,
}

impl<'de> Deserialize<'de> for SimilarTags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            similartags: TagList,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(SimilarTags {
            tags: envelope.similartags.tag,
        })
    }
}
