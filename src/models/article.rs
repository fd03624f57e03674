use serde::{Deserialize, Serialize};

/// Placeholder the provider puts in fields of articles it has taken down.
pub const REMOVED_MARKER: &str = "[Removed]";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

// Relayed verbatim from the provider, so every field may be absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Query string accepted by `GET /api/articles`.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ArticleQuery {
    pub topics: Option<String>,
    pub sources: Option<String>,
    pub q: Option<String>,
}

/// Parameters sent to the provider's `everything` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderQuery {
    pub q: String,
    pub sources: Option<String>,
}

impl ArticleQuery {
    /// Free text wins over topic and source filters. Topics become required
    /// terms (`+topic`), sources go to the provider's own `sources` parameter.
    pub fn to_provider_query(&self) -> ProviderQuery {
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            return ProviderQuery {
                q: q.to_string(),
                sources: None,
            };
        }

        let terms: Vec<String> = split_list(self.topics.as_deref())
            .into_iter()
            .map(|topic| format!("+{}", topic))
            .collect();
        let sources = split_list(self.sources.as_deref());

        let q = if terms.is_empty() && sources.is_empty() {
            "default".to_string()
        } else {
            terms.join(" ")
        };

        ProviderQuery {
            q,
            sources: (!sources.is_empty()).then(|| sources.join(",")),
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<&str> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(topics: Option<&str>, sources: Option<&str>, q: Option<&str>) -> ArticleQuery {
        ArticleQuery {
            topics: topics.map(String::from),
            sources: sources.map(String::from),
            q: q.map(String::from),
        }
    }

    #[test]
    fn free_text_is_exclusive() {
        let pq = query(Some("tech"), Some("bbc-news"), Some("climate")).to_provider_query();
        assert_eq!(pq, ProviderQuery { q: "climate".into(), sources: None });
    }

    #[test]
    fn topics_and_sources_combine() {
        let pq = query(Some(" tech , science,"), Some("bbc-news, cnn"), None).to_provider_query();
        assert_eq!(pq.q, "+tech +science");
        assert_eq!(pq.sources.as_deref(), Some("bbc-news,cnn"));
    }

    #[test]
    fn empty_query_falls_back_to_default() {
        let pq = query(None, None, Some("   ")).to_provider_query();
        assert_eq!(pq, ProviderQuery { q: "default".into(), sources: None });
    }

    #[test]
    fn sources_only_leaves_terms_empty() {
        let pq = query(None, Some("bbc-news"), None).to_provider_query();
        assert_eq!(pq.q, "");
        assert_eq!(pq.sources.as_deref(), Some("bbc-news"));
    }

    #[test]
    fn article_uses_provider_field_names() {
        let raw = r#"{
            "source": {"id": null, "name": "BBC News"},
            "author": null,
            "title": "Heatwave",
            "description": "Record temperatures",
            "url": "https://example.com/a",
            "urlToImage": "https://example.com/a.png",
            "publishedAt": "2024-07-01T10:00:00Z",
            "content": "..."
        }"#;
        let article: Article = serde_json::from_str(raw).unwrap();
        assert_eq!(article.source.name.as_deref(), Some("BBC News"));
        assert_eq!(article.url_to_image.as_deref(), Some("https://example.com/a.png"));

        let back = serde_json::to_value(&article).unwrap();
        assert_eq!(back["publishedAt"], "2024-07-01T10:00:00Z");
    }
}
