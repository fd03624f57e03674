use crate::models::{Article, REMOVED_MARKER};

pub const ARTICLES_PER_PAGE: usize = 15;

/// Settled user inputs the article list is narrowed by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub topics: Vec<String>,
    pub filter: String,
    pub sources: String,
}

fn present(field: Option<&str>) -> bool {
    matches!(field, Some(value) if !value.is_empty() && value != REMOVED_MARKER)
}

fn contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack.map_or(false, |text| text.to_lowercase().contains(needle_lower))
}

/// False for articles the provider has taken down or that lack a field the
/// card needs.
pub fn is_displayable(article: &Article) -> bool {
    present(article.title.as_deref())
        && present(article.description.as_deref())
        && present(article.content.as_deref())
        && present(article.url.as_deref())
        && present(article.source.name.as_deref())
}

impl FilterCriteria {
    pub fn matches(&self, article: &Article) -> bool {
        let title = article.title.as_deref();
        let description = article.description.as_deref();
        let source_name = article.source.name.as_deref();

        // Topics select by exact source name
        let topic_match = self.topics.is_empty()
            || source_name.map_or(false, |name| self.topics.iter().any(|topic| topic == name));

        let filter_lower = self.filter.to_lowercase();
        let keyword_match =
            contains_ci(title, &filter_lower) || contains_ci(description, &filter_lower);

        let source_match = self.sources.is_empty()
            || contains_ci(source_name, &self.sources.to_lowercase());

        topic_match && keyword_match && source_match
    }
}

pub fn filter_articles(articles: &[Article], criteria: &FilterCriteria) -> Vec<Article> {
    articles
        .iter()
        .filter(|article| is_displayable(article) && criteria.matches(article))
        .cloned()
        .collect()
}

pub fn total_pages(total: usize) -> usize {
    total.div_ceil(ARTICLES_PER_PAGE)
}

/// One page of `items`; pages are 1-based and page 0 reads as page 1.
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let start = (page.max(1) - 1).saturating_mul(ARTICLES_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + ARTICLES_PER_PAGE).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn article(title: &str, description: &str, source: &str) -> Article {
        Article {
            source: Source { id: None, name: Some(source.into()) },
            title: Some(title.into()),
            description: Some(description.into()),
            url: Some(format!("https://example.com/{}", title.replace(' ', "-"))),
            content: Some("body".into()),
            ..Article::default()
        }
    }

    #[test]
    fn removed_description_is_always_dropped() {
        let removed = article("Climate talks", REMOVED_MARKER, "BBC News");
        assert!(!is_displayable(&removed));

        let criteria = FilterCriteria {
            topics: vec!["BBC News".into()],
            filter: "climate".into(),
            sources: "bbc".into(),
        };
        assert!(criteria.matches(&removed));
        assert!(filter_articles(&[removed], &criteria).is_empty());
    }

    #[test]
    fn missing_or_empty_fields_are_not_displayable() {
        let mut no_url = article("a", "b", "c");
        no_url.url = None;
        assert!(!is_displayable(&no_url));

        let mut empty_content = article("a", "b", "c");
        empty_content.content = Some(String::new());
        assert!(!is_displayable(&empty_content));

        let mut removed_source = article("a", "b", "c");
        removed_source.source.name = Some(REMOVED_MARKER.into());
        assert!(!is_displayable(&removed_source));

        assert!(is_displayable(&article("a", "b", "c")));
    }

    #[test]
    fn keyword_and_source_matching_ignore_case() {
        let a = article("Climate Change Summit", "Leaders meet", "BBC News");
        let criteria = FilterCriteria {
            filter: "CLIMATE".into(),
            sources: "bbc".into(),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&a));

        let by_description = FilterCriteria { filter: "leaders".into(), ..FilterCriteria::default() };
        assert!(by_description.matches(&a));

        let other_source = FilterCriteria { sources: "cnn".into(), ..FilterCriteria::default() };
        assert!(!other_source.matches(&a));
    }

    #[test]
    fn topics_match_exact_source_name_only() {
        let a = article("New tech gadgets", "Hardware news", "BBC News");
        let by_source = FilterCriteria {
            topics: vec!["sports".into(), "BBC News".into()],
            ..FilterCriteria::default()
        };
        let in_title_only = FilterCriteria { topics: vec!["tech".into()], ..FilterCriteria::default() };
        let in_description_only = FilterCriteria { topics: vec!["hardware".into()], ..FilterCriteria::default() };
        let different_case = FilterCriteria { topics: vec!["bbc news".into()], ..FilterCriteria::default() };

        assert!(by_source.matches(&a));
        assert!(!in_title_only.matches(&a));
        assert!(!in_description_only.matches(&a));
        assert!(!different_case.matches(&a));
        assert!(FilterCriteria::default().matches(&a));
    }

    #[test]
    fn pagination_slices_fixed_pages() {
        let items: Vec<usize> = (0..32).collect();
        assert_eq!(total_pages(items.len()), 3);
        assert_eq!(total_pages(0), 0);

        assert_eq!(paginate(&items, 1), &items[0..15]);
        assert_eq!(paginate(&items, 0), &items[0..15]);
        assert_eq!(paginate(&items, 3), &items[30..32]);
        assert!(paginate(&items, 4).is_empty());
    }
}
