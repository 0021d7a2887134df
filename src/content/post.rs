//! Post summary and page models

use serde::{Deserialize, Serialize};

/// The display-relevant projection of a post document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    /// Document uid, used for the post link
    pub uid: Option<String>,

    /// First publication timestamp as sent by the content API
    pub first_publication_date: Option<String>,

    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One page of post summaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPage {
    /// Summaries in source order
    pub results: Vec<PostSummary>,

    /// URL of the following page, absent on the last page
    pub next_page: Option<String>,

    /// 1-based number of this page
    pub page: u32,

    pub total_pages: u32,
}

impl PostPage {
    /// Whether the source reports pages after this one
    pub fn has_next(&self) -> bool {
        self.next_page.is_some() && self.page < self.total_pages
    }
}

/// Search response of the content API
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results_per_page: u32,
    #[serde(default)]
    pub results_size: u32,
    #[serde(default)]
    pub total_results_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub next_page: Option<String>,
    pub prev_page: Option<String>,
    #[serde(default)]
    pub results: Vec<RawDocument>,
}

fn first_page() -> u32 {
    1
}

/// A document as returned by the content API. Fields not listed are dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub id: String,
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: RawPostData,
}

/// Post fields inside a document's `data`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPostData {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
}

impl From<RawDocument> for PostSummary {
    fn from(doc: RawDocument) -> Self {
        Self {
            uid: doc.uid,
            first_publication_date: doc.first_publication_date,
            title: doc.data.title.unwrap_or_default(),
            subtitle: doc.data.subtitle.unwrap_or_default(),
            author: doc.data.author.unwrap_or_default(),
        }
    }
}

impl From<SearchResponse> for PostPage {
    fn from(response: SearchResponse) -> Self {
        let next_page = response.next_page.filter(|url| !url.is_empty());
        if next_page.is_some() && response.total_pages == 0 {
            tracing::warn!(
                "Search response has a next_page but no total_pages; treating page {} as the last",
                response.page
            );
        }

        Self {
            results: response.results.into_iter().map(PostSummary::from).collect(),
            next_page,
            page: response.page,
            total_pages: response.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "page": 1,
        "results_per_page": 1,
        "results_size": 1,
        "total_results_size": 2,
        "total_pages": 2,
        "next_page": "https://spacetravelling.cdn.prismic.io/api/v2/documents/search?page=2",
        "prev_page": null,
        "results": [{
            "id": "YEtaVhAAACIAhMU0",
            "uid": "como-utilizar-hooks",
            "type": "post",
            "href": "https://spacetravelling.cdn.prismic.io/api/v2/documents/search?ref=x",
            "tags": [],
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "last_publication_date": "2021-03-15T19:25:28+0000",
            "lang": "pt-br",
            "data": {
                "title": "Como utilizar Hooks",
                "subtitle": "Pensando em sincronização em vez de ciclos de vida",
                "author": "Joseph Oliveira",
                "banner": { "url": "https://images.prismic.io/banner.png" }
            }
        }]
    }"#;

    #[test]
    fn test_project_search_response() {
        let response: SearchResponse = serde_json::from_str(RESPONSE).unwrap();
        let page = PostPage::from(response);

        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next());
        assert_eq!(
            page.results,
            vec![PostSummary {
                uid: Some("como-utilizar-hooks".to_string()),
                first_publication_date: Some("2021-03-15T19:25:28+0000".to_string()),
                title: "Como utilizar Hooks".to_string(),
                subtitle: "Pensando em sincronização em vez de ciclos de vida".to_string(),
                author: "Joseph Oliveira".to_string(),
            }]
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"page": 2, "total_pages": 2, "next_page": null, "prev_page": null, "results": []}"#,
        )
        .unwrap();
        let page = PostPage::from(response);
        assert_eq!(page.next_page, None);
        assert!(!page.has_next());
    }

    #[test]
    fn test_missing_total_pages_stops_paging() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"page": 1, "next_page": "https://cdn.example.com/search?page=2", "prev_page": null, "results": []}"#,
        )
        .unwrap();
        let page = PostPage::from(response);

        assert_eq!(page.total_pages, 0);
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://cdn.example.com/search?page=2")
        );
        assert!(!page.has_next());
    }

    #[test]
    fn test_missing_fields_default() {
        let doc: RawDocument =
            serde_json::from_str(r#"{"first_publication_date": null, "data": {}}"#).unwrap();
        let summary = PostSummary::from(doc);
        assert_eq!(summary.uid, None);
        assert_eq!(summary.first_publication_date, None);
        assert_eq!(summary.title, "");
    }
}
