use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, timestamp, MissingField, Record};

/// An article's front matter, as written in the source.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ArticleMeta {
    pub title: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_opt")]
    pub published_at: Option<DateTime<Utc>>,
    pub hook: Option<String>,
    pub image: Option<String>,
    pub attributions: Option<String>,
    pub hn_link: Option<String>,
}

/// A long-form article, ready to be rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub title: String,
    pub published_at: DateTime<Utc>,
    /// A leading sentence or two introducing the article.
    #[serde(serialize_with = "crate::util::or_empty")]
    pub hook: Option<String>,
    /// An image shown with the article.
    #[serde(serialize_with = "crate::util::or_empty")]
    pub image: Option<String>,
    /// Credits for content included in the article, like its header image.
    #[serde(serialize_with = "crate::util::or_empty")]
    pub attributions: Option<String>,
    /// A link to discussion on Hacker News.
    #[serde(serialize_with = "crate::util::or_empty")]
    pub hn_link: Option<String>,
    /// The rendered HTML body.
    pub content: String,
    /// The rendered table of contents. Always empty: contents generation is
    /// not implemented yet.
    pub toc: String,
}

impl Record for Article {
    const KIND: &'static str = "article";

    type Meta = ArticleMeta;

    fn from_meta(meta: ArticleMeta, path: &Path) -> Result<Self, MissingField> {
        let missing = |field| MissingField { record: Self::KIND, field, path: path.into() };
        let title = required(&meta.title).ok_or_else(|| missing("title"))?;
        let published_at = meta.published_at.ok_or_else(|| missing("published_at"))?;

        Ok(Article {
            title: title.to_string(),
            published_at,
            hook: meta.hook,
            image: meta.image,
            attributions: meta.attributions,
            hn_link: meta.hn_link,
            content: String::new(),
            toc: String::new(),
        })
    }

    fn with_content(self, content: String) -> Self {
        Article { content, ..self }
    }
}

#[cfg(test)]
mod article_tests {
    use std::path::Path;

    use chrono::{TimeZone, Utc};

    use crate::content::{Article, ArticleMeta, MissingField, Record};
    use crate::error::Kind;
    use crate::markdown::Markdown;

    fn parse(input: &str) -> crate::Result<Article> {
        Article::parse(input, Path::new("articles/test.md"), &Markdown::new())
    }

    #[test]
    fn parses_front_matter_and_body() {
        let input = "---\ntitle: Hello\npublished_at: 2020-01-01T00:00:00Z\n---\nBody *text*";
        let article = parse(input).unwrap();
        assert_eq!(article.title, "Hello");
        assert_eq!(article.published_at, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert!(article.content.contains("<em>text</em>"), "{}", article.content);
        assert_eq!(article.toc, "");
    }

    #[test]
    fn optional_fields_and_unknown_keys() {
        let input = "---\ntitle: T\npublished_at: 2021-06-01\nhook: Short.\n\
            hn_link: https://news.ycombinator.com/item?id=1\nlocation: Berlin\n---\nx";

        let article = parse(input).unwrap();
        assert_eq!(article.hook.as_deref(), Some("Short."));
        assert_eq!(article.hn_link.as_deref(), Some("https://news.ycombinator.com/item?id=1"));
        assert!(article.image.is_none());
        assert!(article.attributions.is_none());
    }

    #[test]
    fn empty_title_fails_regardless_of_other_fields() {
        let meta = ArticleMeta {
            title: Some("".into()),
            published_at: Some(Utc::now()),
            hook: Some("hook".into()),
            ..Default::default()
        };

        let error = Article::from_meta(meta, Path::new("a.md")).unwrap_err();
        assert_eq!(error, MissingField { record: "article", field: "title", path: "a.md".into() });
    }

    #[test]
    fn only_an_empty_title_is_missing() {
        let meta = ArticleMeta { title: Some(" ".into()), published_at: Some(Utc::now()), ..Default::default() };
        assert_eq!(Article::from_meta(meta, Path::new("a.md")).unwrap().title, " ");

        let error = parse("---\ntitle: \"\"\npublished_at: 2020-01-01\n---\nbody").unwrap_err();
        assert_eq!(error.kind(), Some(Kind::MissingField));
    }

    #[test]
    fn absent_optional_fields_render_empty() {
        let article = parse("---\ntitle: T\npublished_at: 2020-01-01\n---\nx").unwrap();
        let value = minijinja::Value::from_serializable(&article);
        for field in ["hook", "image", "attributions", "hn_link"] {
            assert_eq!(value.get_attr(field).unwrap().to_string(), "", "{field}");
        }
    }

    #[test]
    fn absent_published_at_fails() {
        let meta = ArticleMeta { title: Some("Title".into()), ..Default::default() };
        let error = Article::from_meta(meta, Path::new("a.md")).unwrap_err();
        assert_eq!(error.field, "published_at");

        let error = parse("---\ntitle: Title\n---\nbody").unwrap_err();
        assert_eq!(error.kind(), Some(Kind::MissingField));
    }

    #[test]
    fn document_without_front_matter_is_missing_title() {
        let error = parse("just a body").unwrap_err();
        assert_eq!(error.kind(), Some(Kind::MissingField));
    }

    #[test]
    fn bad_front_matter_is_reported() {
        let error = parse("stray\n---\ntitle: T\n---\nbody").unwrap_err();
        assert_eq!(error.kind(), Some(Kind::FrontMatter));
    }

    #[test]
    fn invalid_timestamp_is_a_decode_error() {
        let error = parse("---\ntitle: T\npublished_at: someday\n---\nbody").unwrap_err();
        assert_eq!(error.kind(), Some(Kind::Decode));
    }

    #[test]
    fn load_names_the_file_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.md");
        std::fs::write(&path, "---\npublished_at: 2020-01-01\n---\nbody").unwrap();

        let error = Article::load(&path, &Markdown::new()).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("broken.md"), "{message}");
        assert!(message.contains("missing required field `title`"), "{message}");
    }
}
