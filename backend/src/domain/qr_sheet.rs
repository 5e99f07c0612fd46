//! Printable QR export sheet for the operator.
//!
//! The sheet lists one QR code specification per keyword. Entries live in a
//! [`QrCodeRegistry`] owned by the sheet, so nothing outlives the request
//! that built it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::domain::ports::{KeywordRepository, QrSheetQuery};
use crate::domain::repository_error_mapping::map_keyword_error;
use crate::domain::{Error, Keyword, KeywordId, KeywordSize};

/// Everything a renderer needs to draw and download one QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeSpec {
    pub keyword_id: KeywordId,
    pub word: String,
    pub points: u32,
    pub size: KeywordSize,
    /// Target encoded in the QR code.
    pub claim_url: String,
    pub size_px: u32,
    pub title: String,
    pub file_name: String,
}

impl QrCodeSpec {
    /// Build the specification for `keyword` under `base_url`.
    ///
    /// # Examples
    /// ```
    /// use hunt::domain::{Keyword, KeywordDraft, KeywordId, KeywordSize, QrCodeSpec};
    /// use url::Url;
    ///
    /// let keyword = Keyword::new(KeywordDraft {
    ///     id: KeywordId::random(),
    ///     word: "macaw".to_owned(),
    ///     points: 20,
    ///     size: KeywordSize::Small,
    ///     is_found: false,
    ///     found_at: None,
    ///     claim: None,
    /// })
    /// .expect("valid keyword");
    /// let base = Url::parse("https://hunt.example/").expect("valid url");
    /// let spec = QrCodeSpec::for_keyword(&keyword, &base);
    /// assert_eq!(spec.title, "macaw - 20pts");
    /// assert_eq!(spec.size_px, 100);
    /// ```
    pub fn for_keyword(keyword: &Keyword, base_url: &Url) -> Self {
        let base = base_url.as_str().trim_end_matches('/');
        Self {
            keyword_id: keyword.id(),
            word: keyword.word().to_owned(),
            points: keyword.points(),
            size: keyword.size(),
            claim_url: format!("{base}/found/{}", keyword.id()),
            size_px: keyword.size().qr_size_px(),
            title: format!("{} - {}pts", keyword.word(), keyword.points()),
            file_name: format!("QR_{}_{}.png", keyword.word(), keyword.id()),
        }
    }
}

/// Ordered collection of QR specifications keyed by keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrCodeRegistry {
    entries: Vec<QrCodeSpec>,
    index: HashMap<KeywordId, usize>,
}

impl QrCodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a specification, replacing any earlier entry for the same
    /// keyword in place.
    pub fn register(&mut self, spec: QrCodeSpec) {
        match self.index.get(&spec.keyword_id) {
            Some(&position) => self.entries[position] = spec,
            None => {
                self.index.insert(spec.keyword_id, self.entries.len());
                self.entries.push(spec);
            }
        }
    }
}

/// QR export sheet, highest-value keywords first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSheet {
    registry: QrCodeRegistry,
}

impl QrSheet {
    pub fn build<'a>(keywords: impl IntoIterator<Item = &'a Keyword>, base_url: &Url) -> Self {
        let mut registry = QrCodeRegistry::new();
        for keyword in keywords {
            registry.register(QrCodeSpec::for_keyword(keyword, base_url));
        }
        Self { registry }
    }

    pub fn into_entries(self) -> Vec<QrCodeSpec> {
        self.registry.entries
    }
}

/// QR sheet service implementing [`QrSheetQuery`].
#[derive(Clone)]
pub struct QrSheetService<K> {
    keywords: Arc<K>,
    base_url: Url,
}

impl<K> QrSheetService<K> {
    pub fn new(keywords: Arc<K>, base_url: Url) -> Self {
        Self { keywords, base_url }
    }
}

#[async_trait]
impl<K> QrSheetQuery for QrSheetService<K>
where
    K: KeywordRepository,
{
    async fn sheet(&self) -> Result<QrSheet, Error> {
        let keywords = self
            .keywords
            .list_by_points_desc()
            .await
            .map_err(map_keyword_error)?;
        Ok(QrSheet::build(&keywords, &self.base_url))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::MockKeywordRepository;
    use crate::domain::test_fixtures::unclaimed_keyword;

    #[fixture]
    fn base_url() -> Url {
        Url::parse("https://hunt.example/event/").expect("valid url")
    }

    #[rstest]
    fn spec_derives_url_title_and_file_name(base_url: Url) {
        let keyword = unclaimed_keyword("toucan", 15);
        let spec = QrCodeSpec::for_keyword(&keyword, &base_url);

        assert_eq!(
            spec.claim_url,
            format!("https://hunt.example/event/found/{}", keyword.id())
        );
        assert_eq!(spec.size_px, 130);
        assert_eq!(spec.title, "toucan - 15pts");
        assert_eq!(spec.file_name, format!("QR_toucan_{}.png", keyword.id()));
    }

    #[rstest]
    fn registry_replaces_entries_in_place(base_url: Url) {
        let first = unclaimed_keyword("macaw", 20);
        let second = unclaimed_keyword("toucan", 10);
        let mut registry = QrCodeRegistry::new();
        registry.register(QrCodeSpec::for_keyword(&first, &base_url));
        registry.register(QrCodeSpec::for_keyword(&second, &base_url));

        let mut updated = QrCodeSpec::for_keyword(&first, &base_url);
        updated.title = "reprinted".to_owned();
        registry.register(updated);

        let titles: Vec<_> = registry
            .entries
            .iter()
            .map(|spec| spec.title.as_str())
            .collect();
        assert_eq!(titles, ["reprinted", "toucan - 10pts"]);
        assert_eq!(registry.index.get(&second.id()), Some(&1));
    }

    #[rstest]
    fn duplicate_keywords_collapse_to_one_entry(base_url: Url) {
        let keyword = unclaimed_keyword("macaw", 20);

        let sheet = QrSheet::build([&keyword, &keyword], &base_url);

        assert_eq!(sheet.into_entries().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn service_keeps_repository_order(base_url: Url) {
        let high = unclaimed_keyword("macaw", 30);
        let low = unclaimed_keyword("toucan", 5);
        let listed = vec![high.clone(), low.clone()];
        let mut repo = MockKeywordRepository::new();
        repo.expect_list_by_points_desc()
            .times(1)
            .return_once(move || Ok(listed));

        let sheet = QrSheetService::new(Arc::new(repo), base_url)
            .sheet()
            .await
            .expect("sheet builds");

        let ids: Vec<_> = sheet.into_entries().into_iter().map(|s| s.keyword_id).collect();
        assert_eq!(ids, [high.id(), low.id()]);
    }
}
