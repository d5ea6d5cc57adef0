use url::Url;

/// One fetch's worth of results plus the API's pagination metadata.
///
/// `results` keeps the API's display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub prev: Option<Url>,
    pub next: Option<Url>,
}

impl<T> Page<T> {
    pub fn new(info: PageInfo, results: Vec<T>) -> Self {
        Self { info, results }
    }

    /// URL of the following page, absent once pagination is exhausted.
    pub fn next_page(&self) -> Option<&Url> {
        self.info.next.as_ref()
    }

    /// Maps every result, keeping order and `info`.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            info: self.info,
            results: self.results.into_iter().map(f).collect(),
        }
    }

    /// Appends `next` after this page's results, taking `next.info`.
    pub fn merged_with(&self, next: &Page<T>) -> Page<T>
    where
        T: Clone,
    {
        let mut results = Vec::with_capacity(self.results.len() + next.results.len());
        results.extend_from_slice(&self.results);
        results.extend_from_slice(&next.results);

        Page {
            info: next.info.clone(),
            results,
        }
    }
}
