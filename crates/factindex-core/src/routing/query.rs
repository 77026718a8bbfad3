use std::fmt::{Display, Formatter};

use url::form_urlencoded;

/// One `key=value` segment. `raw` is kept verbatim so parameters this crate
/// does not own are written back exactly as they arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryPair {
    raw: String,
    key: String,
    value: String,
}

impl QueryPair {
    fn parse(segment: &str) -> Self {
        let (key, value) = form_urlencoded::parse(segment.as_bytes())
            .next()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .unwrap_or_default();
        Self {
            raw: segment.to_string(),
            key,
            value,
        }
    }

    fn encoded(key: &str, value: &str) -> Self {
        let raw = form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .finish();
        Self {
            raw,
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Ordered, multi-valued query string (`URLSearchParams` semantics).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<QueryPair>,
}

impl QueryString {
    /// Never fails: undecodable bytes are replaced, empty segments skipped.
    #[must_use]
    pub fn parse(search: &str) -> Self {
        let search = search.strip_prefix('?').unwrap_or(search);
        Self {
            pairs: search
                .split('&')
                .filter(|segment| !segment.is_empty())
                .map(QueryPair::parse)
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.key == key)
            .map(|pair| pair.value.as_str())
    }

    /// Every value for `key`, in URL order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |pair| pair.key == key)
            .map(|pair| pair.value.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|pair| pair.key == key)
    }

    pub fn append(&mut self, key: &str, value: &str) {
        self.pairs.push(QueryPair::encoded(key, value));
    }

    /// Replaces the first occurrence in place and drops the rest; appends
    /// when the key is new.
    pub fn set(&mut self, key: &str, value: &str) {
        let Some(first) = self.pairs.iter().position(|pair| pair.key == key) else {
            self.append(key, value);
            return;
        };
        self.pairs[first] = QueryPair::encoded(key, value);
        let mut index = 0;
        self.pairs.retain(|pair| {
            let keep = index <= first || pair.key != key;
            index += 1;
            keep
        });
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|pair| pair.key != key);
    }

    /// Serialized form without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|pair| pair.raw.as_str())
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl Display for QueryString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Path, query and fragment of the page URL. The origin is not tracked; all
/// history writes are same-origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    pub search: QueryString,
    pub hash: Option<String>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
            search: QueryString::default(),
            hash: None,
        }
    }
}

impl Location {
    /// Accepts absolute `http(s)` URLs, `/path?query#hash`, or a bare `?query`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let absolute = url::Url::parse(raw)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"));
        if let Some(url) = absolute {
            return Self {
                pathname: url.path().to_string(),
                search: QueryString::parse(url.query().unwrap_or_default()),
                hash: url.fragment().map(ToString::to_string),
            };
        }

        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (raw, None),
        };
        let (pathname, search) = rest.split_once('?').unwrap_or((rest, ""));
        Self {
            pathname: if pathname.is_empty() {
                "/".to_string()
            } else {
                pathname.to_string()
            },
            search: QueryString::parse(search),
            hash,
        }
    }

    #[must_use]
    pub fn with_search(&self, search: QueryString) -> Self {
        Self {
            pathname: self.pathname.clone(),
            search,
            hash: self.hash.clone(),
        }
    }

    /// Same-origin href: path, then `?query` when non-empty, then `#hash`.
    #[must_use]
    pub fn href(&self) -> String {
        let mut href = self.pathname.clone();
        if !self.search.is_empty() {
            href.push('?');
            href.push_str(&self.search.to_query_string());
        }
        if let Some(hash) = &self.hash {
            href.push('#');
            href.push_str(hash);
        }
        href
    }
}
