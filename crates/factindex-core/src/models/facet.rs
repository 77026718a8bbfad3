use serde::{Deserialize, Serialize};

/// Separator between the parent and child part of a `tags.lvl1` value.
pub const TAG_DELIMITER: &str = " > ";

/// One facet value with its count for the current result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFacetItem {
    pub label: String,
    pub value: String,
    pub count: u32,
    pub is_refined: bool,
}

impl TagFacetItem {
    #[must_use]
    pub fn new(value: impl Into<String>, count: u32, is_refined: bool) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            count,
            is_refined,
        }
    }
}

/// Splits `"Parent > Child"` on the first delimiter.
#[must_use]
pub fn split_tag(value: &str) -> Option<(&str, &str)> {
    value.split_once(TAG_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tag_uses_first_delimiter_only() {
        assert_eq!(split_tag("Events > Conference"), Some(("Events", "Conference")));
        assert_eq!(
            split_tag("Approach > Iterative > Loops"),
            Some(("Approach", "Iterative > Loops"))
        );
        assert_eq!(split_tag("Events>Conference"), None);
        assert_eq!(split_tag("Events"), None);
    }
}
