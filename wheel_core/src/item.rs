/// One entry on the wheel, as loaded from a dataset row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Item {
    pub title: String,
    pub description: String,
    pub author: String,
    pub video_ref: String,
    pub tag: String,
}

impl Item {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Builds an item from positional fields; missing trailing fields stay empty.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = fields.into_iter().map(Into::into);
        let mut next = || fields.next().unwrap_or_default();
        Self {
            title: next(),
            description: next(),
            author: next(),
            video_ref: next(),
            tag: next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_trailing_fields_default_to_empty() {
        let item = Item::from_fields(["Title", "Desc"]);
        assert_eq!(item.title, "Title");
        assert_eq!(item.description, "Desc");
        assert!(item.author.is_empty());
        assert!(item.video_ref.is_empty());
        assert!(item.tag.is_empty());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let item = Item::from_fields(["a", "b", "c", "d", "e", "f"]);
        assert_eq!(item.tag, "e");
    }
}
