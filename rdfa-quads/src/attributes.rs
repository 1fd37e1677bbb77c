use indexmap::IndexMap;

/// The state of an attribute on an element.
///
/// RDFa distinguishes between an attribute that is missing and one that
/// is present but empty: `@about=""` names the document, `@vocab=""`
/// resets the vocabulary and `@datatype=""` forces a plain literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attr<T> {
    Missing,
    Empty,
    Value(T),
}

impl<T> Attr<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attr<U> {
        match self {
            Attr::Missing => Attr::Missing,
            Attr::Empty => Attr::Empty,
            Attr::Value(v) => Attr::Value(f(v)),
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Attr::Missing)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Attr::Value(v) => Some(v),
            Attr::Missing | Attr::Empty => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Attr::Value(v) => Some(v),
            Attr::Missing | Attr::Empty => None,
        }
    }
}

/// The attributes of a single element, keyed by lower-cased name.
///
/// When a name is repeated the first occurrence wins, as in HTML.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    attrs: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        self.attrs.entry(name).or_insert_with(|| value.into());
    }

    /// The value exactly as written, if the attribute is present.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// The trimmed value; whitespace-only values count as [`Attr::Empty`].
    pub fn get(&self, name: &str) -> Attr<&str> {
        match self.attrs.get(name) {
            None => Attr::Missing,
            Some(v) => match v.trim() {
                "" => Attr::Empty,
                v => Attr::Value(v),
            },
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinguishes_missing_empty_and_value() {
        let attrs: Attributes = [("about", ""), ("vocab", "  "), ("typeof", " Person ")]
            .into_iter()
            .collect();

        assert_eq!(attrs.get("about"), Attr::Empty);
        assert_eq!(attrs.get("vocab"), Attr::Empty);
        assert_eq!(attrs.get("typeof"), Attr::Value("Person"));
        assert_eq!(attrs.get("datatype"), Attr::Missing);
        assert_eq!(attrs.raw("typeof"), Some(" Person "));
    }

    #[test]
    fn names_are_case_insensitive_and_first_wins() {
        let attrs: Attributes = [("ABOUT", "#a"), ("about", "#b")].into_iter().collect();
        assert_eq!(attrs.get("about"), Attr::Value("#a"));
        assert_eq!(attrs.iter().count(), 1);
    }
}
