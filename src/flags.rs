use std::sync::Arc;

/// Decoded flags, in field-list order.
///
/// Values are `None` only for fields padded under [`Padding::Unknown`](crate::Padding::Unknown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagMap {
    fields: Arc<[String]>,
    values: Vec<Option<bool>>,
}

impl FlagMap {
    pub(crate) fn new(fields: Arc<[String]>, values: Vec<Option<bool>>) -> Self {
        debug_assert_eq!(fields.len(), values.len());
        FlagMap { fields, values }
    }

    /// Value of `field`, or `None` if the field list has no such field.
    pub fn get(&self, field: &str) -> Option<Option<bool>> {
        self.position(field).map(|index| self.values[index])
    }

    /// True only for fields decoded as an explicit `true`.
    pub fn is_set(&self, field: &str) -> bool {
        self.get(field).flatten().unwrap_or(false)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.position(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.fields.iter().map(String::as_str)
    }

    pub fn values(&self) -> &[Option<bool>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<bool>> {
        self.values
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.fields.iter().zip(self.values.iter()),
        }
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|name| name == field)
    }
}

pub struct Iter<'a> {
    inner: std::iter::Zip<std::slice::Iter<'a, String>, std::slice::Iter<'a, Option<bool>>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Option<bool>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(field, value)| (field.as_str(), *value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a FlagMap {
    type Item = (&'a str, Option<bool>);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FlagMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self {
            map.serialize_entry(field, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlagMap {
        let fields: Arc<[String]> = vec!["key1".to_string(), "key2".to_string(), "key3".to_string()].into();
        FlagMap::new(fields, vec![Some(true), Some(false), None])
    }

    #[test]
    fn lookup_by_field() {
        let flags = sample();
        assert_eq!(flags.get("key1"), Some(Some(true)));
        assert_eq!(flags.get("key3"), Some(None));
        assert_eq!(flags.get("missing"), None);
        assert!(flags.is_set("key1"));
        assert!(!flags.is_set("key2"));
        assert!(!flags.is_set("key3"));
        assert!(flags.contains("key2"));
    }

    #[test]
    fn iterates_in_field_order() {
        let flags = sample();
        let pairs: Vec<_> = flags.iter().collect();
        assert_eq!(pairs, vec![("key1", Some(true)), ("key2", Some(false)), ("key3", None)]);
        assert_eq!(flags.fields().collect::<Vec<_>>(), vec!["key1", "key2", "key3"]);
    }
}
