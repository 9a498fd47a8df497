use indexmap::IndexMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Undeclared label `{0}`")]
pub struct UndeclaredLabel(pub String);

/// Label name to word offset, kept in declaration order.
#[derive(Debug, Default, Clone)]
pub struct Labels(IndexMap<String, u16>);

impl Labels {
    pub fn new() -> Self {
        Labels(IndexMap::new())
    }

    /// Bind `name` to `addr`. Returns the previous binding when the name was
    /// already declared, so the caller can reject duplicates.
    pub fn insert(&mut self, name: String, addr: u16) -> Option<u16> {
        self.0.insert(name, addr)
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.0.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_duplicates() {
        let mut labels = Labels::new();
        assert_eq!(labels.insert("start".to_string(), 0), None);
        assert_eq!(labels.insert("loop".to_string(), 4), None);
        assert_eq!(labels.insert("start".to_string(), 8), Some(0));
    }

    #[test]
    fn keeps_declaration_order() {
        let mut labels = Labels::new();
        labels.insert("b".to_string(), 1);
        labels.insert("a".to_string(), 2);
        let names: Vec<&str> = labels.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
