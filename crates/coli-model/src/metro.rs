use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A metropolitan area offered by the calculator's dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetroOption {
    /// Numeric identifier from the option's `value` attribute.
    pub id: u32,
    /// Display text of the option (e.g., "DE Dover").
    pub name: String,
}

/// Ordered, de-duplicated set of metros harvested from the options page.
///
/// Iteration follows first-seen document order. Inserting an identifier
/// that is already present replaces its name in place, so the last-seen
/// display text wins while the position stays where the id first appeared.
#[derive(Debug, Clone, Default)]
pub struct MetroCatalog {
    metros: Vec<MetroOption>,
    positions: HashMap<u32, usize>,
}

impl MetroCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a metro. Returns the previous name if the id was already present.
    pub fn insert(&mut self, id: u32, name: impl Into<String>) -> Option<String> {
        let name = name.into();
        match self.positions.get(&id) {
            Some(&pos) => Some(std::mem::replace(&mut self.metros[pos].name, name)),
            None => {
                self.positions.insert(id, self.metros.len());
                self.metros.push(MetroOption { id, name });
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.metros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metros.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetroOption> {
        self.metros.iter()
    }
}

impl<'a> IntoIterator for &'a MetroCatalog {
    type Item = &'a MetroOption;
    type IntoIter = std::slice::Iter<'a, MetroOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut catalog = MetroCatalog::new();
        catalog.insert(34, "City B");
        catalog.insert(12, "City A");
        let ids: Vec<u32> = catalog.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![34, 12]);
    }

    #[test]
    fn test_duplicate_id_last_name_wins() {
        let mut catalog = MetroCatalog::new();
        assert_eq!(catalog.insert(12, "Old Name"), None);
        catalog.insert(34, "City B");
        assert_eq!(catalog.insert(12, "City A"), Some("Old Name".to_string()));

        assert_eq!(catalog.len(), 2);
        let names: Vec<&str> = catalog.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["City A", "City B"]);
        // Position is unchanged by the overwrite
        assert_eq!(catalog.iter().next().unwrap().id, 12);
    }
}
