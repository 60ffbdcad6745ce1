//! Two-level cuisine hierarchy matching.
//!
//! A filter matches a cuisine label when the two are equal ignoring case, or
//! when the filter names a parent category and the label contains one of the
//! category's child substrings. Matching is one-directional: filtering by a
//! child such as "Pizza" does not surface labels tagged only "Italská".

use kamjdes_core::{CuisineCategory, Entity};

#[derive(Debug, Clone)]
struct Category {
    name: String,
    key: String,
    children: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CuisineMatcher {
    categories: Vec<Category>,
}

impl CuisineMatcher {
    #[must_use]
    pub fn new(categories: &[CuisineCategory]) -> Self {
        Self {
            categories: categories
                .iter()
                .map(|c| Category {
                    name: c.name.clone(),
                    key: c.name.trim().to_lowercase(),
                    children: c.children.iter().map(|child| child.to_lowercase()).collect(),
                })
                .collect(),
        }
    }

    /// Whether the cuisine `label` satisfies the selected `filter`.
    #[must_use]
    pub fn matches(&self, label: &str, filter: &str) -> bool {
        let label = label.trim().to_lowercase();
        let filter = filter.trim().to_lowercase();
        if label.is_empty() || filter.is_empty() {
            return false;
        }

        if label == filter {
            return true;
        }

        self.find(&filter)
            .is_some_and(|category| category.children.iter().any(|child| label.contains(child.as_str())))
    }

    /// Whether any of the entity's cuisine tokens satisfies `filter`.
    #[must_use]
    pub fn entity_matches(&self, entity: &Entity, filter: &str) -> bool {
        entity
            .cuisine_tokens()
            .iter()
            .any(|token| self.matches(token, filter))
    }

    #[must_use]
    pub fn is_category(&self, name: &str) -> bool {
        self.find(&name.trim().to_lowercase()).is_some()
    }

    /// Parent category names in table order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    fn find(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use kamjdes_core::DiscoveryTables;

    use super::*;

    fn matcher() -> CuisineMatcher {
        CuisineMatcher::new(&DiscoveryTables::builtin().unwrap().cuisine_categories)
    }

    #[test]
    fn child_label_matches_parent_category() {
        let m = matcher();
        assert!(m.matches("Thajská", "Asijská"));
        assert!(m.matches("Pizza", "Italská"));
        assert!(m.matches("Thajská kuchyně", "Asijská"));
        assert!(m.matches("Neapolská pizza", "Italská"));
    }

    #[test]
    fn child_label_does_not_match_unrelated_category() {
        let m = matcher();
        assert!(!m.matches("Thajská", "Italská"));
        assert!(!m.matches("Pizza", "Asijská"));
    }

    #[test]
    fn exact_label_matches_itself_ignoring_case() {
        let m = matcher();
        assert!(m.matches("Pizza", "Pizza"));
        assert!(m.matches("pizza", "PIZZA"));
        assert!(m.matches("Italská", "italská"));
        assert!(m.matches("Česká", "Česká"));
    }

    #[test]
    fn matching_is_one_directional() {
        let m = matcher();
        // Parent label does not satisfy a child filter.
        assert!(!m.matches("Italská", "Pizza"));
        assert!(!m.matches("Asijská", "Thajská"));
    }

    #[test]
    fn label_containing_category_name_is_not_a_child_match() {
        let m = matcher();
        assert!(!m.matches("Moderní asijská fusion", "Asijská"));
        assert!(m.matches("Moderní asijská fusion", "moderní asijská fusion"));
    }

    #[test]
    fn non_category_filter_requires_exact_match() {
        let m = matcher();
        assert!(!m.matches("Pizza napoletana", "Pizza"));
        assert!(!m.matches("Burger", "Burgery"));
    }

    #[test]
    fn empty_inputs_never_match() {
        let m = matcher();
        assert!(!m.matches("", "Asijská"));
        assert!(!m.matches("Thajská", ""));
        assert!(!m.matches("", ""));
    }

    #[test]
    fn is_category_ignores_case() {
        let m = matcher();
        assert!(m.is_category("ASIJSKÁ"));
        assert!(!m.is_category("Sushi"));
        assert_eq!(m.category_names().count(), 3);
    }
}
