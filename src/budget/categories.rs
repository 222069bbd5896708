use super::BudgetError;

/// Label the report engine uses for the grand total. Never a selectable category.
pub const TOTAL_LABEL: &str = "Total";

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Groceries",
    "Online Orders",
    "Restaurants & Coffee Shops",
    "Electronics",
    "Subscriptions",
    "Rent",
    "Internet",
    "Cell Phone",
];

/// The ordered set of categories an expense may be filed under.
///
/// Starts from [`DEFAULT_CATEGORIES`] and only grows. Nothing here is persisted,
/// so every new registry starts over from the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        CategoryRegistry::new()
    }
}

impl CategoryRegistry {
    pub fn new() -> CategoryRegistry {
        CategoryRegistry {
            names: DEFAULT_CATEGORIES.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Matching is exact and case-sensitive, "gym" and "Gym" are distinct.
    pub fn add(&mut self, name: &str) -> Result<&str, BudgetError> {
        let name = name.trim();
        if name.is_empty() || name == TOTAL_LABEL || self.contains(name) {
            return Err(BudgetError::InvalidCategory(name.to_string()));
        }

        self.names.push(name.to_string());

        Ok(&self.names[self.names.len() - 1])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }

    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let registry = CategoryRegistry::new();

        assert_eq!(registry.len(), 8);
        assert_eq!(registry.list()[0], "Groceries");
        assert_eq!(registry.list()[7], "Cell Phone");
        assert!(!registry.contains(TOTAL_LABEL));
    }

    #[test]
    fn test_add_appends_in_order() -> Result<()> {
        let mut registry = CategoryRegistry::new();
        assert_eq!(registry.add("Gym")?, "Gym");
        assert_eq!(registry.add("  Travel ")?, "Travel");

        assert_eq!(registry.len(), 10);
        assert_eq!(registry.list()[8], "Gym");
        assert_eq!(registry.list()[9], "Travel");

        Ok(())
    }

    #[test]
    fn test_add_duplicate() {
        let mut registry = CategoryRegistry::new();
        let before = registry.clone();

        assert_eq!(registry.add("Rent"), Err(BudgetError::InvalidCategory("Rent".to_string())));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_add_is_case_sensitive() -> Result<()> {
        let mut registry = CategoryRegistry::new();
        registry.add("rent")?;

        assert!(registry.contains("rent"));
        assert!(registry.contains("Rent"));

        Ok(())
    }

    #[test]
    fn test_add_empty() {
        let mut registry = CategoryRegistry::new();

        assert_eq!(registry.add(""), Err(BudgetError::InvalidCategory(String::new())));
        assert_eq!(registry.add("   "), Err(BudgetError::InvalidCategory(String::new())));
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_add_reserved_total() {
        let mut registry = CategoryRegistry::new();

        assert_eq!(registry.add("Total"), Err(BudgetError::InvalidCategory("Total".to_string())));
        assert_eq!(registry.len(), 8);
    }
}
