use std::fmt;

/// Separator used when writing the list back into the input field
pub const SEPARATOR: &str = ", ";

/// Ordered ingredient list backing the input field.
///
/// `insert` refuses exact duplicates and keeps first-insertion order.
/// Parsing keeps whatever the user typed, duplicates included, so a
/// round-trip through the field never drops text the user entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientList {
    items: Vec<String>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma-separated field value, trimming and dropping empty parts
    pub fn parse(text: &str) -> Self {
        let items = text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        Self { items }
    }

    /// Render the list as the input field shows it
    pub fn serialize(&self) -> String {
        self.items.join(SEPARATOR)
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.items.iter().any(|item| item == ingredient)
    }

    /// Append `ingredient` unless it is already present.
    ///
    /// Returns `true` when the list changed.
    pub fn insert(&mut self, ingredient: impl Into<String>) -> bool {
        let ingredient = ingredient.into();
        if self.contains(&ingredient) {
            return false;
        }
        self.items.push(ingredient);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}

impl fmt::Display for IngredientList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<S: Into<String>> FromIterator<S> for IngredientList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = IngredientList::new();
        for ingredient in iter {
            list.insert(ingredient);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_empty_parts() {
        let list = IngredientList::parse(" eggs ,, milk,  ,flour ");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["eggs", "milk", "flour"]);
        assert_eq!(list.serialize(), "eggs, milk, flour");
    }

    #[test]
    fn test_parse_empty_field() {
        assert!(IngredientList::parse("").is_empty());
        assert!(IngredientList::parse("  , ,").is_empty());
    }

    #[test]
    fn test_insert_appends_new_ingredient() {
        let mut list = IngredientList::parse("eggs, milk");
        assert!(list.insert("butter"));
        assert_eq!(list.serialize(), "eggs, milk, butter");
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_insert_rejects_exact_duplicate() {
        let mut list = IngredientList::parse("eggs, milk");
        assert!(!list.insert("milk"));
        assert_eq!(list.serialize(), "eggs, milk");
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let mut list = IngredientList::parse("Milk");
        assert!(list.insert("milk"));
        assert_eq!(list.serialize(), "Milk, milk");
    }

    #[test]
    fn test_parse_keeps_typed_duplicates() {
        let list = IngredientList::parse("eggs, eggs");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_from_iter_deduplicates() {
        let list: IngredientList = ["tomato", "basil", "tomato"].into_iter().collect();
        assert_eq!(list.to_string(), "tomato, basil");
    }
}
