//! Inventory lookups.
//!
//! The storage layer turns these into SQL: an escaped `LIKE '%term%'` on the product name, or
//! equality on the product's category id. `matches` evaluates the rule the SQLite store
//! applies: `%` and `_` in the term are literal and ASCII letters compare case-insensitively.
//! PostgreSQL's `LIKE` is case-sensitive, so there the store returns a subset of `matches`.

use crate::contract::model::{Category, Inventory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryLookup {
    /// Product name contains the term. An empty term matches every record.
    NameContains(String),
    /// Product belongs to the category with this identity. Only the id is compared.
    InCategory(Category),
}

impl InventoryLookup {
    pub fn matches(&self, inventory: &Inventory) -> bool {
        match self {
            Self::NameContains(term) => inventory
                .product
                .name
                .to_ascii_lowercase()
                .contains(&term.to_ascii_lowercase()),
            Self::InCategory(category) => inventory.product.category.id == category.id,
        }
    }

    /// Short description for log fields.
    pub fn describe(&self) -> String {
        match self {
            Self::NameContains(term) => format!("name contains '{term}'"),
            Self::InCategory(category) => format!("category id = {}", category.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::Product;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: "same description".to_string(),
            active: true,
        }
    }

    fn inventory(id: i64, product_name: &str, category: Category) -> Inventory {
        Inventory {
            id,
            product: Product {
                id: id * 10,
                name: product_name.to_string(),
                description: String::new(),
                image: String::new(),
                category,
            },
            stock: 5,
        }
    }

    fn stock() -> Vec<Inventory> {
        vec![
            inventory(1, "Leche Gloria", category(1, "Lácteos")),
            inventory(2, "Yogurt Gloria", category(1, "Lácteos")),
            inventory(3, "Pan de molde", category(2, "Panadería")),
        ]
    }

    fn run(lookup: &InventoryLookup) -> Vec<i64> {
        stock()
            .iter()
            .filter(|i| lookup.matches(i))
            .map(|i| i.id)
            .collect()
    }

    #[test]
    fn empty_term_matches_everything() {
        assert_eq!(
            run(&InventoryLookup::NameContains(String::new())),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn substring_anywhere_in_name() {
        assert_eq!(
            run(&InventoryLookup::NameContains("Gloria".into())),
            vec![1, 2]
        );
        assert_eq!(run(&InventoryLookup::NameContains("molde".into())), vec![3]);
        assert!(run(&InventoryLookup::NameContains("Aceite".into())).is_empty());
    }

    #[test]
    fn ascii_case_is_ignored() {
        assert_eq!(
            run(&InventoryLookup::NameContains("gloria".into())),
            vec![1, 2]
        );
        assert_eq!(run(&InventoryLookup::NameContains("PAN DE".into())), vec![3]);
    }

    #[test]
    fn non_ascii_letters_keep_their_case() {
        let items = [inventory(1, "Ñame andino", category(1, "Tubérculos"))];
        let hits = |term: &str| {
            items
                .iter()
                .filter(|i| InventoryLookup::NameContains(term.into()).matches(i))
                .count()
        };
        assert_eq!(hits("Ñame"), 1);
        assert_eq!(hits("ñame"), 0);
    }

    #[test]
    fn wildcard_characters_are_literal() {
        assert!(run(&InventoryLookup::NameContains("%".into())).is_empty());
        assert!(run(&InventoryLookup::NameContains("L_che".into())).is_empty());
    }

    #[test]
    fn category_match_is_by_identity_only() {
        // same name and description as category 1, different id
        let lookalike = category(9, "Lácteos");
        assert!(run(&InventoryLookup::InCategory(lookalike)).is_empty());

        // different fields, same id
        let renamed = Category {
            name: "Renamed".to_string(),
            description: "other".to_string(),
            active: false,
            ..category(1, "x")
        };
        assert_eq!(run(&InventoryLookup::InCategory(renamed)), vec![1, 2]);
    }

    #[test]
    fn describe_is_readable() {
        assert_eq!(
            InventoryLookup::NameContains("pan".into()).describe(),
            "name contains 'pan'"
        );
        assert_eq!(
            InventoryLookup::InCategory(category(4, "x")).describe(),
            "category id = 4"
        );
    }
}
