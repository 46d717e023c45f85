use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Description, ImageUrl, MenuItemId, MenuItemName, MenuPrice, MenuSection, PlaceId,
};

/// Section label used for items without one.
pub const FALLBACK_SECTION: &str = "Other";

/// A dish or product offered by a place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub place_id: PlaceId,
    pub name: MenuItemName,
    pub description: Option<Description>,
    pub price: Option<MenuPrice>,
    pub image_url: Option<ImageUrl>,
    pub section: Option<MenuSection>,
    pub is_visible: bool,
    pub created_at: NaiveDateTime,
}

/// Data required to insert or overwrite a [`MenuItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMenuItem {
    pub place_id: PlaceId,
    pub name: MenuItemName,
    pub description: Option<Description>,
    pub price: Option<MenuPrice>,
    pub image_url: Option<ImageUrl>,
    pub section: Option<MenuSection>,
    pub is_visible: bool,
}

/// Visible menu items sharing a section label.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuGroup {
    pub section: String,
    pub items: Vec<MenuItem>,
}

fn section_priority(section: &str) -> u32 {
    match section.to_lowercase().as_str() {
        "foods" | "main course" => 0,
        "salads" | "starters" => 1,
        "sweets" | "dessert" | "desserts" => 2,
        "drinks" | "beverages" => 3,
        _ => 999,
    }
}

/// Groups visible items by section: mains, starters, desserts, drinks, then
/// the rest alphabetically. Item order within a section is preserved.
pub fn group_menu(items: Vec<MenuItem>) -> Vec<MenuGroup> {
    let mut groups: Vec<MenuGroup> = Vec::new();

    for item in items.into_iter().filter(|item| item.is_visible) {
        let section = item
            .section
            .as_ref()
            .map_or(FALLBACK_SECTION, MenuSection::as_str)
            .to_string();
        match groups.iter_mut().find(|group| group.section == section) {
            Some(group) => group.items.push(item),
            None => groups.push(MenuGroup {
                section,
                items: vec![item],
            }),
        }
    }

    groups.sort_by(|a, b| {
        section_priority(&a.section)
            .cmp(&section_priority(&b.section))
            .then_with(|| a.section.cmp(&b.section))
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn item(id: i32, section: Option<&str>, is_visible: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(id).unwrap(),
            place_id: PlaceId::new(1).unwrap(),
            name: MenuItemName::new(format!("Item {id}")).unwrap(),
            description: None,
            price: None,
            image_url: None,
            section: section.map(|s| MenuSection::new(s).unwrap()),
            is_visible,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn orders_sections_by_priority_then_name() {
        let groups = group_menu(vec![
            item(1, Some("Drinks"), true),
            item(2, Some("Bakery"), true),
            item(3, None, true),
            item(4, Some("Main Course"), true),
            item(5, Some("Desserts"), true),
        ]);
        let sections: Vec<&str> = groups.iter().map(|g| g.section.as_str()).collect();
        assert_eq!(
            sections,
            vec!["Main Course", "Desserts", "Drinks", "Bakery", "Other"]
        );
    }

    #[test]
    fn hidden_items_are_dropped() {
        let groups = group_menu(vec![item(1, Some("Drinks"), false), item(2, Some("Drinks"), true)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items.len(), 1);
        assert_eq!(groups[0].items[0].id, 2);
    }
}
