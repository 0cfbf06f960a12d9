use std::collections::BTreeSet;

use gamedesk_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Nested navigation link shown under a menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSubItem {
    label: NonEmptyString,
    path: NonEmptyString,
}

impl MenuSubItem {
    /// Creates a validated sub-item.
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            label: NonEmptyString::new(label)?,
            path: NonEmptyString::new(path)?,
        })
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the route path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }
}

/// Dashboard navigation entry gated by one top-level permission.
///
/// The permission key is stored apart from the label so relabelling an
/// entry does not change who may see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    permission_key: NonEmptyString,
    label: NonEmptyString,
    path: NonEmptyString,
    icon: Option<String>,
    sub_items: Vec<MenuSubItem>,
}

impl MenuEntry {
    /// Creates a validated menu entry.
    pub fn new(
        permission_key: impl Into<String>,
        label: impl Into<String>,
        path: impl Into<String>,
        icon: Option<String>,
        sub_items: Vec<MenuSubItem>,
    ) -> AppResult<Self> {
        let icon = icon.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Ok(Self {
            permission_key: NonEmptyString::new(permission_key)?,
            label: NonEmptyString::new(label)?,
            path: NonEmptyString::new(path)?,
            icon,
            sub_items,
        })
    }

    /// Returns the top-level permission name that unlocks this entry.
    #[must_use]
    pub fn permission_key(&self) -> &str {
        self.permission_key.as_str()
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the route path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the optional icon name.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns nested links.
    #[must_use]
    pub fn sub_items(&self) -> &[MenuSubItem] {
        &self.sub_items
    }

    /// Returns whether a lowercased granted-name set unlocks this entry.
    #[must_use]
    pub fn is_unlocked_by(&self, granted_names: &BTreeSet<String>) -> bool {
        granted_names.contains(&self.permission_key.as_str().to_lowercase())
    }
}

/// Keeps the entries unlocked by `granted_names`, in their original order.
///
/// `granted_names` must hold lowercased names, as produced by
/// [`crate::PermissionTree::granted_names`].
#[must_use]
pub fn visible_entries(menu: &[MenuEntry], granted_names: &BTreeSet<String>) -> Vec<MenuEntry> {
    menu.iter()
        .filter(|entry| entry.is_unlocked_by(granted_names))
        .cloned()
        .collect()
}

/// Permission key, label, route and icon of the dashboard's navigation.
const DASHBOARD_MENU: &[(&str, &str, &str, &str)] = &[
    ("Dashboard", "Dashboard", "/dashboard", "dashboard"),
    ("Users", "Users", "/users", "people"),
    ("Games", "Games", "/games", "sports_esports"),
    ("Matches", "Matches", "/matches", "emoji_events"),
    ("Duels", "Duels", "/duels", "swords"),
    ("Ads", "Ads", "/ads", "campaign"),
    ("Images", "Images", "/images", "image"),
    ("Admins", "Admin Management", "/admins", "admin_panel_settings"),
    ("Settings", "Settings", "/settings", "settings"),
];

/// Builds the dashboard's static navigation menu.
pub fn dashboard_menu() -> AppResult<Vec<MenuEntry>> {
    DASHBOARD_MENU
        .iter()
        .map(|(permission_key, label, path, icon)| {
            let sub_items = match *permission_key {
                "Games" => vec![
                    MenuSubItem::new("All Games", "/games")?,
                    MenuSubItem::new("Add Game", "/games/new")?,
                ],
                "Matches" => vec![
                    MenuSubItem::new("All Matches", "/matches")?,
                    MenuSubItem::new("Add Match", "/matches/new")?,
                ],
                _ => Vec::new(),
            };
            MenuEntry::new(
                *permission_key,
                *label,
                *path,
                Some((*icon).to_owned()),
                sub_items,
            )
        })
        .collect()
}
