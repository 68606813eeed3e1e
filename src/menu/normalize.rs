//! Backend menu payload → canonical [`MenuNode`] tree.
//!
//! Accepted shapes are a bare array of items, `{ "items": [...] }` and
//! `{ "menus": [...] }`, checked in that order. Field lookups follow the
//! loose truthiness the backend relies on: an empty string or `false` counts
//! as absent and falls through to the alternative key.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::defaults::default_menu;
use super::icons::MenuIcon;
use super::types::{MenuNode, DEFAULT_COLLAPSE_TITLE, DEFAULT_EXPAND_TITLE};

/// Normalize a menu payload, falling back to the default tree when its shape is unusable
pub fn normalize_menu(payload: &Value) -> Vec<MenuNode> {
    match try_normalize_menu(payload) {
        Some(tree) => tree,
        None => {
            warn!("Menu payload is not an array, using static menu");
            default_menu()
        }
    }
}

/// `None` when the payload is none of the accepted shapes
pub fn try_normalize_menu(payload: &Value) -> Option<Vec<MenuNode>> {
    let items = unwrap_items(payload)?;
    debug!("Normalizing {} menu items", items.len());
    Some(normalize_items(items))
}

fn unwrap_items(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Array(items) => Some(items),
        Value::Object(map) => map
            .get("items")
            .and_then(Value::as_array)
            .or_else(|| map.get("menus").and_then(Value::as_array)),
        _ => None,
    }
}

fn normalize_items(items: &[Value]) -> Vec<MenuNode> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(normalize_item(map)),
            other => {
                warn!("Skipping menu entry that is not an object: {}", other);
                None
            }
        })
        .collect()
}

fn normalize_item(item: &Map<String, Value>) -> MenuNode {
    let title = text_field(item, &["title", "name"]).unwrap_or_default();
    let mut path = text_field(item, &["path", "url"]).unwrap_or_default();

    let icon = match item.get("icon") {
        Some(Value::String(name)) if !name.is_empty() => MenuIcon::from_name(name),
        _ => None,
    };

    let heading = match item.get("heading") {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        Some(value) if is_truthy(value) => Some(title.clone()),
        _ if item.get("isHeading").and_then(Value::as_bool) == Some(true) => Some(title.clone()),
        _ => None,
    }
    // Headings without text are plain nodes
    .filter(|text| !text.is_empty());
    if heading.is_some() {
        path.clear();
    }

    let children = match item.get("children") {
        Some(Value::Array(children)) if !children.is_empty() => normalize_items(children),
        _ => Vec::new(),
    };

    MenuNode {
        title: heading.clone().unwrap_or(title),
        path,
        icon,
        disabled: flag_field(item, &["disabled", "isDisabled"]),
        heading,
        collapse: flag_field(item, &["collapse", "collapsible"]),
        collapse_title: text_field(item, &["collapseTitle"])
            .unwrap_or_else(|| DEFAULT_COLLAPSE_TITLE.to_string()),
        expand_title: text_field(item, &["expandTitle"])
            .unwrap_or_else(|| DEFAULT_EXPAND_TITLE.to_string()),
        children,
    }
}

/// First key holding a non-empty string (numbers are stringified)
fn text_field(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match item.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn flag_field(item: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().any(|key| item.get(*key).is_some_and(is_truthy))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_all_three_shapes() {
        let items = json!([{"title": "Dashboard", "path": "/dashboard"}]);
        let expected = normalize_menu(&items);
        assert_eq!(expected.len(), 1);
        assert_eq!(normalize_menu(&json!({"items": items.clone()})), expected);
        assert_eq!(normalize_menu(&json!({"menus": items})), expected);
    }

    #[test]
    fn items_take_precedence_over_menus() {
        let payload = json!({
            "items": [{"title": "From items"}],
            "menus": [{"title": "From menus"}]
        });
        assert_eq!(normalize_menu(&payload)[0].title, "From items");
    }

    #[test]
    fn malformed_payloads_fall_back_to_default() {
        for payload in [json!(null), json!("menus"), json!(42), json!({"menus": "nope"}), json!({})] {
            assert_eq!(normalize_menu(&payload), default_menu());
        }
    }

    #[test]
    fn alternate_keys_and_flags() {
        let tree = normalize_menu(&json!([{
            "name": "Reports",
            "url": "/reports",
            "icon": "BarChart3",
            "isDisabled": true,
            "collapsible": true,
            "collapseTitle": "Fewer"
        }]));
        let node = &tree[0];
        assert_eq!(node.title, "Reports");
        assert_eq!(node.path, "/reports");
        assert_eq!(node.icon, Some(MenuIcon::BarChart3));
        assert!(node.disabled);
        assert!(node.collapse);
        assert_eq!(node.collapse_title, "Fewer");
        assert_eq!(node.expand_title, DEFAULT_EXPAND_TITLE);
    }

    #[test]
    fn empty_title_falls_through_to_name() {
        let tree = normalize_menu(&json!([{"title": "", "name": "Fallback", "path": ""}]));
        assert_eq!(tree[0].title, "Fallback");
        assert_eq!(tree[0].path, "");
    }

    #[test]
    fn unknown_icon_degrades_to_none() {
        let tree = normalize_menu(&json!([{"title": "X", "icon": "NotAnIcon"}]));
        assert_eq!(tree[0].icon, None);
    }

    #[test]
    fn headings_keep_children_and_lose_path() {
        let tree = normalize_menu(&json!([
            {"heading": "Access Control", "title": "ignored", "path": "/ac", "children": [
                {"title": "Users", "path": "/ac/users"}
            ]},
            {"title": "Settings", "isHeading": true}
        ]));
        assert_eq!(tree[0].title, "Access Control");
        assert_eq!(tree[0].heading.as_deref(), Some("Access Control"));
        assert_eq!(tree[0].path, "");
        assert_eq!(tree[0].children[0].path, "/ac/users");
        assert_eq!(tree[1].heading.as_deref(), Some("Settings"));
    }

    #[test]
    fn empty_children_yield_leaf_and_non_objects_are_skipped() {
        let tree = normalize_menu(&json!([
            {"title": "Leaf", "path": "/leaf", "children": []},
            "stray",
            {"title": "Group", "children": [{"title": "Child", "path": "/child"}, 7]}
        ]));
        assert_eq!(tree.len(), 2);
        assert!(tree[0].is_leaf());
        assert_eq!(tree[1].children.len(), 1);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_menu(&json!({"menus": [
            {"heading": "Main"},
            {"isHeading": true},
            {"heading": true, "title": "Reports", "path": "/reports"},
            {"title": "Team", "icon": "PeopleIcon", "collapse": true, "children": [
                {"title": "Members", "path": "/team/members", "disabled": true},
                {"name": "Invites", "url": "/team/invites", "expandTitle": "More"}
            ]}
        ]}));
        let twice = normalize_menu(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
        assert_eq!(once[1].heading, None);
        assert_eq!(once[2].heading.as_deref(), Some("Reports"));
        assert_eq!(once[2].path, "");

        let default_again = normalize_menu(&serde_json::to_value(default_menu()).unwrap());
        assert_eq!(default_again, default_menu());
    }
}
