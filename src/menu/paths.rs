use serde::Serialize;

use super::types::MenuNode;

/// Navigable paths of a tree, depth-first pre-order.
///
/// A disabled node drops only its own path; its children are still visited.
/// Duplicates are kept.
pub fn extract_menu_paths(tree: &[MenuNode]) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(tree, &mut paths);
    paths
}

fn collect_paths(nodes: &[MenuNode], paths: &mut Vec<String>) {
    for node in nodes {
        if node.is_navigable() {
            paths.push(node.path.clone());
        }
        collect_paths(&node.children, paths);
    }
}

/// Exact match, or a segment-boundary prefix match: `/account` admits
/// `/account/profile` but not `/account2`.
pub fn is_route_accessible(route: &str, allowed_paths: &[String]) -> bool {
    if allowed_paths.iter().any(|allowed| allowed == route) {
        return true;
    }

    let route = trim_trailing_slash(route);
    allowed_paths.iter().any(|allowed| {
        let allowed = trim_trailing_slash(allowed);
        route.starts_with(allowed)
            && (route.len() == allowed.len() || route.as_bytes().get(allowed.len()) == Some(&b'/'))
    })
}

fn trim_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePermission {
    pub path: String,
    pub title: String,
    pub allowed: bool,
    pub current: bool,
}

/// Every navigable menu entry, flagged with whether it is the current route
pub fn route_permissions(current_path: &str, tree: &[MenuNode]) -> Vec<RoutePermission> {
    let allowed = extract_menu_paths(tree);
    let mut out = Vec::new();
    collect_permissions(tree, current_path, &allowed, &mut out);
    out
}

fn collect_permissions(nodes: &[MenuNode], current_path: &str, allowed: &[String], out: &mut Vec<RoutePermission>) {
    for node in nodes {
        if !node.path.is_empty() {
            out.push(RoutePermission {
                path: node.path.clone(),
                title: node.title.clone(),
                allowed: !node.disabled && is_route_accessible(&node.path, allowed),
                current: node.path == current_path,
            });
        }
        collect_permissions(&node.children, current_path, allowed, out);
    }
}

/// Access view for one route against the current allowed paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAccess {
    pub current_path: String,
    pub is_allowed: bool,
    pub allowed_paths: Vec<String>,
}

impl RouteAccess {
    pub fn new(current_path: impl Into<String>, tree: &[MenuNode]) -> Self {
        let current_path = current_path.into();
        let allowed_paths = extract_menu_paths(tree);
        Self {
            is_allowed: is_route_accessible(&current_path, &allowed_paths),
            current_path,
            allowed_paths,
        }
    }

    pub fn check_access(&self, path: &str) -> bool {
        is_route_accessible(path, &self.allowed_paths)
    }
}
