use serde::Serialize;

use super::icons::MenuIcon;

pub const DEFAULT_COLLAPSE_TITLE: &str = "Show less";
pub const DEFAULT_EXPAND_TITLE: &str = "Show more";

/// One entry of the navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub title: String,
    /// Empty for groups and headings
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<MenuIcon>,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub collapse: bool,
    pub collapse_title: String,
    pub expand_title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn link(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            icon: None,
            disabled: false,
            heading: None,
            collapse: false,
            collapse_title: DEFAULT_COLLAPSE_TITLE.to_string(),
            expand_title: DEFAULT_EXPAND_TITLE.to_string(),
            children: Vec::new(),
        }
    }

    pub fn group(title: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self {
            children,
            ..Self::link(title, "")
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            heading: Some(text.clone()),
            ..Self::link(text, "")
        }
    }

    pub fn with_icon(mut self, icon: MenuIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn collapsible(mut self) -> Self {
        self.collapse = true;
        self
    }

    pub fn is_navigable(&self) -> bool {
        !self.path.is_empty() && !self.disabled
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuLoadPhase {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

/// Process-wide menu state observed by the guard and the navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLoadState {
    pub tree: Vec<MenuNode>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub phase: MenuLoadPhase,
    /// Bumped whenever the tree is replaced
    pub revision: u64,
}

impl MenuLoadState {
    pub fn uninitialized(default_tree: Vec<MenuNode>) -> Self {
        Self {
            tree: default_tree,
            is_loading: false,
            error: None,
            phase: MenuLoadPhase::Uninitialized,
            revision: 0,
        }
    }

    pub(crate) fn replace_tree(&mut self, tree: Vec<MenuNode>) {
        self.tree = tree;
        self.revision += 1;
    }
}
