use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Backends hand out both numeric and string ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) => EntityId::Number(n),
            Err(_) => EntityId::Text(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Users,
    Roles,
    Companies,
    Menus,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Users,
        EntityKind::Roles,
        EntityKind::Companies,
        EntityKind::Menus,
    ];

    /// Collection segment, also the rows key some paginate responses use
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Roles => "roles",
            EntityKind::Companies => "companies",
            EntityKind::Menus => "menus",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Users => "user",
            EntityKind::Roles => "role",
            EntityKind::Companies => "company",
            EntityKind::Menus => "menu",
        }
    }

    pub fn paginate_endpoint(&self) -> String {
        format!("{}/paginate", self.collection())
    }

    pub fn item_endpoint(&self, id: &EntityId) -> String {
        format!("{}/{}", self.collection(), id)
    }

    /// Users distinguish create from update by path; the others post every save to one endpoint
    pub fn save_endpoint(&self, id: Option<&EntityId>) -> String {
        match (self, id) {
            (EntityKind::Users, Some(id)) => self.item_endpoint(id),
            (EntityKind::Users, None) => "users".to_string(),
            (EntityKind::Roles, _) => "roles/create".to_string(),
            (EntityKind::Companies, _) => "companies/save".to_string(),
            (EntityKind::Menus, _) => "menus/create".to_string(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "users" | "user" => Ok(EntityKind::Users),
            "roles" | "role" => Ok(EntityKind::Roles),
            "companies" | "company" => Ok(EntityKind::Companies),
            "menus" | "menu" => Ok(EntityKind::Menus),
            other => Err(format!("unknown entity: {}", other)),
        }
    }
}

/// A record managed through a paginated grid
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> Option<&EntityId>;
    fn label(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::Users;

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn label(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<EntityId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Role {
    const KIND: EntityKind = EntityKind::Roles;

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Company {
    const KIND: EntityKind = EntityKind::Companies;

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn label(&self) -> String {
        if self.domain.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.domain)
        }
    }
}

/// Persisted menu row, as managed on the menu-management page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_no: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for MenuRecord {
    const KIND: EntityKind = EntityKind::Menus;

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn label(&self) -> String {
        match &self.url {
            Some(url) => format!("{} -> {}", self.title, url),
            None => self.title.clone(),
        }
    }
}
