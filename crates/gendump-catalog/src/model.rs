//! Serde model of a catalog file.
//!
//! Keys are camelCase. Type references are qualified names
//! (`namespace.Name`, or just `Name` for an empty namespace).

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    #[serde(default)]
    pub placeholders: Option<PlaceholderDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlaceholderDecl {
    #[serde(default)]
    pub structural_reference: Option<String>,
    #[serde(default)]
    pub primitive_numeric: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub assembly: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(default)]
    pub common_arguments: Vec<ArgumentList>,
    #[serde(default = "default_supported")]
    pub supported: bool,
}

impl TypeDecl {
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

pub(crate) fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

fn default_supported() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Value,
    #[default]
    Reference,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParameterDecl {
    pub name: String,
    #[serde(default)]
    pub constraint: Constraint,
    #[serde(default)]
    pub allowed: Option<Vec<String>>,
}

/// Hard constraint on a type parameter. Violations fail instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Constraint {
    #[default]
    Any,
    Value,
    Reference,
}

impl Constraint {
    pub fn admits(self, kind: TypeKind) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Value => kind == TypeKind::Value,
            Constraint::Reference => kind == TypeKind::Reference,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Constraint::Any => "any",
            Constraint::Value => "value type",
            Constraint::Reference => "reference type",
        }
    }
}

/// One candidate argument list: a single name or one name per parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentList(pub Vec<String>);

impl<'de> Deserialize<'de> for ArgumentList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(name) => Ok(ArgumentList(vec![name])),
            OneOrMany::Many(names) => Ok(ArgumentList(names)),
        }
    }
}
