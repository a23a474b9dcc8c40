//! Params domain logic - declared parameter shapes and argument normalization

use crate::shared::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Raw arguments of a single invocation, tagged by how the client sent them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Params {
    /// Positional arguments (`"params": [..]`)
    Positional(Vec<Value>),

    /// Named arguments (`"params": {..}`)
    Named(Map<String, Value>),
}

impl Params {
    /// Classify the `params` member of a request envelope.
    ///
    /// A missing member yields empty positional arguments. Scalars are rejected.
    pub fn from_value(value: Option<Value>) -> AppResult<Self> {
        match value {
            None => Ok(Params::Positional(Vec::new())),
            Some(Value::Array(values)) => Ok(Params::Positional(values)),
            Some(Value::Object(map)) => Ok(Params::Named(map)),
            Some(other) => Err(AppError::InvalidParams(format!(
                "params must be an array or an object, got {}",
                value_kind(&other)
            ))),
        }
    }

    /// Short name of the variant, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Params::Positional(_) => "array",
            Params::Named(_) => "object",
        }
    }

    pub fn as_named(&self) -> Option<&Map<String, Value>> {
        match self {
            Params::Named(map) => Some(map),
            Params::Positional(_) => None,
        }
    }

    /// Look up a named argument. Positional arguments carry no names.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Params::Named(map) => map.get(name),
            Params::Positional(_) => None,
        }
    }

    /// Iterate over argument values in order
    pub fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Params::Positional(values) => Box::new(values.iter()),
            Params::Named(map) => Box::new(map.values()),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Params::Positional(values) => Value::Array(values),
            Params::Named(map) => Value::Object(map),
        }
    }
}

impl TryFrom<Value> for Params {
    type Error = AppError;

    fn try_from(value: Value) -> AppResult<Self> {
        Params::from_value(Some(value))
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Params::Positional(values)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params::Named(map)
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        params.into_value()
    }
}

/// Declared shape of the arguments a handler expects
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ShapeDeclaration", into = "ShapeDeclaration")]
pub enum ParamsShape {
    /// Arguments reach the handler exactly as sent
    #[default]
    Unspecified,

    /// Arguments always reach the handler as a sequence
    AsArray,

    /// Arguments always reach the handler as a mapping
    AsObject,

    /// Arguments reach the handler as a mapping holding exactly these names
    NamedList(Vec<String>),

    /// Arguments reach the handler as a mapping of these keys, with fallback values
    DefaultsMap(Map<String, Value>),
}

impl ParamsShape {
    /// Short name of the variant, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ParamsShape::Unspecified => "unspecified",
            ParamsShape::AsArray => "array",
            ParamsShape::AsObject => "object",
            ParamsShape::NamedList(_) => "named_list",
            ParamsShape::DefaultsMap(_) => "defaults_map",
        }
    }

    /// Reject declarations no call could be bound against
    pub fn validate(&self) -> AppResult<()> {
        match self {
            ParamsShape::NamedList(names) => {
                let mut seen = HashSet::with_capacity(names.len());
                for name in names {
                    if name.is_empty() {
                        return Err(AppError::InvalidConfiguration(
                            "parameter names cannot be empty".to_string(),
                        ));
                    }
                    if !seen.insert(name.as_str()) {
                        return Err(AppError::InvalidConfiguration(format!(
                            "parameter name '{}' declared more than once",
                            name
                        )));
                    }
                }
                Ok(())
            }
            ParamsShape::DefaultsMap(defaults) => {
                if defaults.keys().any(|key| key.is_empty()) {
                    return Err(AppError::InvalidConfiguration(
                        "parameter names cannot be empty".to_string(),
                    ));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Bind incoming arguments to this shape.
    ///
    /// Pure: the same input always yields the same output. Missing named
    /// arguments become `Value::Null`. Positional input carries no names,
    /// so it never fills a named list or a defaults map.
    pub fn normalize(&self, params: Params) -> Params {
        match self {
            ParamsShape::Unspecified => params,
            ParamsShape::AsArray => match params {
                Params::Named(map) => Params::Positional(map.into_iter().map(|(_, value)| value).collect()),
                positional => positional,
            },
            ParamsShape::AsObject => match params {
                Params::Positional(values) => Params::Named(
                    values
                        .into_iter()
                        .enumerate()
                        .map(|(index, value)| (index.to_string(), value))
                        .collect(),
                ),
                named => named,
            },
            ParamsShape::NamedList(names) => Params::Named(
                names
                    .iter()
                    .map(|name| (name.clone(), params.get(name).cloned().unwrap_or(Value::Null)))
                    .collect(),
            ),
            ParamsShape::DefaultsMap(defaults) => Params::Named(
                defaults
                    .iter()
                    .map(|(name, default)| {
                        let value = params.get(name).unwrap_or(default).clone();
                        (name.clone(), value)
                    })
                    .collect(),
            ),
        }
    }
}

/// Wire form of a shape declaration in configuration files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ShapeDeclaration {
    Keyword(String),
    Names(Vec<String>),
    Defaults(Map<String, Value>),
}

impl TryFrom<ShapeDeclaration> for ParamsShape {
    type Error = AppError;

    fn try_from(declaration: ShapeDeclaration) -> AppResult<Self> {
        let shape = match declaration {
            ShapeDeclaration::Keyword(keyword) => match keyword.to_ascii_lowercase().as_str() {
                "unspecified" => ParamsShape::Unspecified,
                "array" => ParamsShape::AsArray,
                "object" => ParamsShape::AsObject,
                _ => {
                    return Err(AppError::InvalidConfiguration(format!(
                        "unknown params shape '{}'",
                        keyword
                    )))
                }
            },
            ShapeDeclaration::Names(names) => ParamsShape::NamedList(names),
            ShapeDeclaration::Defaults(defaults) => ParamsShape::DefaultsMap(defaults),
        };
        shape.validate()?;
        Ok(shape)
    }
}

impl From<ParamsShape> for ShapeDeclaration {
    fn from(shape: ParamsShape) -> Self {
        match shape {
            ParamsShape::Unspecified => ShapeDeclaration::Keyword("unspecified".to_string()),
            ParamsShape::AsArray => ShapeDeclaration::Keyword("array".to_string()),
            ParamsShape::AsObject => ShapeDeclaration::Keyword("object".to_string()),
            ParamsShape::NamedList(names) => ShapeDeclaration::Names(names),
            ParamsShape::DefaultsMap(defaults) => ShapeDeclaration::Defaults(defaults),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
