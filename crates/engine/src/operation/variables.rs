use serde_json::{Map, Value};

/// Variable values of one request.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Variables(Map<String, Value>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Variables {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Variables {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Argument value as written in the operation, possibly referencing variables.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Value(Value),
    Variable(String),
    List(Vec<InputValue>),
    Object(Vec<(String, InputValue)>),
}

impl InputValue {
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    pub fn has_variables(&self) -> bool {
        match self {
            InputValue::Value(_) => false,
            InputValue::Variable(_) => true,
            InputValue::List(values) => values.iter().any(InputValue::has_variables),
            InputValue::Object(fields) => fields.iter().any(|(_, value)| value.has_variables()),
        }
    }

    /// Substitutes variables. Undefined variables are null.
    pub fn resolve(&self, variables: &Variables) -> Value {
        match self {
            InputValue::Value(value) => value.clone(),
            InputValue::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
            InputValue::List(values) => Value::Array(values.iter().map(|value| value.resolve(variables)).collect()),
            InputValue::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.resolve(variables)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for InputValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}
