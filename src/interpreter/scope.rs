use std::collections::HashMap;

use super::Value;

/// The flat variable store of a single function activation. There is no
/// block scoping; parameters and locals share this one map, and it is
/// destroyed when the call returns.
#[derive(Debug, Default)]
pub struct Scope {
    variables: HashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Bind a new variable or overwrite the value of an existing one.
    pub fn set(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_owned(), value);
    }
}
