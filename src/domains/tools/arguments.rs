//! Argument whitelisting.

use rmcp::model::JsonObject;
use serde_json::Value;

use super::descriptor::ToolDescriptor;

/// Call arguments restricted to a tool's whitelist.
///
/// Values are kept exactly as the caller sent them. Entries keep the
/// iteration order of the incoming object, so projecting the same object
/// twice yields the same sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredArguments {
    entries: Vec<(String, Value)>,
}

impl FilteredArguments {
    /// Project `arguments` onto the descriptor's whitelist.
    ///
    /// Unknown keys are dropped silently. Nothing is validated: a missing
    /// "required" key or a value of the wrong type is forwarded as is.
    pub fn project(descriptor: &ToolDescriptor, arguments: Option<&JsonObject>) -> Self {
        let entries = arguments
            .into_iter()
            .flat_map(|map| map.iter())
            .filter(|(key, _)| descriptor.accepts(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self { entries }
    }

    /// Value for `key`, if it survived filtering.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterate over the filtered pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
