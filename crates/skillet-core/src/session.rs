//! Session attributes.
//!
//! The session is an opaque key-value store the caller owns: attributes
//! arrive with the request, handlers may read and mutate them, and the
//! finalized response echoes them back verbatim. Persisting them between
//! turns is the caller's responsibility; the engine attaches no meaning to
//! their contents.

use serde_json::{Map, Value};
use skillet_types::envelope::SessionBody;

/// The attribute store for one conversation turn.
#[derive(Debug, Clone, Default)]
pub struct Session {
    id: String,
    new: bool,
    attributes: Map<String, Value>,
}

impl Session {
    pub(crate) fn from_body(body: &SessionBody) -> Self {
        Self {
            id: body.session_id.clone(),
            new: body.new,
            attributes: body.attributes.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// True when the platform opened a fresh session for this turn.
    pub fn is_new(&self) -> bool {
        self.new
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }
}
