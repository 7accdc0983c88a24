//! User-requested mutations, validated before they reach the network.
//!
//! # Design
//! The page submits untyped form fields with an `_action` tag. They are
//! turned into an [`Intent`] once, at the boundary, so the dispatcher only
//! ever matches on a closed enum.

use std::collections::HashMap;
use std::fmt;

use crate::error::DispatchError;
use crate::types::TodoId;

/// Form field naming the requested action.
pub const ACTION_FIELD: &str = "_action";

/// Which operation an intent performs. Used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    Create,
    Update,
    Delete,
}

impl IntentKind {
    /// The `_action` value the page uses for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            IntentKind::Create => "create",
            IntentKind::Update => "update",
            IntentKind::Delete => "delete",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mutation of the remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create { title: String },
    /// `current_completed` is the value the page rendered; the update sends
    /// its negation without re-reading the server.
    ToggleComplete { id: TodoId, current_completed: bool },
    Delete { id: TodoId },
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Create { .. } => IntentKind::Create,
            Intent::ToggleComplete { .. } => IntentKind::Update,
            Intent::Delete { .. } => IntentKind::Delete,
        }
    }

    /// Check the presence rules that the type alone cannot express.
    pub fn validate(&self) -> Result<(), DispatchError> {
        match self {
            Intent::Create { title } if title.is_empty() => {
                Err(DispatchError::invalid("title must not be empty"))
            }
            Intent::Create { .. } | Intent::ToggleComplete { .. } | Intent::Delete { .. } => Ok(()),
        }
    }

    /// Build an intent from submitted form fields.
    ///
    /// | `_action` | fields |
    /// |---|---|
    /// | `create` | `title` |
    /// | `update` | `id`, `completed` (current value, `true`/`false`) |
    /// | `delete` | `id` |
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, DispatchError> {
        let action = required(fields, ACTION_FIELD)?;
        let intent = match action {
            "create" => Intent::Create {
                title: required(fields, "title")?.to_string(),
            },
            "update" => Intent::ToggleComplete {
                id: parse_id(fields)?,
                current_completed: parse_bool(required(fields, "completed")?)?,
            },
            "delete" => Intent::Delete {
                id: parse_id(fields)?,
            },
            other => return Err(DispatchError::invalid(format!("unknown action `{other}`"))),
        };
        intent.validate()?;
        Ok(intent)
    }
}

fn required<'a>(fields: &'a HashMap<String, String>, name: &str) -> Result<&'a str, DispatchError> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| DispatchError::invalid(format!("missing field `{name}`")))
}

fn parse_id(fields: &HashMap<String, String>) -> Result<TodoId, DispatchError> {
    let raw = required(fields, "id")?;
    raw.parse()
        .map_err(|_| DispatchError::invalid(format!("invalid id `{raw}`")))
}

fn parse_bool(raw: &str) -> Result<bool, DispatchError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(DispatchError::invalid(format!(
            "invalid completed value `{other}`"
        ))),
    }
}
