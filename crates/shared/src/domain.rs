use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(ItemId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Inbox,
    Next,
    Waiting,
    Someday,
    Reference,
}

impl ItemStatus {
    /// Durable buckets an inbox item can be triaged into, in display order.
    pub const DURABLE: [ItemStatus; 4] = [
        ItemStatus::Next,
        ItemStatus::Waiting,
        ItemStatus::Someday,
        ItemStatus::Reference,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Inbox => "inbox",
            ItemStatus::Next => "next",
            ItemStatus::Waiting => "waiting",
            ItemStatus::Someday => "someday",
            ItemStatus::Reference => "reference",
        }
    }

    /// Heading used by the details step.
    pub fn label(self) -> &'static str {
        match self {
            ItemStatus::Inbox => "Inbox",
            ItemStatus::Next => "Next Action",
            ItemStatus::Waiting => "Waiting For",
            ItemStatus::Someday => "Someday/Maybe",
            ItemStatus::Reference => "Reference",
        }
    }

    /// Heading used by the grouped list view.
    pub fn list_label(self) -> &'static str {
        match self {
            ItemStatus::Next => "Next Actions",
            other => other.label(),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ItemStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbox" => Ok(ItemStatus::Inbox),
            "next" => Ok(ItemStatus::Next),
            "waiting" => Ok(ItemStatus::Waiting),
            "someday" => Ok(ItemStatus::Someday),
            "reference" => Ok(ItemStatus::Reference),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A captured thought. `text` is the original capture and never changes;
/// `title` and `description` are only filled in by triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub user_id: UserId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ItemStatus,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.text)
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }

    pub fn is_untriaged(&self) -> bool {
        self.is_active() && self.status == ItemStatus::Inbox
    }
}

/// Partial update for an item. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl ItemPatch {
    pub fn completed() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
    }

    pub fn apply_to(&self, item: &mut Item) {
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(title) = &self.title {
            item.title = Some(title.clone());
        }
        if let Some(description) = &self.description {
            item.description = Some(description.clone());
        }
        if let Some(completed) = self.completed {
            item.completed = completed;
        }
    }
}
