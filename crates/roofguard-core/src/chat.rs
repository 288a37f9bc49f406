//! Chat transcript types shared by the dispatch and sales conversations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roofers::{GeoPoint, Roofer};

/// Opening message of the emergency dispatch chat.
pub const DISPATCH_GREETING: &str = "GTA Roof Guard unit active. Active leak? Tree on the roof? \
I'm here to dispatch vetted 24/7 roofing crews instantly. What is your location (Postal Code) \
and the severity of the damage?";

/// Opening message of the partner sales chat.
pub const SALES_GREETING: &str = "### Welcome to the Inner Circle\n\nI'm Marcus, your **Senior \
Growth Consultant**. You're here because you run one of the best crews in the GTA and you're \
ready for high-margin, **pre-triaged emergency volume**.\n\nAsk me about our dispatch protocol, \
your specific territory ROI, or how we verify jobs before they hit your desk.";

/// Shown in place of a sales reply when the provider call fails.
pub const SALES_FALLBACK: &str = "Our neural sales network is currently under maintenance. \
Please proceed to the vetting form below.";

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
        }
    }
}

/// A single transcript entry. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    id: String,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    roofers: Option<Vec<Roofer>>,
    #[serde(default)]
    is_safety_alert: bool,
}

impl ChatMessage {
    /// Creates a message stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            roofers: None,
            is_safety_alert: false,
        }
    }

    #[must_use]
    pub fn with_roofers(mut self, roofers: Vec<Roofer>) -> Self {
        self.roofers = Some(roofers);
        self
    }

    #[must_use]
    pub fn as_safety_alert(mut self) -> Self {
        self.is_safety_alert = true;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Roofers attached to this message, in relevance order.
    #[must_use]
    pub fn roofers(&self) -> &[Roofer] {
        self.roofers.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn is_safety_alert(&self) -> bool {
        self.is_safety_alert
    }
}

/// Append-only transcript that assigns monotonic message ids.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Conversation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a conversation with an assistant greeting as message `"1"`.
    #[must_use]
    pub fn with_greeting(greeting: &str) -> Self {
        let mut conversation = Self::new();
        conversation.push_assistant(greeting, Vec::new());
        conversation
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        let message = ChatMessage::new(self.allocate_id(), Role::User, content);
        self.append(message)
    }

    /// Appends an assistant reply. An empty roofer list is stored as absent.
    pub fn push_assistant(
        &mut self,
        content: impl Into<String>,
        roofers: Vec<Roofer>,
    ) -> &ChatMessage {
        let mut message = ChatMessage::new(self.allocate_id(), Role::Assistant, content);
        if !roofers.is_empty() {
            message = message.with_roofers(roofers);
        }
        self.append(message)
    }

    pub fn push_system(&mut self, content: impl Into<String>, safety_alert: bool) -> &ChatMessage {
        let mut message = ChatMessage::new(self.allocate_id(), Role::System, content);
        if safety_alert {
            message = message.as_safety_alert();
        }
        self.append(message)
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn append(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}

/// What is known about the user's whereabouts. Geolocation may be denied,
/// so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl LocationState {
    /// Returns the coordinates only when both latitude and longitude are known.
    #[must_use]
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        }
    }
}
