use serde::{Deserialize, Deserializer};

/// A user row from the subscriber dataset.
///
/// Identity is the email. `created_at` is an opaque timestamp string that is
/// copied verbatim into path output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "Nick", default)]
    pub nick: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Created_at")]
    pub created_at: String,
    #[serde(rename = "Subscribers", default, deserialize_with = "null_as_empty")]
    pub subscribers: Vec<SubscriberRef>,
}

/// Reference to another user inside a `Subscribers` list.
///
/// The embedded timestamp is informational; path output always uses the
/// referenced user's own `Created_at`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriberRef {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Created_at", default)]
    pub created_at: String,
}

impl UserRecord {
    pub fn new(email: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            created_at: created_at.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper, mostly for tests and generated datasets.
    pub fn with_subscriber(mut self, email: impl Into<String>) -> Self {
        self.subscribers.push(SubscriberRef {
            email: email.into(),
            created_at: String::new(),
        });
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SubscriberRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SubscriberRef>>::deserialize(deserializer)?.unwrap_or_default())
}
