//! Conversation store
//!
//! Maps a canonical phone number to its append-only message history. The
//! full store is written through to [`KeyValueStore`] under [`MESSAGES_KEY`]
//! after every mutation and read back once at startup.

use crate::storage::{SharedStorage, StorageError};
use crate::types::Message;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const MESSAGES_KEY: &str = "messages";

#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    pub number: String,
    pub messages: Vec<Message>,
}

/// Conversations in the order their first message arrived.
///
/// Serializes as a JSON object of `number -> [message, ...]`, keeping key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conversations(Vec<Conversation>);

impl Conversations {
    pub fn get(&self, number: &str) -> Option<&Conversation> {
        self.0.iter().find(|c| c.number == number)
    }

    pub fn push(&mut self, number: &str, message: Message) {
        match self.0.iter_mut().find(|c| c.number == number) {
            Some(conversation) => conversation.messages.push(message),
            None => self.0.push(Conversation {
                number: number.to_string(),
                messages: vec![message],
            }),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.number.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conversation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Conversations {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for conversation in &self.0 {
            map.serialize_entry(&conversation.number, &conversation.messages)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Conversations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConversationsVisitor;

        impl<'de> Visitor<'de> for ConversationsVisitor {
            type Value = Conversations;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of phone number to message list")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut conversations = Conversations::default();
                while let Some((number, messages)) =
                    access.next_entry::<String, Vec<Message>>()?
                {
                    for message in messages {
                        conversations.push(&number, message);
                    }
                }
                Ok(conversations)
            }
        }

        deserializer.deserialize_map(ConversationsVisitor)
    }
}

/// Single-owner store; handlers receive it by reference.
#[derive(Clone)]
pub struct ConversationStore {
    conversations: Conversations,
    storage: SharedStorage,
}

impl PartialEq for ConversationStore {
    fn eq(&self, other: &Self) -> bool {
        self.conversations == other.conversations
    }
}

impl fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationStore")
            .field("conversations", &self.conversations)
            .finish_non_exhaustive()
    }
}

impl ConversationStore {
    /// Read the persisted snapshot. Missing or unreadable data yields an empty store.
    pub fn load(storage: SharedStorage) -> Self {
        let conversations = match storage.get(MESSAGES_KEY) {
            Some(raw) => match serde_json::from_str::<Conversations>(&raw) {
                Ok(conversations) => conversations,
                Err(err) => {
                    tracing::warn!("discarding unreadable message snapshot: {}", err);
                    Conversations::default()
                }
            },
            None => Conversations::default(),
        };
        tracing::debug!("loaded {} conversations", conversations.len());
        Self {
            conversations,
            storage,
        }
    }

    /// Append to the conversation under `key`, creating it if absent, then persist.
    ///
    /// The in-memory store is updated even when the write fails.
    pub fn append(&mut self, key: &str, message: Message) -> Result<(), StorageError> {
        self.conversations.push(key, message);
        self.persist()
    }

    pub fn list_conversations(&self) -> Vec<String> {
        self.conversations.keys().map(str::to_string).collect()
    }

    pub fn get_thread(&self, key: &str) -> &[Message] {
        self.conversations
            .get(key)
            .map(|c| c.messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn conversations(&self) -> &Conversations {
        &self.conversations
    }

    /// Wipe every conversation, in memory and on disk.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.conversations = Conversations::default();
        self.storage.remove(MESSAGES_KEY)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn snapshot(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.conversations)?)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let snapshot = self.snapshot()?;
        self.storage.set(MESSAGES_KEY, &snapshot)
    }
}
