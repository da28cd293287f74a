//! Name-based UUIDv5 generation

use crate::dispatch::Dispatcher;
use crate::error::Result;
use uuid::Uuid;

/// Predefined UUID namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UuidNamespace {
    /// Fully-qualified domain names
    Dns,
    /// URLs
    Url,
    /// ISO object identifiers
    Oid,
    /// X.500 distinguished names
    X500,
}

impl UuidNamespace {
    /// Every namespace
    pub const ALL: [Self; 4] = [Self::Dns, Self::Url, Self::Oid, Self::X500];

    fn uuid(&self) -> &'static Uuid {
        match self {
            Self::Dns => &Uuid::NAMESPACE_DNS,
            Self::Url => &Uuid::NAMESPACE_URL,
            Self::Oid => &Uuid::NAMESPACE_OID,
            Self::X500 => &Uuid::NAMESPACE_X500,
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dns => "DNS",
            Self::Url => "URL",
            Self::Oid => "OID",
            Self::X500 => "X.500",
        }
    }

    /// Hyphenated lowercase UUIDv5 of `name` in this namespace
    pub fn uuid5(&self, name: &[u8]) -> String {
        Uuid::new_v5(self.uuid(), name).hyphenated().to_string()
    }
}

/// UUIDv5 of every non-null row
pub fn uuid5_column<T>(
    dispatcher: &Dispatcher,
    namespace: UuidNamespace,
    input: &[Option<T>],
) -> Result<Vec<Option<String>>>
where
    T: AsRef<[u8]> + Sync,
{
    dispatcher.map(input, |value| namespace.uuid5(value.as_ref()))
}
