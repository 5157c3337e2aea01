use serde::{Deserialize, Serialize};

use super::event::Event;

/// A tracked vulnerability within one package's document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Advisory {
    /// CVE, GHSA, or internal identifier
    pub id: String,

    /// Alternate identifiers for the same vulnerability
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Events in authoring order (not necessarily timestamp order)
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Advisory {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            aliases: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_alias() {
        let adv = Advisory::new("CVE-2024-0001").with_aliases(["GHSA-2cfg-hjmp-qrvw"]);
        assert!(adv.has_alias("GHSA-2cfg-hjmp-qrvw"));
        assert!(!adv.has_alias("GHSA-xxxx-xxxx-xxxx"));
    }
}
