use serde::{Deserialize, Serialize};

use super::Member;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub slug: String,
    #[serde(default)]
    pub slack_channel: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Team {
    pub fn new(slug: &str, slack_channel: Option<&str>) -> Self {
        Self {
            slug: slug.to_string(),
            slack_channel: slack_channel.map(str::to_string),
            members: Vec::new(),
        }
    }

    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.merge_members(members);
        self
    }

    pub fn owners(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_owner())
    }

    pub fn owner_count(&self) -> usize {
        self.owners().count()
    }

    /// The channel to fall back to when no owner can be messaged directly.
    pub fn fallback_channel(&self) -> Option<&str> {
        self.slack_channel
            .as_deref()
            .map(str::trim)
            .filter(|channel| !channel.is_empty())
    }

    /// Adds members that are not already present, matching on email.
    /// Members without an email are matched on name instead.
    /// Returns how many were added.
    pub fn merge_members<I>(&mut self, members: I) -> usize
    where
        I: IntoIterator<Item = Member>,
    {
        let mut added = 0;
        for member in members {
            let exists = self.members.iter().any(|m| m.same_user(&member));
            if !exists {
                self.members.push(member);
                added += 1;
            }
        }
        added
    }
}
