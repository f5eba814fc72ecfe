use serde::Deserialize;

use super::Member;

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

// Connection type used by GraphQL pagination
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            page_info: PageInfo::default(),
            nodes: Vec::new(),
        }
    }
}

// Team data structures
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamNode {
    pub slug: String,
    #[serde(default)]
    pub slack_channel: Option<String>,
    #[serde(default)]
    pub members: Connection<Member>,
}

#[derive(Debug, Deserialize)]
pub struct TeamsData {
    #[serde(default)]
    pub teams: Connection<TeamNode>,
}

#[derive(Debug, Deserialize)]
pub struct TeamMembersNode {
    pub slug: String,
    #[serde(default)]
    pub members: Connection<Member>,
}

#[derive(Debug, Deserialize)]
pub struct TeamMembersData {
    pub team: Option<TeamMembersNode>,
}
