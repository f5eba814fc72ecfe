use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::{json, Map};
use tracing::{debug, warn, Span};

use super::graphql::{GraphQLClient, QueryBuilder};
use super::pagination::{PageState, Pagination};
use crate::error::{NotifyError, NotifyResult};
use crate::filtering::SlugFilter;
use crate::graphql_fields::{selections, FieldSelection};
use crate::models::graphql::{TeamMembersData, TeamsData};
use crate::models::{Connection, Member, Team};

const MEMBERS_PREFIX: &str = "members";

/// Progress of the member list of one team.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MemberPaging {
    NotStarted,
    InProgress(PageState),
    Complete,
}

#[derive(Debug)]
struct TeamEntry {
    team: Team,
    members: MemberPaging,
}

impl TeamEntry {
    fn new(slug: &str, slack_channel: Option<&str>) -> Self {
        Self {
            team: Team::new(slug, slack_channel),
            members: MemberPaging::NotStarted,
        }
    }

    /// Merges one page of members read at `position` and moves the paging state on.
    fn record_members(&mut self, page: Connection<Member>, position: &PageState) -> NotifyResult<()> {
        let received = page.nodes.len();
        self.team.merge_members(page.nodes);
        self.members = match position.advance(&page.page_info, received)? {
            Some(next) => MemberPaging::InProgress(next),
            None => MemberPaging::Complete,
        };
        Ok(())
    }
}

/// Reads teams and their members from the Nais API.
pub struct TeamDirectoryClient {
    graphql: GraphQLClient,
    pagination: Pagination,
    page_size: usize,
    span: Span,
}

impl TeamDirectoryClient {
    pub fn new(endpoint: &str, api_token: &str, timeout: Duration, span: Span) -> NotifyResult<Self> {
        Ok(Self {
            graphql: GraphQLClient::new(endpoint, api_token, timeout)?,
            pagination: Pagination::default(),
            page_size: crate::constants::DEFAULT_PAGE_SIZE,
            span,
        })
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Fetches every team with all of its members, sorted by slug. When the
    /// filter is non-empty only the teams it names are returned; names the
    /// backend does not know are ignored. Any failure discards all pages read
    /// so far.
    pub async fn fetch_teams(&self, filter: &SlugFilter) -> NotifyResult<Vec<Team>> {
        let teams_query = self.teams_query();
        let mut entries: BTreeMap<String, TeamEntry> = BTreeMap::new();
        let mut teams_page = PageState::first(self.pagination);

        debug!(parent: &self.span, pagination = %self.pagination, "start fetching teams and members");
        loop {
            let mut variables = Map::new();
            teams_page.write_variables("", self.page_size, &mut variables);
            PageState::first(self.pagination).write_variables(MEMBERS_PREFIX, self.page_size, &mut variables);

            let data: TeamsData = self.graphql.query(&teams_query, variables).await?;
            let connection = data.teams;
            let received = connection.nodes.len();

            for node in connection.nodes {
                if node.slug.trim().is_empty() {
                    warn!(parent: &self.span, "skipping team without slug");
                    continue;
                }
                let entry = entries
                    .entry(node.slug.clone())
                    .or_insert_with(|| TeamEntry::new(&node.slug, node.slack_channel.as_deref()));
                if entry.team.slack_channel.is_none() {
                    entry.team.slack_channel = node.slack_channel;
                }
                entry.record_members(node.members, &PageState::first(self.pagination))?;
            }

            self.fetch_remaining_members(&mut entries).await?;

            debug!(
                parent: &self.span,
                total_count = ?connection.page_info.total_count,
                has_next_page = connection.page_info.has_next_page,
                teams = entries.len(),
                "fetched page of teams"
            );

            match teams_page.advance(&connection.page_info, received)? {
                Some(next) => teams_page = next,
                None => break,
            }
        }
        debug!(parent: &self.span, teams = entries.len(), "done fetching teams");

        let teams = entries.into_values().map(|entry| entry.team);
        if filter.is_empty() {
            debug!(parent: &self.span, "no filter specified, returning all teams");
            return Ok(teams.collect());
        }

        debug!(parent: &self.span, filter = %filter, "filtering teams");
        Ok(teams.filter(|team| filter.matches(&team.slug)).collect())
    }

    /// Pages through the members of every team whose member list is still in
    /// progress. Only the per-team member position moves; the teams position
    /// is left alone.
    async fn fetch_remaining_members(&self, entries: &mut BTreeMap<String, TeamEntry>) -> NotifyResult<()> {
        let members_query = self.team_members_query();

        for (slug, entry) in entries.iter_mut() {
            while let MemberPaging::InProgress(position) = entry.members.clone() {
                debug!(parent: &self.span, team_slug = %slug, "team has more members, fetching next page");

                let mut variables = Map::new();
                variables.insert("slug".to_string(), json!(slug));
                position.write_variables(MEMBERS_PREFIX, self.page_size, &mut variables);

                let data: TeamMembersData = self.graphql.query(&members_query, variables).await?;
                let node = data.team.ok_or_else(|| {
                    NotifyError::Decode(format!("team {:?} missing while paging its members", slug))
                })?;
                entry.record_members(node.members, &position)?;
            }
        }
        Ok(())
    }

    fn teams_query(&self) -> String {
        let (team_vars, team_args) = self.pagination.arguments("");
        let (member_vars, member_args) = self.pagination.arguments(MEMBERS_PREFIX);

        QueryBuilder::new("getTeamsAndMembers", "teams")
            .variables(team_vars)
            .variables(member_vars)
            .args(team_args)
            .selection(
                FieldSelection::new()
                    .nested("pageInfo", selections::page_info_fields())
                    .nested("nodes", selections::team_fields(&member_args)),
            )
            .build()
    }

    fn team_members_query(&self) -> String {
        let (member_vars, member_args) = self.pagination.arguments(MEMBERS_PREFIX);

        QueryBuilder::new("getTeamMembers", "team")
            .variable("$slug", "String!")
            .variables(member_vars)
            .arg("slug", "$slug")
            .selection(
                FieldSelection::new()
                    .field("slug")
                    .merge(selections::members_connection(&member_args)),
            )
            .build()
    }
}
