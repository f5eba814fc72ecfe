use std::time::Duration;

use serde_json::{json, Value};
use slack_teams_notification::client::{Pagination, TeamDirectoryClient};
use slack_teams_notification::{NotifyError, SlugFilter};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> TeamDirectoryClient {
    TeamDirectoryClient::new(
        &server.uri(),
        "nais-token",
        Duration::from_secs(5),
        tracing::Span::none(),
    )
    .unwrap()
}

fn member(name: &str, email: &str, role: &str) -> Value {
    json!({ "user": { "name": name, "email": email }, "role": role })
}

fn page_info(has_next_page: bool, end_cursor: Option<&str>) -> Value {
    json!({ "totalCount": null, "hasNextPage": has_next_page, "endCursor": end_cursor })
}

fn team(slug: &str, channel: &str, members: Vec<Value>, members_page: Value) -> Value {
    json!({
        "slug": slug,
        "slackChannel": channel,
        "members": { "pageInfo": members_page, "nodes": members }
    })
}

fn teams_response(teams: Vec<Value>, page: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": { "teams": { "pageInfo": page, "nodes": teams } }
    }))
}

async fn mount_single_page(server: &MockServer, teams: Vec<Value>) {
    Mock::given(method("POST"))
        .and(body_string_contains("getTeamsAndMembers"))
        .respond_with(teams_response(teams, page_info(false, None)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_teams_sorted_by_slug() {
    let server = MockServer::start().await;
    mount_single_page(
        &server,
        vec![
            team("zeta", "#zeta", vec![], page_info(false, None)),
            team("alpha", "#alpha", vec![], page_info(false, None)),
            team("mid", "#mid", vec![], page_info(false, None)),
        ],
    )
    .await;

    let teams = client(&server).fetch_teams(&SlugFilter::default()).await.unwrap();
    let slugs: Vec<&str> = teams.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["alpha", "mid", "zeta"]);
    assert_eq!(teams[0].slack_channel.as_deref(), Some("#alpha"));
}

#[tokio::test]
async fn test_fetch_teams_follows_member_and_team_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("getTeamsAndMembers"))
        .and(body_partial_json(json!({ "variables": { "after": "cursor-1" } })))
        .respond_with(teams_response(
            vec![team(
                "team-c",
                "#team-c",
                vec![member("Carol", "carol@example.com", "OWNER")],
                page_info(false, None),
            )],
            page_info(false, None),
        ))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("getTeamsAndMembers"))
        .respond_with(teams_response(
            vec![
                team(
                    "team-b",
                    "#team-b",
                    vec![
                        member("Bob", "bob@example.com", "OWNER"),
                        member("Dan", "dan@example.com", "MEMBER"),
                    ],
                    page_info(true, Some("members-1")),
                ),
                team(
                    "team-a",
                    "#team-a",
                    vec![member("Alice", "alice@example.com", "OWNER")],
                    page_info(false, None),
                ),
            ],
            page_info(true, Some("cursor-1")),
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("getTeamMembers"))
        .and(body_partial_json(json!({
            "variables": { "slug": "team-b", "membersAfter": "members-1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "team": {
                "slug": "team-b",
                "members": {
                    "pageInfo": page_info(false, None),
                    "nodes": [
                        member("Dan", "DAN@example.com", "MEMBER"),
                        member("Eve", "eve@example.com", "OWNER"),
                    ]
                }
            } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let teams = client(&server).fetch_teams(&SlugFilter::default()).await.unwrap();

    let slugs: Vec<&str> = teams.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["team-a", "team-b", "team-c"]);

    let team_b = &teams[1];
    let emails: Vec<&str> = team_b.members.iter().map(|m| m.user.email.as_str()).collect();
    assert_eq!(emails, vec!["bob@example.com", "dan@example.com", "eve@example.com"]);
    assert_eq!(team_b.owner_count(), 2);
}

#[tokio::test]
async fn test_fetch_teams_with_offset_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "offset": 2, "limit": 2 } })))
        .respond_with(teams_response(
            vec![team("three", "#three", vec![], page_info(false, None))],
            page_info(false, None),
        ))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "offset": 0, "limit": 2 } })))
        .respond_with(teams_response(
            vec![
                team("one", "#one", vec![], page_info(false, None)),
                team("two", "#two", vec![], page_info(false, None)),
            ],
            page_info(true, None),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let teams = client(&server)
        .with_pagination(Pagination::Offset)
        .with_page_size(2)
        .fetch_teams(&SlugFilter::default())
        .await
        .unwrap();

    let slugs: Vec<&str> = teams.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["one", "three", "two"]);
}

#[tokio::test]
async fn test_fetch_members_with_offset_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("getTeamsAndMembers"))
        .and(body_partial_json(json!({
            "variables": { "offset": 0, "limit": 2, "membersOffset": 0, "membersLimit": 2 }
        })))
        .respond_with(teams_response(
            vec![team(
                "team-a",
                "#team-a",
                vec![
                    member("Alice", "alice@example.com", "OWNER"),
                    member("Bob", "bob@example.com", "MEMBER"),
                ],
                page_info(true, None),
            )],
            page_info(false, None),
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("getTeamMembers"))
        .and(body_partial_json(json!({
            "variables": { "slug": "team-a", "membersOffset": 2, "membersLimit": 2 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "team": {
                "slug": "team-a",
                "members": {
                    "pageInfo": page_info(false, None),
                    "nodes": [member("Carol", "carol@example.com", "OWNER")]
                }
            } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let teams = client(&server)
        .with_pagination(Pagination::Offset)
        .with_page_size(2)
        .fetch_teams(&SlugFilter::default())
        .await
        .unwrap();

    assert_eq!(teams.len(), 1);
    let names: Vec<&str> = teams[0].members.iter().map(|m| m.user.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    assert_eq!(teams[0].owner_count(), 2);
}

#[tokio::test]
async fn test_fetch_teams_applies_slug_filter() {
    let server = MockServer::start().await;
    mount_single_page(
        &server,
        vec![
            team("team1", "#team1", vec![], page_info(false, None)),
            team("team2", "#team2", vec![], page_info(false, None)),
            team("team3", "#team3", vec![], page_info(false, None)),
        ],
    )
    .await;

    let filter = SlugFilter::parse("team1, team3, team5");
    let teams = client(&server).fetch_teams(&filter).await.unwrap();

    let slugs: Vec<&str> = teams.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["team1", "team3"]);
}

#[tokio::test]
async fn test_fetch_teams_sends_auth_and_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer nais-token"))
        .and(header("content-type", "application/json"))
        .respond_with(teams_response(vec![], page_info(false, None)))
        .expect(1)
        .mount(&server)
        .await;

    let teams = client(&server).fetch_teams(&SlugFilter::default()).await.unwrap();
    assert!(teams.is_empty());
}

#[tokio::test]
async fn test_fetch_teams_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_teams(&SlugFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NotifyError::UnexpectedStatus { status: 400, .. }));
    assert!(err.to_string().contains("400"));
    assert!(err.is_fetch_error());
}

#[tokio::test]
async fn test_fetch_teams_empty_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_teams(&SlugFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NotifyError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_teams_graphql_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "not authorized" }]
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_teams(&SlugFilter::default())
        .await
        .unwrap_err();
    match err {
        NotifyError::GraphQL(message) => assert!(message.contains("not authorized")),
        other => panic!("expected GraphQL error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_teams_missing_cursor_is_pagination_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(teams_response(
            vec![team("a", "#a", vec![], page_info(false, None))],
            page_info(true, None),
        ))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_teams(&SlugFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NotifyError::Pagination(_)));
}
