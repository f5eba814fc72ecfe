pub mod graphql;
pub mod pagination;
pub mod slack_client;
pub mod teams_client;

pub use graphql::{GraphQLClient, QueryBuilder};
pub use pagination::{PageState, Pagination};
pub use slack_client::SlackClient;
pub use teams_client::TeamDirectoryClient;
