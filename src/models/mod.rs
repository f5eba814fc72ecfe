pub mod graphql;
pub mod slack;
pub mod team;
pub mod user;

// Re-export commonly used types
pub use graphql::{Connection, GraphQLError, GraphQLResponse, PageInfo};
pub use slack::{Block, Message, SlackUser};
pub use team::Team;
pub use user::{Member, Role, User};
