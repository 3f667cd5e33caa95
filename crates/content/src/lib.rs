// Content fetching from the headless CMS over GraphQL

pub mod error;
pub mod fixture;
pub mod graphql;
pub mod images;
pub mod posts;
pub mod queries;

pub use error::ContentError;
pub use fixture::{Fault, FixtureTransport};
pub use graphql::{Envelope, GraphQlError, GraphQlRequest, HttpTransport, Transport, fetch_graphql};
pub use posts::{ContentClient, IdType, PostsPage};
