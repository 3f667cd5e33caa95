//! Query catalog
//!
//! The three operations the site needs. The list query leaves out `content`
//! and `tags` to keep the payload small; the single-post query fetches both.

/// Most ids [`ALL_POST_IDS_QUERY`] returns; later posts are not enumerated
pub const MAX_POST_IDS: usize = 100;

/// Page of posts, newest first. Variables: `$first: Int`, `$after: String`
pub const POSTS_QUERY: &str = r#"
  query GetPosts($first: Int, $after: String) {
    posts(first: $first, after: $after, where: { orderby: { field: DATE, order: DESC } }) {
      nodes {
        id
        databaseId
        title
        excerpt
        slug
        uri
        date
        modified
        featuredImage {
          node {
            id
            sourceUrl
            altText
            mediaDetails {
              width
              height
            }
          }
        }
        author {
          node {
            id
            name
            slug
            avatar {
              url
            }
          }
        }
        categories {
          nodes {
            id
            name
            slug
          }
        }
        seo {
          title
          metaDesc
          opengraphTitle
          opengraphDescription
          opengraphImage {
            sourceUrl
          }
        }
      }
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
    }
  }
"#;

/// One post with its body. Variables: `$id: ID!`, `$idType: PostIdType!`
pub const POST_QUERY: &str = r#"
  query GetPost($id: ID!, $idType: PostIdType!) {
    post(id: $id, idType: $idType) {
      id
      databaseId
      title
      excerpt
      content
      slug
      uri
      date
      modified
      featuredImage {
        node {
          id
          sourceUrl
          altText
          mediaDetails {
            width
            height
          }
        }
      }
      author {
        node {
          id
          name
          slug
          avatar {
            url
          }
        }
      }
      categories {
        nodes {
          id
          name
          slug
        }
      }
      tags {
        nodes {
          id
          name
          slug
        }
      }
      seo {
        title
        metaDesc
        opengraphTitle
        opengraphDescription
        opengraphImage {
          sourceUrl
        }
      }
    }
  }
"#;

/// Database ids of the newest posts, for static params and the sitemap
pub const ALL_POST_IDS_QUERY: &str = r#"
  query GetAllPostIds {
    posts(first: 100, where: { orderby: { field: DATE, order: DESC } }) {
      nodes {
        databaseId
      }
    }
  }
"#;

/// Named entry of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Posts,
    Post,
    AllPostIds,
}

impl Query {
    pub const ALL: [Query; 3] = [Query::Posts, Query::Post, Query::AllPostIds];

    pub fn text(self) -> &'static str {
        match self {
            Query::Posts => POSTS_QUERY,
            Query::Post => POST_QUERY,
            Query::AllPostIds => ALL_POST_IDS_QUERY,
        }
    }

    /// GraphQL operation name declared in [`Query::text`]
    pub fn operation_name(self) -> &'static str {
        match self {
            Query::Posts => "GetPosts",
            Query::Post => "GetPost",
            Query::AllPostIds => "GetAllPostIds",
        }
    }
}
