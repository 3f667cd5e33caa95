use folio_content::ContentClient;
use folio_core::Locale;
use serde::Serialize;

/// Route parameters of one pre-rendered blog post page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StaticParam {
    pub locale: Locale,
    pub id: String,
}

/// Every locale paired with every post id
pub fn params_for(ids: &[i64]) -> Vec<StaticParam> {
    Locale::ALL
        .into_iter()
        .flat_map(|locale| {
            ids.iter().map(move |id| StaticParam {
                locale,
                id: id.to_string(),
            })
        })
        .collect()
}

/// Blog post pages to pre-render; empty when the CMS is unavailable
pub async fn generate_static_params(client: &ContentClient) -> Vec<StaticParam> {
    let ids = client.get_all_post_ids().await;
    params_for(&ids)
}
