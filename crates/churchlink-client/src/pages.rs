//! Page endpoints.

use async_trait::async_trait;
use churchlink_core::result::AppResult;
use churchlink_core::types::{ListRequest, ListResponse};
use churchlink_entity::page::{EditState, Page, PageSummary, SaveReceipt};
use churchlink_entity::store::PageStore;
use reqwest::Method;
use reqwest::header::IF_MATCH;
use tracing::info;

use crate::client::ApiClient;

#[async_trait]
impl PageStore for ApiClient {
    async fn fetch_page(&self, slug: &str, state: EditState) -> AppResult<Page> {
        let url = self.endpoint(&["pages", state.path_segment(), slug])?;
        let context = format!("Load {state} page '{slug}'");
        self.send_json(self.request(Method::GET, url)?, &context).await
    }

    async fn save_staging(&self, page: &Page, expected_revision: u64) -> AppResult<SaveReceipt> {
        let url = self.endpoint(&["pages", "staging", page.slug.as_str()])?;
        let context = format!("Save page '{}'", page.slug);
        let request = self
            .request(Method::PUT, url)?
            .header(IF_MATCH, expected_revision.to_string())
            .json(page);
        let receipt: SaveReceipt = self.send_json(request, &context).await?;
        info!(slug = %page.slug, revision = receipt.revision, "Saved staging page");
        Ok(receipt)
    }

    async fn publish(&self, slug: &str) -> AppResult<()> {
        let url = self.endpoint(&["pages", "publish", slug])?;
        let context = format!("Publish page '{slug}'");
        self.send_empty(self.request(Method::POST, url)?, &context)
            .await?;
        info!(slug, "Published page");
        Ok(())
    }

    async fn list_pages(
        &self,
        search: Option<&str>,
        request: &ListRequest,
    ) -> AppResult<ListResponse<PageSummary>> {
        let mut url = self.endpoint(&["pages", ""])?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
                query.append_pair("search", search);
            }
            query
                .append_pair("page", &request.page.to_string())
                .append_pair("page_size", &request.page_size.to_string());
        }
        self.send_json(self.request(Method::GET, url)?, "List pages")
            .await
    }
}
