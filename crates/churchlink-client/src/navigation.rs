//! Header and footer endpoints.

use async_trait::async_trait;
use churchlink_core::result::AppResult;
use churchlink_entity::navigation::{FooterSection, HeaderItem};
use churchlink_entity::store::NavigationStore;
use reqwest::Method;
use tracing::info;

use crate::client::ApiClient;

#[async_trait]
impl NavigationStore for ApiClient {
    async fn header_items(&self) -> AppResult<Vec<HeaderItem>> {
        let url = self.endpoint(&["header", "items"])?;
        self.send_json(self.request(Method::GET, url)?, "Load header")
            .await
    }

    async fn save_header_items(&self, items: &[HeaderItem]) -> AppResult<()> {
        let url = self.endpoint(&["header", "items"])?;
        let request = self.request(Method::PUT, url)?.json(items);
        self.send_empty(request, "Save header").await?;
        info!(count = items.len(), "Saved header items");
        Ok(())
    }

    async fn footer_sections(&self) -> AppResult<Vec<FooterSection>> {
        let url = self.endpoint(&["footer", "items"])?;
        self.send_json(self.request(Method::GET, url)?, "Load footer")
            .await
    }

    async fn save_footer_section(&self, section: &FooterSection) -> AppResult<()> {
        let url = self.endpoint(&["footer", "items", "edit", section.title.as_str()])?;
        let context = format!("Save footer section '{}'", section.title);
        let request = self.request(Method::PUT, url)?.json(section);
        self.send_empty(request, &context).await?;
        info!(title = %section.title, "Saved footer section");
        Ok(())
    }
}
