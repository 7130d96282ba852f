//! Batched translator endpoint.

use async_trait::async_trait;
use churchlink_core::result::AppResult;
use churchlink_core::traits::{TranslationTable, Translator};
use churchlink_core::types::LocaleCode;
use churchlink_entity::translation::{TranslateRequest, TranslateResponse};
use reqwest::Method;
use tracing::debug;

use crate::client::ApiClient;

#[async_trait]
impl Translator for ApiClient {
    async fn translate_multi(
        &self,
        items: &[String],
        dest_languages: &[LocaleCode],
        src: &LocaleCode,
    ) -> AppResult<TranslationTable> {
        let url = self.endpoint(&["translator", "translate-multi"])?;
        let body = TranslateRequest::new(items, dest_languages, src);
        debug!(
            items = items.len(),
            locales = dest_languages.len(),
            src = %src,
            "Requesting translations"
        );
        let request = self.request(Method::POST, url)?.json(&body);
        let response: TranslateResponse = self.send_json(request, "Translate").await?;
        Ok(response.translations)
    }
}
