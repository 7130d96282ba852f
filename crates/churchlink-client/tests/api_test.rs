//! Integration tests for the REST client against a fake backend.

mod helpers;

use churchlink_core::error::ErrorKind;
use churchlink_core::traits::Translator;
use churchlink_core::types::{ListRequest, LocaleCode};
use churchlink_entity::navigation::{FooterSection, HeaderItem, TitledGroup};
use churchlink_entity::page::{EditState, NodeId, PageVersion};
use churchlink_entity::store::{NavigationStore, PageStore};
use serde_json::json;

fn locale(raw: &str) -> LocaleCode {
    raw.parse().unwrap()
}

#[tokio::test]
async fn test_fetch_staging_page() {
    let app = helpers::TestApp::new().await;
    app.seed_staging("home", helpers::sample_page("home", 3));

    let page = app
        .client
        .fetch_page("home", EditState::Staging)
        .await
        .unwrap();

    assert_eq!(page.version, PageVersion::V2);
    assert_eq!(page.revision, 3);
    let button = page.find(&NodeId::new("n2").unwrap()).unwrap();
    assert_eq!(button.i18n.get(&locale("es"), "label"), Some("Únete"));

    let auth = app.state.lock().unwrap().authorization.clone();
    assert_eq!(auth, vec!["Bearer test-token".to_string()]);
}

#[tokio::test]
async fn test_missing_token_maps_to_authentication() {
    let app = helpers::TestApp::with_token(None).await;
    app.seed_staging("home", helpers::sample_page("home", 0));

    let err = app
        .client
        .fetch_page("home", EditState::Staging)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_unknown_page_maps_to_not_found() {
    let app = helpers::TestApp::new().await;
    let err = app
        .client
        .fetch_page("ghost", EditState::Live)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(err.message.contains("Page not found"), "{}", err.message);
}

#[tokio::test]
async fn test_malformed_page_is_rejected() {
    let app = helpers::TestApp::new().await;
    app.seed_staging(
        "broken",
        json!({"title": "Broken", "slug": "broken", "version": 2, "sections": [
            {"id": "s", "children": [{"id": "n", "type": "text", "props": {"html": 42}}]}
        ]}),
    );

    let err = app
        .client
        .fetch_page("broken", EditState::Preview)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Serialization);
}

#[tokio::test]
async fn test_save_sends_revision_and_detects_conflict() {
    let app = helpers::TestApp::new().await;
    app.seed_staging("home", helpers::sample_page("home", 3));

    let mut page = app
        .client
        .fetch_page("home", EditState::Staging)
        .await
        .unwrap();
    page.title = "Welcome Home".into();

    let receipt = app.client.save_staging(&page, 3).await.unwrap();
    assert_eq!(receipt.revision, 4);
    assert!(receipt.updated_at.is_some());

    // a second save based on the old revision loses
    let err = app.client.save_staging(&page, 3).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let state = app.state.lock().unwrap();
    assert_eq!(state.if_match, vec!["3".to_string(), "3".to_string()]);
    assert_eq!(state.staging["home"]["title"], "Welcome Home");
}

#[tokio::test]
async fn test_publish_then_fetch_live() {
    let app = helpers::TestApp::new().await;
    app.seed_staging("about", helpers::sample_page("about", 1));

    app.client.publish("about").await.unwrap();
    let live = app.client.fetch_page("about", EditState::Live).await.unwrap();
    assert_eq!(live.slug, "about");

    let err = app.client.publish("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_pages_sends_query() {
    let app = helpers::TestApp::new().await;
    app.seed_staging("home", helpers::sample_page("home", 0));
    app.seed_staging("about", helpers::sample_page("about", 0));

    let listing = app
        .client
        .list_pages(Some("ab"), &ListRequest::new(2, 10))
        .await
        .unwrap();
    assert_eq!(listing.total_items, 1);
    assert_eq!(listing.items[0].slug, "about");

    let state = app.state.lock().unwrap();
    let query = &state.list_queries[0];
    assert_eq!(query.get("search").map(String::as_str), Some("ab"));
    assert_eq!(query.get("page").map(String::as_str), Some("2"));
    assert_eq!(query.get("page_size").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn test_header_round_trip() {
    let app = helpers::TestApp::new().await;
    app.seed_header(json!([
        {"title": "Home", "url": "/"},
        {"title": "About", "titles": {"es": "Acerca"}, "items": [{"title": "Staff", "url": "/staff"}]}
    ]));

    let mut items = app.client.header_items().await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].display_title(&locale("es")), "Acerca");

    items.push(HeaderItem::link("Give", "/give"));
    app.client.save_header_items(&items).await.unwrap();
    assert_eq!(app.state.lock().unwrap().header.len(), 3);
}

#[tokio::test]
async fn test_footer_save_encodes_title() {
    let app = helpers::TestApp::new().await;
    app.seed_footer(json!([{"title": "Contact & Visit", "items": [{"title": "Email"}]}]));

    let mut sections = app.client.footer_sections().await.unwrap();
    sections[0].visible = false;
    app.client.save_footer_section(&sections[0]).await.unwrap();
    assert_eq!(app.state.lock().unwrap().footer[0]["visible"], false);

    let err = app
        .client
        .save_footer_section(&FooterSection::new("Nope", Vec::new()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_translate_multi_batches() {
    let app = helpers::TestApp::new().await;
    let items = vec!["Welcome".to_string(), "Join us".to_string()];

    let table = app
        .client
        .translate_multi(&items, &[locale("es"), locale("pt-BR")], &locale("en"))
        .await
        .unwrap();

    assert_eq!(table["Welcome"]["es"], "[es] Welcome");
    assert_eq!(table["Join us"]["pt-BR"], "[pt-BR] Join us");

    let requests = app.state.lock().unwrap().translate_requests.clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["src"], "en");
    assert_eq!(requests[0]["dest_languages"], json!(["es", "pt-BR"]));
}

#[tokio::test]
async fn test_unreachable_backend_is_external_service() {
    let client = churchlink_client::ApiClient::new(&churchlink_core::config::api::ApiConfig {
        base_url: "http://127.0.0.1:9".into(),
        token: None,
        timeout_seconds: 2,
    })
    .unwrap();
    let err = client.header_items().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExternalService);
}
