use async_trait::async_trait;
use core_staging_cms::core::{GraphqlTransport, TransportResponse};
use core_staging_cms::hydrate::page::{Element, Page};
use core_staging_cms::hydrate::sections::selectors::*;
use core_staging_cms::hydrate::widgets::WidgetRegistry;
use core_staging_cms::hydrate::HydrationOutcome;
use core_staging_cms::{CmsError, HttpTransport, Hydrator, HydratorConfig, Result};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

enum Reply {
    Body(serde_json::Value),
    Unreachable,
}

struct FixedTransport(Reply);

#[async_trait]
impl GraphqlTransport for FixedTransport {
    async fn post(&self, _query: &str) -> Result<TransportResponse> {
        match &self.0 {
            Reply::Body(body) => Ok(TransportResponse {
                status: 200,
                body: body.to_string(),
            }),
            Reply::Unreachable => Err(CmsError::UnexpectedResponse {
                message: "connection refused".to_string(),
            }),
        }
    }
}

/// 記錄呼叫次數的傳輸層
#[derive(Clone, Default)]
struct CountingTransport {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl GraphqlTransport for CountingTransport {
    async fn post(&self, _query: &str) -> Result<TransportResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TransportResponse {
            status: 200,
            body: json!({ "data": { "faqs": [{ "question": "Q1", "answer": "A1" }] } })
                .to_string(),
        })
    }
}

/// 靜態頁面：每個區塊都帶有預設內容
fn static_page() -> Page {
    let static_faq = |q: &str| {
        Element::with_class("details", "faq-item")
            .child(Element::new("summary").child(Element::with_class("span", "faq-question").text(q)))
    };
    Page::new()
        .with(HERO_HEADING, Element::new("h1").text("Static heading"))
        .with(HERO_SUBTITLE, Element::new("p").text("Static subtitle"))
        .with(
            FAQ_LIST,
            Element::with_class("div", "faq-list")
                .child(static_faq("Static Q1"))
                .child(static_faq("Static Q2"))
                .child(static_faq("Static Q3")),
        )
        .with(
            TESTIMONIALS_GRID,
            Element::with_class("div", "testimonials-grid").child(
                Element::with_class("div", "testimonial-card")
                    .child(Element::with_class("p", "testimonial-text").text("Static quote")),
            ),
        )
        .with(TESTIMONIAL_DOTS, Element::with_class("div", "testimonial-dots"))
        .with(
            HEADER_PHONE,
            Element::with_class("a", "header-phone")
                .attr("href", "tel:+10000000000")
                .text("(000) 000-0000"),
        )
}

fn faq_questions(page: &Page) -> Vec<String> {
    let mut questions = Vec::new();
    page.first(FAQ_LIST)
        .unwrap()
        .find_all_class("faq-question", &mut questions);
    questions
        .into_iter()
        .filter_map(|q| q.get_text().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_faqs_replace_static_entries_and_behave_as_accordion() {
    let hydrator = Hydrator::new(FixedTransport(Reply::Body(json!({
        "data": {
            "faqs": [
                { "question": "Q1", "answer": "A1" },
                { "question": "Q2", "answer": "A2" }
            ]
        }
    }))));
    let mut page = static_page();
    let mut widgets = WidgetRegistry::attach(&page);

    let outcome = hydrator.hydrate(&mut page, &mut widgets).await;

    assert_eq!(
        outcome,
        HydrationOutcome::Hydrated {
            sections: vec!["faqs"]
        }
    );
    assert_eq!(faq_questions(&page), vec!["Q1", "Q2"]);

    let accordion = widgets.accordion.as_mut().unwrap();
    assert_eq!(accordion.len(), 2);
    assert!(accordion.open_entries().is_empty());

    accordion.toggle(0);
    accordion.toggle(1);
    assert_eq!(accordion.open_entries(), vec![1]);
    accordion.apply(&mut page);

    let items = page.first(FAQ_LIST).unwrap().child_elements();
    assert!(items[0].get_attr("open").is_none());
    assert!(items[1].get_attr("open").is_some());
}

#[tokio::test]
async fn test_missing_collection_keeps_static_region() {
    let hydrator = Hydrator::new(FixedTransport(Reply::Body(json!({
        "data": {
            "heroSections": [{ "heading": "Live heading", "subtitle": null }],
            "contactInfos": [{ "phone": "14165551234" }]
        }
    }))));
    let mut page = static_page();
    let before = page.first(TESTIMONIALS_GRID).cloned();
    let mut widgets = WidgetRegistry::default();

    let outcome = hydrator.hydrate(&mut page, &mut widgets).await;

    assert!(outcome.is_hydrated());
    assert_eq!(page.first(HERO_HEADING).unwrap().get_text(), Some("Live heading"));
    assert_eq!(page.first(HERO_SUBTITLE).unwrap().get_text(), Some("Static subtitle"));
    assert_eq!(page.first(TESTIMONIALS_GRID).cloned(), before);
    assert_eq!(faq_questions(&page), vec!["Static Q1", "Static Q2", "Static Q3"]);

    let phone = page.first(HEADER_PHONE).unwrap();
    assert_eq!(phone.get_text(), Some("(416) 555-1234"));
    assert_eq!(phone.get_attr("href"), Some("tel:+14165551234"));
}

#[tokio::test]
async fn test_unreachable_cms_leaves_page_untouched() {
    let hydrator = Hydrator::new(FixedTransport(Reply::Unreachable));
    let mut page = static_page();
    let before = page.clone();
    let mut widgets = WidgetRegistry::attach(&page);

    let outcome = hydrator.hydrate(&mut page, &mut widgets).await;

    assert!(matches!(outcome, HydrationOutcome::Fallback { .. }));
    assert_eq!(page, before);
    assert_eq!(widgets.accordion.unwrap().len(), 3);
}

#[tokio::test]
async fn test_graphql_errors_fall_back_to_static_content() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/content");
        then.status(200).json_body(json!({
            "data": { "faqs": [{ "question": "Q1", "answer": "A1" }] },
            "errors": [{ "message": "Not authorized" }]
        }));
    });

    let hydrator = Hydrator::new(HttpTransport::new(server.url("/content")));
    let mut page = static_page();
    let before = page.clone();
    let mut widgets = WidgetRegistry::default();

    let outcome = hydrator.hydrate(&mut page, &mut widgets).await;

    mock.assert_hits(1);
    match outcome {
        HydrationOutcome::Fallback { reason } => assert!(reason.contains("Not authorized")),
        other => panic!("expected fallback, got {:?}", other),
    }
    assert_eq!(page, before);
}

#[tokio::test]
async fn test_rate_limited_hydration_is_not_retried() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/content");
        then.status(429);
    });

    let hydrator = Hydrator::new(HttpTransport::new(server.url("/content")));
    let mut page = static_page();
    let outcome = hydrator.hydrate(&mut page, &mut WidgetRegistry::default()).await;

    mock.assert_hits(1);
    assert!(!outcome.is_hydrated());
}

#[tokio::test]
async fn test_rebinding_twice_is_idempotent() {
    let hydrator = Hydrator::new(FixedTransport(Reply::Body(json!({
        "data": {
            "testimonials": [
                { "quote": "One", "authorName": "A", "authorRole": "R", "stars": 5 },
                { "quote": "Two", "authorName": "B", "authorRole": "R", "stars": 4 }
            ]
        }
    }))));
    let mut page = static_page();
    let mut widgets = WidgetRegistry::default();

    hydrator.hydrate(&mut page, &mut widgets).await;
    let first = widgets.clone();
    widgets.rebind(&page);

    assert_eq!(widgets, first);
    let carousel = widgets.carousel.unwrap();
    assert_eq!(carousel.active(), 0);
    assert_eq!(
        page.first(TESTIMONIAL_DOTS).unwrap().child_elements().len(),
        2
    );
}

#[tokio::test]
async fn test_unconfigured_cms_skips_fetch_and_keeps_static_content() {
    let configs = [
        HydratorConfig::default(),
        HydratorConfig::new(""),
        HydratorConfig {
            enabled: false,
            ..HydratorConfig::new("https://cms.example/content")
        },
    ];

    for config in configs {
        let transport = CountingTransport::default();
        let calls = transport.calls.clone();
        let hydrator = Hydrator::with_config(transport, &config);
        let mut page = static_page();
        let before = page.clone();
        let mut widgets = WidgetRegistry::attach(&page);

        let outcome = hydrator.hydrate(&mut page, &mut widgets).await;

        assert_eq!(
            outcome,
            HydrationOutcome::Fallback {
                reason: "CMS not configured".to_string()
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(page, before);
    }
}

#[tokio::test]
async fn test_configured_cms_fetches_once() {
    let transport = CountingTransport::default();
    let calls = transport.calls.clone();
    let hydrator = Hydrator::with_config(transport, &HydratorConfig::new("https://cms.example/content"));
    let mut page = static_page();

    let outcome = hydrator.hydrate(&mut page, &mut WidgetRegistry::default()).await;

    assert!(outcome.is_hydrated());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_testimonials_do_not_block_other_sections() {
    let hydrator = Hydrator::new(FixedTransport(Reply::Body(json!({
        "data": {
            "testimonials": [{ "quote": "Bad", "authorName": "A", "stars": -1 }],
            "faqs": [{ "question": "Q1", "answer": "A1" }]
        }
    }))));
    let mut page = static_page();
    let before = page.first(TESTIMONIALS_GRID).cloned();
    let mut widgets = WidgetRegistry::default();

    let outcome = hydrator.hydrate(&mut page, &mut widgets).await;

    assert_eq!(
        outcome,
        HydrationOutcome::Hydrated {
            sections: vec!["faqs"]
        }
    );
    assert_eq!(faq_questions(&page), vec!["Q1"]);
    assert_eq!(page.first(TESTIMONIALS_GRID).cloned(), before);
}
