use std::io::Write;

use axum::http::StatusCode;
use axum_test::TestServer;
use lettre::transport::stub::AsyncStubTransport;
use tempfile::NamedTempFile;

use porchlight::api::{create_router, AppState};
use porchlight::content::{ContentSource, LoadPolicy, ResolveStrategy};
use porchlight::models::*;
use porchlight::notify::Mailer;

const THREE_ENTRIES: &str = r#"{
    "projects": [
        {"title": "Mars Rover", "role": "Lead", "dates": "2023"},
        {"title": "Rock & Roll"},
        {"title": "rock and roll ", "description": "the imposter"}
    ],
    "classes": [
        {"code": "CS 3443", "title": "Application Programming"}
    ],
    "links": [
        {"label": "GitHub", "url": "https://github.com/example"}
    ]
}"#;

fn content_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp content file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

fn stub_mailer(transport: AsyncStubTransport) -> Mailer {
    Mailer::stub(transport, "site@example.com", "owner@example.com").expect("stub mailer")
}

fn setup_with(source: ContentSource, resolver: ResolveStrategy, mailer: Option<Mailer>) -> TestServer {
    let app = create_router(AppState {
        source,
        resolver,
        mailer,
    });
    TestServer::new(app).expect("Failed to create test server")
}

fn setup(file: &NamedTempFile) -> TestServer {
    setup_with(
        ContentSource::on_demand(file.path(), LoadPolicy::Strict),
        ResolveStrategy::TitleSlug,
        Some(stub_mailer(AsyncStubTransport::new_ok())),
    )
}

mod portfolio {
    use super::*;

    #[tokio::test]
    async fn listing_carries_derived_slugs() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let response = server.get("/portfolio").await;
        response.assert_status_ok();

        let page: PortfolioPage = response.json();
        assert_eq!(page.entries.len(), 3);
        assert_eq!(page.entries[0].slug, "mars-rover");
        assert_eq!(page.entries[0].title, "Mars Rover");
        assert_eq!(page.entries[1].slug, "rock-and-roll");
    }

    #[tokio::test]
    async fn projects_is_an_alias_for_portfolio() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let portfolio: PortfolioPage = server.get("/portfolio").await.json();
        let projects: PortfolioPage = server.get("/projects").await.json();
        assert_eq!(portfolio.entries.len(), projects.entries.len());
    }

    #[tokio::test]
    async fn detail_resolves_a_listed_slug() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let response = server.get("/portfolio/mars-rover").await;
        response.assert_status_ok();

        let detail: EntryDetail = response.json();
        assert_eq!(detail.slug, "mars-rover");
        assert_eq!(detail.entry.title, "Mars Rover");
        assert_eq!(detail.entry.role.as_deref(), Some("Lead"));
    }

    #[tokio::test]
    async fn every_listed_slug_round_trips_to_its_entry() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let page: PortfolioPage = server.get("/portfolio").await.json();
        for summary in &page.entries {
            let detail: EntryDetail = server
                .get(&format!("/portfolio/{}", summary.slug))
                .await
                .json();
            // Colliding slugs all resolve to the first entry in document
            // order, so compare slugs rather than titles.
            assert_eq!(
                porchlight::content::title_to_slug(&detail.entry.title),
                summary.slug
            );
        }
    }

    #[tokio::test]
    async fn colliding_titles_resolve_to_the_first_entry() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let detail: EntryDetail = server.get("/portfolio/rock-and-roll").await.json();
        assert_eq!(detail.entry.title, "Rock & Roll");
        assert!(detail.entry.description.is_none(), "imposter must not win");
    }

    #[tokio::test]
    async fn unknown_slug_is_a_404_payload() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let response = server.get("/portfolio/does-not-exist").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "entry_not_found");
        assert!(body["message"].as_str().unwrap().contains("black hole"));
    }

    #[tokio::test]
    async fn out_of_range_index_is_not_found_not_a_server_error() {
        let file = content_file(THREE_ENTRIES);
        let server = setup_with(
            ContentSource::on_demand(file.path(), LoadPolicy::Strict),
            ResolveStrategy::Index,
            None,
        );

        let response = server.get("/projects/999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "entry_not_found");
    }

    #[tokio::test]
    async fn index_strategy_lists_positions_and_resolves_them() {
        let file = content_file(THREE_ENTRIES);
        let server = setup_with(
            ContentSource::on_demand(file.path(), LoadPolicy::Strict),
            ResolveStrategy::Index,
            None,
        );

        let page: PortfolioPage = server.get("/portfolio").await.json();
        assert_eq!(page.entries[2].slug, "2");

        let detail: EntryDetail = server.get("/portfolio/2").await.json();
        assert_eq!(detail.entry.title, "rock and roll ");
    }
}

mod load_policies {
    use super::*;

    #[tokio::test]
    async fn strict_missing_file_is_a_500_source_missing() {
        let server = setup_with(
            ContentSource::on_demand("/nonexistent/content.json", LoadPolicy::Strict),
            ResolveStrategy::TitleSlug,
            None,
        );

        let response = server.get("/portfolio").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "source_missing");
        assert!(body["message"].as_str().unwrap().contains("glitch"));
    }

    #[tokio::test]
    async fn lenient_missing_file_serves_the_empty_default() {
        let server = setup_with(
            ContentSource::on_demand("/nonexistent/content.json", LoadPolicy::Lenient),
            ResolveStrategy::TitleSlug,
            None,
        );

        let response = server.get("/portfolio").await;
        response.assert_status_ok();
        let page: PortfolioPage = response.json();
        assert!(page.entries.is_empty());
    }

    #[tokio::test]
    async fn strict_malformed_file_is_a_500_source_malformed() {
        let file = content_file("{broken");
        let server = setup_with(
            ContentSource::on_demand(file.path(), LoadPolicy::Strict),
            ResolveStrategy::TitleSlug,
            None,
        );

        let response = server.get("/academics").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "source_malformed");
    }

    #[tokio::test]
    async fn cached_source_keeps_the_startup_snapshot() {
        let file = content_file(THREE_ENTRIES);
        let source = ContentSource::cached(file.path(), LoadPolicy::Strict)
            .expect("startup load succeeds");
        let server = setup_with(source, ResolveStrategy::TitleSlug, None);

        std::fs::write(file.path(), r#"{"projects": []}"#).expect("rewrite fixture");

        let page: PortfolioPage = server.get("/portfolio").await.json();
        assert_eq!(page.entries.len(), 3, "cached store must not see the edit");
    }

    #[tokio::test]
    async fn on_demand_source_sees_file_edits() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        std::fs::write(file.path(), r#"{"projects": [{"title": "Fresh"}]}"#)
            .expect("rewrite fixture");

        let page: PortfolioPage = server.get("/portfolio").await.json();
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].slug, "fresh");
    }
}

mod pages {
    use super::*;

    #[tokio::test]
    async fn academics_lists_classes() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let page: AcademicsPage = server.get("/academics").await.json();
        assert_eq!(page.classes.len(), 1);
        assert_eq!(page.classes[0].code.as_deref(), Some("CS 3443"));
    }

    #[tokio::test]
    async fn linktree_lists_links() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let page: LinktreePage = server.get("/linktree").await.json();
        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].label, "GitHub");
    }

    #[tokio::test]
    async fn home_and_health_respond() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let home: PageInfo = server.get("/").await.json();
        assert_eq!(home.title, "Home");

        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn shortlink_redirects_to_campaign() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let response = server.get("/c").await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/campaign");
    }

    #[tokio::test]
    async fn unmatched_path_is_a_404_payload() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let response = server.get("/no/such/page").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "entry_not_found");
    }
}

mod contact_form {
    use super::*;

    const FULL_FORM: &[(&str, &str)] = &[
        ("name", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("role", "Engineer"),
        ("phone", "555-0100"),
        ("message", "Count me in."),
    ];

    #[tokio::test]
    async fn get_renders_the_form_descriptor() {
        let file = content_file(THREE_ENTRIES);
        let server = setup(&file);

        let body: serde_json::Value = server.get("/campaign/join").await.json();
        assert_eq!(body["title"], "Join the Campaign");
    }

    #[tokio::test]
    async fn post_sends_exactly_one_email_with_fields_verbatim() {
        let file = content_file(THREE_ENTRIES);
        let transport = AsyncStubTransport::new_ok();
        let server = setup_with(
            ContentSource::on_demand(file.path(), LoadPolicy::Strict),
            ResolveStrategy::TitleSlug,
            Some(stub_mailer(transport.clone())),
        );

        let response = server.post("/campaign/join").form(&FULL_FORM).await;
        response.assert_status_ok();

        let receipt: CampaignReceipt = response.json();
        assert!(receipt.message.contains("Ada Lovelace"));

        let messages = transport.messages().await;
        assert_eq!(messages.len(), 1, "exactly one outbound e-mail");
        let body = &messages[0].1;
        for (_, value) in FULL_FORM {
            assert!(body.contains(value), "e-mail body missing '{value}'");
        }
    }

    #[tokio::test]
    async fn smtp_failure_is_delivery_failed_not_a_generic_500() {
        let file = content_file(THREE_ENTRIES);
        let server = setup_with(
            ContentSource::on_demand(file.path(), LoadPolicy::Strict),
            ResolveStrategy::TitleSlug,
            Some(stub_mailer(AsyncStubTransport::new_error())),
        );

        let response = server.post("/campaign/join").form(&FULL_FORM).await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "delivery_failed");
        assert!(body["message"].as_str().unwrap().contains("try again"));
    }

    #[tokio::test]
    async fn missing_required_field_sends_nothing() {
        let file = content_file(THREE_ENTRIES);
        let transport = AsyncStubTransport::new_ok();
        let server = setup_with(
            ContentSource::on_demand(file.path(), LoadPolicy::Strict),
            ResolveStrategy::TitleSlug,
            Some(stub_mailer(transport.clone())),
        );

        let response = server
            .post("/campaign/join")
            .form(&[("name", "Ada Lovelace"), ("message", "no email given")])
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "invalid_submission");
        assert!(transport.messages().await.is_empty());
    }

    #[tokio::test]
    async fn unconfigured_mailer_is_delivery_failed() {
        let file = content_file(THREE_ENTRIES);
        let server = setup_with(
            ContentSource::on_demand(file.path(), LoadPolicy::Strict),
            ResolveStrategy::TitleSlug,
            None,
        );

        let response = server.post("/campaign/join").form(&FULL_FORM).await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "delivery_failed");
    }
}
