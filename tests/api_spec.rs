use axum::http::StatusCode;
use axum_test::TestServer;
use registry_docs::api::{create_router, AppState};
use registry_docs::manifest::{self, ManifestSource, ManifestStore};
use registry_docs::models::*;
use registry_docs::modules::*;

const MANIFEST: &str = r#"{
    "name": "r",
    "version": "1.0.0",
    "items": [
        {
            "name": "button",
            "type": "registry:ui",
            "description": "Displays a button.",
            "files": ["registry/ui/button/button.tsx"],
            "dependencies": ["@radix-ui/react-slot"]
        }
    ]
}"#;

fn button_index() -> ModuleIndex {
    let mut index = ModuleIndex::new();
    index
        .register("registry/ui/button/button.docs.md", || {
            Ok(ModuleExports::Primary(Renderable::markdown("## Usage\n\nPress it.")))
        })
        .register("registry/ui/button/button.preview.html", || {
            Ok(ModuleExports::Named(vec![
                (
                    "meta".to_string(),
                    ExportValue::Data(serde_json::json!({ "title": "Button" })),
                ),
                (
                    "Primary".to_string(),
                    ExportValue::Renderable(Renderable::html("<button>Press</button>")),
                ),
            ]))
        });
    index
}

fn server_with(store: ManifestStore, index: ModuleIndex) -> TestServer {
    let modules = ModuleResolver::new(index, CompanionSuffixes::default());
    let app = create_router(AppState::new(store, modules));
    TestServer::new(app).expect("Failed to create test server")
}

fn setup() -> TestServer {
    let manifest = manifest::parse(MANIFEST).expect("Failed to parse manifest");
    server_with(ManifestStore::new(manifest), button_index())
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let response = setup().get("/api/v1/health").await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "status": "ok" }));
    }
}

mod navigation {
    use super::*;

    #[tokio::test]
    async fn lists_only_the_ui_category() {
        let response = setup().get("/api/v1/navigation").await;

        response.assert_status_ok();
        let nav: Vec<NavigationEntry> = response.json();
        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].category, Category::Ui);
        assert_eq!(nav[0].route, "components");
    }

    #[tokio::test]
    async fn is_unavailable_without_manifest() {
        let server = server_with(ManifestStore::empty(), ModuleIndex::new());
        server
            .get("/api/v1/navigation")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}

mod items {
    use super::*;

    #[tokio::test]
    async fn returns_the_item() {
        let response = setup().get("/api/v1/items/ui/button").await;

        response.assert_status_ok();
        let item: Item = response.json();
        assert_eq!(item.name, "button");
        assert_eq!(item.primary_path(), Some("registry/ui/button/button.tsx"));
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        setup()
            .get("/api/v1/items/ui/missing-item")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn wrong_category_is_not_found() {
        setup()
            .get("/api/v1/items/hook/button")
            .await
            .assert_status_not_found();
        setup()
            .get("/api/v1/items/widgets/button")
            .await
            .assert_status_not_found();
    }
}

mod companions {
    use super::*;

    #[tokio::test]
    async fn docs_resolve_to_primary_export() {
        let response = setup().get("/api/v1/items/ui/button/docs").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "found");
        assert_eq!(body["export"], "default");
        assert_eq!(body["path"], "registry/ui/button/button.docs.md");
    }

    #[tokio::test]
    async fn preview_takes_first_renderable_export() {
        let response = setup().get("/api/v1/items/ui/button/preview").await;

        let body: serde_json::Value = response.json();
        assert_eq!(body["export"], "Primary");
        assert_eq!(body["content"], "<button>Press</button>");
    }

    #[tokio::test]
    async fn missing_companion_is_a_diagnostic_not_an_error() {
        let manifest = manifest::parse(MANIFEST).expect("Failed to parse manifest");
        let server = server_with(ManifestStore::new(manifest), ModuleIndex::new());

        let response = server.get("/api/v1/items/ui/button/docs").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "not_found");
        assert_eq!(body["attempted"], "registry/ui/button/button.docs.md");
    }

    #[tokio::test]
    async fn scanned_companions_are_read_from_disk() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("registry/ui/button");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("button.docs.md"), "# Button\n\nFrom disk.").unwrap();
        let index = ModuleIndex::scan(root.path(), "registry", &CompanionSuffixes::default())
            .unwrap();
        let manifest = manifest::parse(MANIFEST).expect("Failed to parse manifest");
        let server = server_with(ManifestStore::new(manifest), index);

        let docs: serde_json::Value = server.get("/api/v1/items/ui/button/docs").await.json();
        assert_eq!(docs["status"], "found");
        assert!(docs["content"].as_str().unwrap().contains("<p>From disk.</p>"));

        let html = server.get("/components/button").await.text();
        assert!(html.contains("<h1>Button</h1>"));
        assert!(!html.contains("<h2>Preview</h2>"));
    }

    #[tokio::test]
    async fn unknown_kind_is_not_found() {
        setup()
            .get("/api/v1/items/ui/button/source")
            .await
            .assert_status_not_found();
    }
}

mod modules {
    use super::*;

    #[tokio::test]
    async fn invalidate_drops_cached_entries() {
        let server = setup();
        server.get("/api/v1/items/ui/button/docs").await;
        server.get("/api/v1/items/ui/button/preview").await;

        let response = server.post("/api/v1/modules/button/invalidate").await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "identifier": "button", "invalidated": 2 }));

        let stats: serde_json::Value = server.get("/api/v1/modules").await.json();
        assert_eq!(stats["cached"], 0);
        assert_eq!(stats["indexed"], 2);
    }
}

mod manifest_reload {
    use super::*;

    #[tokio::test]
    async fn requires_a_configured_source() {
        setup()
            .post("/api/v1/manifest/reload")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn replaces_the_manifest_wholesale() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("registry.json");
        std::fs::write(
            &path,
            r#"{"name": "r", "version": "2.0.0", "items": [
                {"name": "use-toggle", "type": "registry:hook", "files": ["registry/hooks/use-toggle.ts"]}
            ]}"#,
        )
        .expect("write");

        let manifest = manifest::parse(MANIFEST).expect("Failed to parse manifest");
        let modules = ModuleResolver::new(ModuleIndex::new(), CompanionSuffixes::default());
        let state = AppState::new(ManifestStore::new(manifest), modules)
            .with_source(ManifestSource::File(path));
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        let response = server.post("/api/v1/manifest/reload").await;
        response.assert_status_ok();

        let manifest: Manifest = server.get("/api/v1/manifest").await.json();
        assert_eq!(manifest.version, "2.0.0");
        assert_eq!(manifest.items.len(), 1);
        server.get("/api/v1/items/ui/button").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn malformed_manifest_is_rejected_and_old_one_kept() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("registry.json");
        std::fs::write(&path, "{ not json").expect("write");

        let manifest = manifest::parse(MANIFEST).expect("Failed to parse manifest");
        let modules = ModuleResolver::new(ModuleIndex::new(), CompanionSuffixes::default());
        let state = AppState::new(ManifestStore::new(manifest), modules)
            .with_source(ManifestSource::File(path));
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        server
            .post("/api/v1/manifest/reload")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        server.get("/api/v1/items/ui/button").await.assert_status_ok();
    }

    #[tokio::test]
    async fn non_utf8_manifest_is_unprocessable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("registry.json");
        std::fs::write(&path, b"{\"name\":\"r\xff\",\"version\":\"1.0.0\",\"items\":[]}")
            .expect("write");

        let manifest = manifest::parse(MANIFEST).expect("Failed to parse manifest");
        let modules = ModuleResolver::new(ModuleIndex::new(), CompanionSuffixes::default());
        let state = AppState::new(ManifestStore::new(manifest), modules)
            .with_source(ManifestSource::File(path));
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        server
            .post("/api/v1/manifest/reload")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        server.get("/api/v1/items/ui/button").await.assert_status_ok();
    }
}

mod pages {
    use super::*;

    #[tokio::test]
    async fn overview_links_to_items() {
        let response = setup().get("/").await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("href=\"/components/button\""));
        assert!(!html.contains("href=\"/hooks\""));
    }

    #[tokio::test]
    async fn item_page_shows_preview_and_docs() {
        let response = setup().get("/components/button").await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Displays a button."));
        assert!(html.contains("<button>Press</button>"));
        assert!(html.contains("<h2>Usage</h2>"));
    }

    #[tokio::test]
    async fn item_page_degrades_to_metadata_without_companions() {
        let manifest = manifest::parse(MANIFEST).expect("Failed to parse manifest");
        let server = server_with(ManifestStore::new(manifest), ModuleIndex::new());

        let response = server.get("/components/button").await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Displays a button."));
        assert!(html.contains("registry/ui/button/button.tsx"));
        assert!(!html.contains("<h2>Preview</h2>"));
        assert!(!html.contains("<h2>Documentation</h2>"));
    }

    #[tokio::test]
    async fn failed_companion_is_shown_as_error() {
        let manifest = manifest::parse(MANIFEST).expect("Failed to parse manifest");
        let mut index = ModuleIndex::new();
        index.register("registry/ui/button/button.docs.md", || {
            Err(LoadError::Other("syntax error on line 3".to_string()))
        });
        let server = server_with(ManifestStore::new(manifest), index);

        let html = server.get("/components/button").await.text();
        assert!(html.contains("syntax error on line 3"));
        assert!(html.contains("Displays a button."));
    }

    #[tokio::test]
    async fn unknown_item_renders_not_found_with_back_link() {
        let response = setup().get("/components/missing-item").await;

        response.assert_status_not_found();
        let html = response.text();
        assert!(html.contains("Component not found"));
        assert!(html.contains("Back to overview"));
        assert!(html.contains("href=\"/\""));
    }

    #[tokio::test]
    async fn unknown_category_renders_not_found() {
        setup().get("/widgets").await.assert_status_not_found();
        setup().get("/hooks").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn missing_manifest_renders_error_page() {
        let server = server_with(ManifestStore::empty(), ModuleIndex::new());

        let response = server.get("/").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.text().contains("Registry unavailable"));
    }
}
