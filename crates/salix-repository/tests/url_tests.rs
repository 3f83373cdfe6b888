use pretty_assertions::assert_eq;
use salix_core::{Attributes, SalixService, Url};
use salix_repository::{FsSalixService, FsSettings};
use salix_test_utils::TestStore;
use serde_json::json;

fn service(store: &TestStore) -> FsSalixService {
    FsSalixService::new(FsSettings::with_root(store.root()))
}

fn page(scope: &str, url: &str, view: &str) -> Url {
    let mut map = Attributes::new();
    map.insert("title".into(), json!(format!("Page {url}")));
    Url::new(scope, url, 200, Some(view.to_string()), map)
}

#[test]
fn save_then_get_round_trips() {
    let store = TestStore::new();
    let service = service(&store);
    let url = page("site", "about", "page");

    service.save_url(url.clone()).unwrap();

    assert_eq!(service.url("about", "site"), Some(url));
    store.assert_file_exists("site/urls/about.yml");
}

#[test]
fn empty_url_is_stored_as_index() {
    let store = TestStore::new();
    let service = service(&store);
    let home = page("s", "", "home");

    service.save_url(home.clone()).unwrap();

    store.assert_file_exists("s/urls/index.yml");
    assert_eq!(service.url("", "s"), Some(home.clone()));
    assert_eq!(service.url("/", "s"), Some(home));
}

#[test]
fn trailing_slash_is_stored_as_nested_index() {
    let store = TestStore::new();
    let service = service(&store);
    let blog = page("s", "a/", "blog");

    service.save_url(blog.clone()).unwrap();

    store.assert_file_exists("s/urls/a/index.yml");
    assert_eq!(service.url("a/", "s"), Some(blog.clone()));
    assert_eq!(service.url("a/index", "s"), Some(blog));
}

#[test]
fn stored_yaml_is_readable_by_hand() {
    let store = TestStore::new();
    let service = service(&store);

    service.save_url(page("site", "contact", "form")).unwrap();

    store.assert_file_contains("site/urls/contact.yml", "view: form");
    store.assert_file_contains("site/urls/contact.yml", "status: 200");
}

#[test]
fn hand_written_yaml_defaults_status() {
    let store = TestStore::new();
    store.write("site/urls/legacy.yml", "scope: site\nurl: legacy\nstatus: 0\nview: old\n");
    let service = service(&store);

    let url = service.url("legacy", "site").unwrap();

    assert_eq!(url.status(), 200);
    assert_eq!(url.view.as_deref(), Some("old"));
    assert!(url.map.is_empty());
}

#[test]
fn json_suffix_switches_format() {
    let store = TestStore::new();
    let mut settings = FsSettings::with_root(store.root());
    settings.urls.suffix = ".json".into();
    let service = FsSalixService::new(settings);
    let url = page("site", "about", "page");

    service.save_url(url.clone()).unwrap();

    let stored: serde_json::Value = serde_json::from_str(&store.read("site/urls/about.json")).unwrap();
    assert_eq!(stored["view"], json!("page"));
    assert_eq!(service.url("about", "site"), Some(url));
}

#[test]
fn missing_or_malformed_url_is_absent() {
    let store = TestStore::new();
    store.write("site/urls/broken.yml", "scope: [unterminated\n");
    let service = service(&store);

    assert!(service.url("nowhere", "site").is_none());
    assert!(service.url("broken", "site").is_none());
    assert!(service.lookup_url("broken", "site").is_err());
}

#[test]
fn save_from_parts_ignores_timestamps() {
    let store = TestStore::new();
    let service = service(&store);

    let saved = service
        .save_url_parts("site", "news/", -5, Some("news"), None, None, Attributes::new())
        .unwrap();

    assert_eq!(saved.status(), 200);
    let loaded = service.url("news/", "site").unwrap();
    assert_eq!(loaded, saved);
    assert!(loaded.published().is_some());
    assert!(loaded.removed().is_none());
}
