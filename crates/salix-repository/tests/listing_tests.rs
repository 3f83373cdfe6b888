use pretty_assertions::assert_eq;
use salix_core::{Attributes, SalixResource, SalixService, Url};
use salix_repository::{FsSalixService, FsSettings};
use salix_test_utils::TestStore;
use serde_json::json;
use std::collections::BTreeSet;

fn service(store: &TestStore) -> FsSalixService {
    FsSalixService::new(FsSettings::with_root(store.root()))
}

fn targets(configs: &[salix_core::Configuration]) -> BTreeSet<String> {
    configs.iter().map(|c| c.target.clone()).collect()
}

#[test]
fn scopes_are_top_level_directories() {
    let store = TestStore::new().with_scopes(&["alpha", "beta"]);
    store.write("templates/layout.html", r#"{"name":"layout","source":""}"#);
    store.write("README.txt", "not a scope");
    let service = service(&store);

    let scopes: Vec<String> = service.scopes().into_iter().collect();

    assert_eq!(scopes, vec!["alpha".to_string(), "beta".to_string()]);
}

#[test]
fn scopes_of_empty_store_are_empty() {
    let store = TestStore::new();
    let service = FsSalixService::new(FsSettings::with_root(store.path("missing-root")));

    assert!(service.scopes().is_empty());
}

#[test]
fn configurations_in_lists_only_that_scope() {
    let store = TestStore::new();
    let service = service(&store);
    service.save_configuration("s", "a", Attributes::new()).unwrap();
    service.save_configuration("s", "b", Attributes::new()).unwrap();
    service.save_configuration("other", "c", Attributes::new()).unwrap();

    let configs = service.configurations_in("s");

    assert_eq!(targets(&configs), BTreeSet::from(["a".to_string(), "b".to_string()]));
    assert!(configs.iter().all(|c| c.scope == "s"));
}

#[test]
fn listings_of_unknown_scope_are_empty() {
    let store = TestStore::new();
    let service = service(&store);

    assert!(service.configurations_in("ghost").is_empty());
    assert!(service.templates_in("ghost").is_empty());
    assert!(service.urls_in("ghost").is_empty());
    assert!(service.resources_in("ghost").is_empty());
}

#[test]
fn stray_and_broken_files_are_left_out() {
    let store = TestStore::new();
    store.write("s/configurations/good.json", r#"{"scope":"s","target":"good","map":{}}"#);
    store.write("s/configurations/broken.json", "{");
    store.write("s/configurations/notes.txt", "not a configuration");
    store.write("s/configurations/urls-backup", "matches by prefix, but reads nothing");
    let service = service(&store);

    let configs = service.configurations_in("s");

    assert_eq!(targets(&configs), BTreeSet::from(["good".to_string()]));
}

#[test]
fn find_configurations_scans_every_scope_case_insensitively() {
    let store = TestStore::new();
    let service = service(&store);
    service
        .save_configuration("alpha", "mail", Attributes::from([("port".to_string(), json!(25))]))
        .unwrap();
    service
        .save_configuration("beta", "Mail", Attributes::from([("port".to_string(), json!(587))]))
        .unwrap();
    service.save_configuration("gamma", "other", Attributes::new()).unwrap();

    let found = service.configurations_for("MAIL");

    let scopes: BTreeSet<&str> = found.iter().map(|c| c.scope.as_str()).collect();
    assert_eq!(scopes, BTreeSet::from(["alpha", "beta"]));
    assert_eq!(found.len(), 2);
}

#[test]
fn find_configurations_without_match_is_empty() {
    let store = TestStore::new();
    let service = service(&store);
    service.save_configuration("alpha", "mail", Attributes::new()).unwrap();

    assert!(service.configurations_for("x").is_empty());
}

#[test]
fn urls_in_walks_nested_folders() {
    let store = TestStore::new();
    let service = service(&store);
    for url in ["", "about", "blog/", "blog/2024/first-post"] {
        service
            .save_url(Url::new("site", url, 200, Some("page".into()), Attributes::new()))
            .unwrap();
    }
    store.write("site/urls/readme.md", "not a url");

    let urls: BTreeSet<String> = service.urls_in("site").into_iter().map(|u| u.url).collect();

    assert_eq!(
        urls,
        BTreeSet::from([
            "".to_string(),
            "about".to_string(),
            "blog/".to_string(),
            "blog/2024/first-post".to_string(),
        ])
    );
}

#[test]
fn all_urls_span_scopes() {
    let store = TestStore::new();
    let service = service(&store);
    service.save_url(Url::new("a", "", 200, None, Attributes::new())).unwrap();
    service.save_url(Url::new("b", "x", 301, None, Attributes::new())).unwrap();

    assert_eq!(service.all_urls().len(), 2);
    assert_eq!(service.active_urls(), service.all_urls());
}

#[test]
fn templates_and_resources_are_listed() {
    let store = TestStore::new();
    let service = service(&store);
    service.save_template("site", "home", "<h1/>").unwrap();
    service.save_template("site", "about", "<p/>").unwrap();
    store.write("site/templates/draft.txt", "wrong suffix");
    service
        .save_resource_bytes("site", "logo.png", "", None, &[1, 2, 3])
        .unwrap();
    service.save_resource_text("site", "site.css", "", None, "body{}").unwrap();

    let templates: Vec<String> = service.templates_in("site").into_iter().map(|t| t.name).collect();
    let resources: Vec<String> = service
        .resources_in("site")
        .iter()
        .map(|r| r.source_id().to_string())
        .collect();

    assert_eq!(templates, vec!["about".to_string(), "home".to_string()]);
    assert_eq!(resources, vec!["logo.png".to_string(), "site.css".to_string()]);
}
