// Integration tests for recapi-links-core

use recapi_links_core::{
    LinkFactory, LinkStore, LinkTemplate, LinksConfig, MissingKeyPolicy, VariableSet,
};
use serde_json::{json, Value};

fn object(value: Value) -> VariableSet {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

#[test]
fn test_deferred_resolution_end_to_end() {
    let mut config = LinksConfig::new();
    config.add("record", "self", LinkTemplate::new("/api/records{/pid_value}").unwrap());
    config.add(
        "record",
        "versions",
        LinkTemplate::new("/api/records{/pid_value}/versions{?params*}").unwrap(),
    );

    let mut store = LinkStore::new().with_host("repo.example.org");
    let handle = store
        .register(
            "record",
            object(json!({
                "self": {"pid_value": "abc-123"},
                "versions": {
                    "pid_value": "abc-123",
                    "params": {"sort": "newest", "size": 25},
                },
            })),
        )
        .unwrap();

    store.resolve_with(Some(&config), None).unwrap();

    let bundle = store.get(handle).unwrap();
    assert_eq!(bundle["self"], json!("https://repo.example.org/api/records/abc-123"));
    assert_eq!(
        bundle["versions"],
        json!("https://repo.example.org/api/records/abc-123/versions?size=25&sort=newest")
    );
}

#[test]
fn test_rendered_querystring_is_insertion_order_independent() {
    let config = {
        let mut config = LinksConfig::new();
        config.add("search", "self", LinkTemplate::new("/{?params*}").unwrap());
        config
    };

    let forwards = object(json!({"self": {"params": {"a": 1, "b": 2, "c": 3}}}));
    let backwards = object(json!({"self": {"params": {"c": 3, "b": 2, "a": 1}}}));

    let mut first = LinkStore::new().with_config(config.clone());
    let mut second = LinkStore::new().with_config(config);
    let one = first.register("search", forwards).unwrap();
    let two = second.register("search", backwards).unwrap();

    assert_eq!(first.get(one), second.get(two));
}

#[test]
fn test_strict_policy_from_config_file() {
    let path = std::env::temp_dir().join("recapi-links-integration.toml");
    std::fs::write(
        &path,
        r#"
        [record]
        self = "/api/records{/pid_value}"
        "#,
    )
    .unwrap();
    let config = LinksConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut store = LinkStore::new().with_policy(MissingKeyPolicy::Strict);
    store
        .register("record", object(json!({"unknown": {"pid_value": "1"}})))
        .unwrap();
    assert!(store.resolve_with(Some(&config), None).is_err());
}

#[test]
fn test_factory_renders_without_store_side_effects() {
    let factory = LinkFactory::new().with_host("repo.example.org");
    let template = LinkTemplate::new("/api/records/{pid_value}/files{?q}").unwrap();
    let url = factory
        .create_link(&template, &object(json!({"pid_value": "1", "q": "data"})))
        .unwrap();
    assert_eq!(url, "https://repo.example.org/api/records/1/files?q=data");
}
