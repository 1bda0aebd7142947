use super::*;

fn layout(name: &str) -> LayoutConfig {
    LayoutConfig {
        name: name.to_string(),
        hosts: vec!["example.org".to_string()],
        path_pattern: Some("/locations$".to_string()),
        container_selectors: vec![".locations".to_string()],
        item_selectors: vec![],
    }
}

#[test]
fn builtin_layouts_validate() {
    assert!(validate_layouts(&builtin_layouts()).is_ok());
}

#[test]
fn host_match_accepts_subdomains() {
    let l = layout("a");
    assert!(l.matches_host("example.org"));
    assert!(l.matches_host("www.Example.org"));
    assert!(!l.matches_host("notexample.org"));
}

#[test]
fn empty_hosts_match_anything() {
    let mut l = layout("a");
    l.hosts.clear();
    assert!(l.matches_host("anything.test"));
}

#[test]
fn duplicate_names_rejected() {
    let err = validate_layouts(&[layout("Same"), layout("same")]).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")));
}

#[test]
fn blank_name_rejected() {
    let err = validate_layouts(&[layout("  ")]).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn invalid_path_pattern_rejected() {
    let mut l = layout("bad");
    l.path_pattern = Some("(unclosed".to_string());
    let err = validate_layouts(&[l]).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("path_pattern")));
}

#[test]
fn layout_without_any_trigger_rejected() {
    let mut l = layout("inert");
    l.path_pattern = None;
    l.container_selectors.clear();
    assert!(validate_layouts(&[l]).is_err());
}

#[test]
fn parses_yaml_with_defaults() {
    let yaml = r#"
layouts:
  - name: fansite
    hosts: [movie-locations.example]
    path_pattern: "^/film/"
    container_selectors: [".spots"]
"#;
    let file: LayoutsFile = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(file.layouts.len(), 1);
    assert_eq!(file.layouts[0].name, "fansite");
    assert!(file.layouts[0].item_selectors.is_empty());
    assert!(validate_layouts(&file.layouts).is_ok());
}

#[test]
fn missing_file_reports_path() {
    let err = load_layouts(Path::new("/definitely/not/here.yaml")).unwrap_err();
    assert!(
        matches!(err, ConfigError::LayoutsFileIo { ref path, .. } if path.contains("here.yaml"))
    );
}

#[test]
fn no_path_yields_builtin_layouts() {
    let layouts = load_layouts_or_builtin(None).unwrap();
    assert_eq!(layouts, builtin_layouts());
}
