//! Integration tests against the repository token document and on-disk fixtures.

use std::path::PathBuf;

use kumanui_tokens::{
    audit, resolve_all, Config, DocumentError, ResolutionErrorKind, TerminalScheme, Tier,
    TokenDocument, WebMode, WebScheme, STANDARD_HUES,
};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn repo_document() -> TokenDocument {
    Config::from_root(repo_root())
        .load_document()
        .expect("repository token document should load")
}

// ============================================================================
// Repository document
// ============================================================================

#[test]
fn every_repository_token_resolves() {
    let doc = repo_document();
    let all = resolve_all(&doc).unwrap();
    assert_eq!(all.len(), doc.entries().len());
    assert!(all.iter().all(|(_, c)| (0.0..=1.0).contains(&c.alpha)));
}

#[test]
fn repository_palette_is_complete() {
    let doc = repo_document();
    let swatches = kumanui_tokens::palette::swatches(&doc, &STANDARD_HUES, &Tier::ALL).unwrap();
    assert_eq!(swatches.len(), 24);
}

#[test]
fn repository_terminal_scheme() {
    let doc = repo_document();
    let scheme = TerminalScheme::from_document(&doc).unwrap();
    assert_eq!(scheme.background.name.as_deref(), Some("Dark Black"));
    assert_eq!(scheme.selection.name.as_deref(), Some("KumaYellow"));
    assert_eq!(scheme.selection.color.opacity_percent(), 30);
    assert_eq!(scheme.ansi().count(), 16);
}

#[test]
fn repository_web_schemes_cover_all_keys() {
    let doc = repo_document();
    for mode in [WebMode::Light, WebMode::Dark] {
        let scheme = WebScheme::from_document(&doc, mode).unwrap();
        assert_eq!(scheme.tokens.len(), 12, "mode {:?}", mode);
        assert!(scheme.get("code-bg").is_some());
    }
}

#[test]
fn repository_audit_runs() {
    let doc = repo_document();
    let [dark, light] = audit(&doc).unwrap();
    assert_eq!(dark.checks.len(), STANDARD_HUES.len());
    assert_eq!(light.checks.len(), STANDARD_HUES.len());
    // white on the darkest black is comfortably above AA
    let white = dark.checks.iter().find(|c| c.label == "White Base").unwrap();
    assert!(white.passes);
}

#[test]
fn repository_version_file() {
    let version = Config::from_root(repo_root()).load_version().unwrap();
    let version = version.expect("VERSION should exist at the repository root");
    assert!(!version.is_empty());
    assert_eq!(version, version.trim());
}

// ============================================================================
// Fixtures on disk
// ============================================================================

fn write_tokens(content: &str) -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let tokens = dir.path().join("tokens");
    std::fs::create_dir_all(&tokens).unwrap();
    std::fs::write(tokens.join("colors.yaml"), content).unwrap();
    let config = Config::from_root(dir.path());
    (dir, config)
}

#[test]
fn parse_errors_name_the_file() {
    let (_dir, config) = write_tokens("palette: [unclosed");
    let err = config.load_document().unwrap_err();
    assert!(matches!(err, DocumentError::Parse { path: Some(_), .. }));
    assert!(err.to_string().contains("colors.yaml"));
}

#[test]
fn invalid_alpha_names_token_and_file() {
    let (_dir, config) = write_tokens("palette:\n  red:\n    base: { value: \"#FF0000\", alpha: -1 }\n");
    let err = config.load_document().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("palette.red.base"), "{}", msg);
    assert!(msg.contains("colors.yaml"), "{}", msg);
}

#[test]
fn dangling_semantic_reference_aborts_whole_run() {
    let (_dir, config) = write_tokens(
        r##"
palette:
  cyan:
    base: { value: "#00FFFF" }
semantics:
  web:
    dark:
      text: { value: "{palette.cyan.dark}" }
"##,
    );
    let doc = config.load_document().unwrap();
    let err = resolve_all(&doc).unwrap_err();
    assert_eq!(err.token.as_deref(), Some("semantics.web.dark.text"));
    assert!(matches!(
        err.kind,
        ResolutionErrorKind::DanglingReference { .. }
    ));
}

#[test]
fn spec_alpha_examples() {
    let (_dir, config) = write_tokens(
        r##"
a: { value: "#112233", alpha: 0.5 }
b: { value: "{a}" }
c: { value: "{a}", alpha: 0.2 }
"##,
    );
    let doc = config.load_document().unwrap();
    let b = doc.resolve_path("b").unwrap();
    assert_eq!((b.hex().as_str(), b.alpha), ("#112233", 0.5));
    let c = doc.resolve_path("c").unwrap();
    assert_eq!((c.hex().as_str(), c.alpha), ("#112233", 0.2));
}
