use super::*;

fn bundle() -> BTreeMap<String, Url> {
    let mut m = BTreeMap::new();
    m.insert(
        "clip.mp4".to_string(),
        Url::parse("file:///bundle/clip.mp4").unwrap(),
    );
    m
}

#[test]
fn embedded_lookup_wins() {
    let r = AssetResolver::new(bundle());
    assert_eq!(
        r.resolve("clip.mp4").unwrap().as_str(),
        "file:///bundle/clip.mp4"
    );
}

#[test]
fn absolute_uris_pass_through() {
    let r = AssetResolver::default();
    assert_eq!(
        r.resolve("https://example.com/a.mov").unwrap().as_str(),
        "https://example.com/a.mov"
    );
    assert_eq!(
        r.resolve("file:///tmp/a.mp4").unwrap().scheme(),
        "file"
    );
}

#[cfg(unix)]
#[test]
fn absolute_paths_become_file_urls() {
    let r = AssetResolver::default();
    let url = r.resolve("/var/media/a.mp4").unwrap();
    assert_eq!(url.as_str(), "file:///var/media/a.mp4");
}

#[test]
fn unknown_relative_strings_do_not_resolve() {
    let r = AssetResolver::new(bundle());
    assert!(r.resolve("bad-uri-1").is_none());
    assert!(r.resolve("").is_none());
    assert!(r.resolve("   ").is_none());
}

#[test]
fn normalize_asset_name_slash_normalization() {
    assert_eq!(normalize_asset_name("a/b.mp4").unwrap(), "a/b.mp4");
    assert_eq!(normalize_asset_name("a\\b.mp4").unwrap(), "a/b.mp4");
    assert_eq!(normalize_asset_name("./a//b.mp4").unwrap(), "a/b.mp4");
    assert!(normalize_asset_name("../x.mp4").is_err());
    assert!(normalize_asset_name("/abs.mp4").is_err());
    assert!(normalize_asset_name("./").is_err());
}

#[test]
fn directory_assets_resolve_existing_files_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("videos")).unwrap();
    std::fs::write(dir.path().join("videos/a.mp4"), b"x").unwrap();

    let assets = DirectoryAssets::new(dir.path());
    let url = assets.lookup("videos/a.mp4").unwrap();
    assert_eq!(url.scheme(), "file");
    assert!(url.path().ends_with("/videos/a.mp4"));

    assert!(assets.lookup("videos/missing.mp4").is_none());
    assert!(assets.lookup("../videos/a.mp4").is_none());
    assert!(assets.lookup("videos").is_none());
}
