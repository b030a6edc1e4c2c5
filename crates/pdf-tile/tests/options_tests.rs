use pdf_tile::*;

#[test]
fn test_default_options() {
    let options = TileOptions::default();
    assert_eq!(options.layout, PageLayout::LetterPortrait);
    assert_eq!(options.grid, GridShape::new(2, 4).unwrap());
    assert_eq!(options.margin_pt, 18.0);
    assert_eq!(options.tile_count(), 8);
    assert!(options.validate().is_ok());
}

#[test]
fn test_layout_options_resolve_format() {
    let options = TileOptions::with_copies(PageLayout::A4Landscape, CopiesPerPage::Four);
    let layout = options.layout_options();
    assert_eq!(layout.format, PageFormat::new(841.89, 595.28));
    assert_eq!(layout.grid, GridShape::new(2, 2).unwrap());
    assert_eq!(layout.margin_pt, 18.0);
}

#[test]
fn test_validation() {
    let mut options = TileOptions::default();

    options.margin_pt = 0.0;
    assert!(options.validate().is_ok());

    options.margin_pt = -1.0;
    assert!(matches!(options.validate(), Err(TileError::InvalidLayout(_))));

    options.margin_pt = f64::INFINITY;
    assert!(matches!(options.validate(), Err(TileError::InvalidLayout(_))));

    // Half of the letter width
    options.margin_pt = 306.0;
    assert!(matches!(options.validate(), Err(TileError::InvalidLayout(_))));

    options.margin_pt = 18.0;
    options.grid = GridShape { columns: 0, rows: 4 };
    assert!(matches!(options.validate(), Err(TileError::InvalidLayout(_))));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = TileOptions {
        layout: PageLayout::A4Landscape,
        grid: GridShape::new(3, 3).unwrap(),
        margin_pt: 24.5,
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = TileOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_options_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "layout": "A4Portrait" }"#).unwrap();

    let loaded = TileOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.layout, PageLayout::A4Portrait);
    assert_eq!(loaded.grid, GridShape::new(2, 4).unwrap());
    assert_eq!(loaded.margin_pt, 18.0);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "not json").unwrap();

    let result = TileOptions::load(temp_file.path()).await;
    assert!(matches!(result, Err(TileError::Config(_))));
}
