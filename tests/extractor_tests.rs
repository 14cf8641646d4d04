use og_inspector::{InspectError, MetadataExtractor};

const FULL_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>  Rust Programming Language  </title>
    <meta name="description" content="A language empowering everyone">
    <meta name="robots" content="index, follow">
    <meta name="author" content="The Rust Team">
    <meta name="keywords" content="rust, systems">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="theme-color" content="#000000">
    <link rel="canonical" href="https://www.rust-lang.org/">
    <link rel="shortcut icon" href="/static/favicon.ico">
    <link rel="icon" href="/static/favicon-32.png">
    <meta property="og:title" content="Rust">
    <meta property="og:description" content="Reliable and efficient software">
    <meta property="og:image" content="https://www.rust-lang.org/social.png">
    <meta property="og:image:width" content="1200">
    <meta property="og:image:height" content="630">
    <meta property="og:image:alt" content="Rust logo">
    <meta property="og:url" content="https://www.rust-lang.org/">
    <meta property="og:type" content="website">
    <meta property="og:site_name" content="Rust">
    <meta property="og:locale" content="en_US">
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="Rust on Twitter">
    <meta name="twitter:description" content="Tweet-sized pitch">
    <meta name="twitter:image" content="https://www.rust-lang.org/twitter.png">
    <meta name="twitter:image:alt" content="Ferris">
    <meta name="twitter:site" content="@rustlang">
    <meta name="twitter:creator" content="@ferris">
    <script type="application/ld+json">{"@context":"https://schema.org","@type":"Organization","name":"Rust"}</script>
</head>
<body><h1>Rust</h1></body>
</html>"##;

#[test]
fn test_extracts_every_field_group() {
    let extractor = MetadataExtractor::new();
    let metadata = extractor
        .extract(FULL_PAGE, "https://www.rust-lang.org")
        .unwrap();

    let og = &metadata.open_graph;
    assert_eq!(og.title.as_deref(), Some("Rust"));
    assert_eq!(og.description.as_deref(), Some("Reliable and efficient software"));
    assert_eq!(og.image.as_deref(), Some("https://www.rust-lang.org/social.png"));
    assert_eq!(og.image_width.as_deref(), Some("1200"));
    assert_eq!(og.image_height.as_deref(), Some("630"));
    assert_eq!(og.image_alt.as_deref(), Some("Rust logo"));
    assert_eq!(og.url.as_deref(), Some("https://www.rust-lang.org/"));
    assert_eq!(og.content_type.as_deref(), Some("website"));
    assert_eq!(og.site_name.as_deref(), Some("Rust"));
    assert_eq!(og.locale.as_deref(), Some("en_US"));

    let twitter = &metadata.twitter;
    assert_eq!(twitter.card.as_deref(), Some("summary_large_image"));
    assert_eq!(twitter.title.as_deref(), Some("Rust on Twitter"));
    assert_eq!(twitter.description.as_deref(), Some("Tweet-sized pitch"));
    assert_eq!(twitter.image.as_deref(), Some("https://www.rust-lang.org/twitter.png"));
    assert_eq!(twitter.image_alt.as_deref(), Some("Ferris"));
    assert_eq!(twitter.site.as_deref(), Some("@rustlang"));
    assert_eq!(twitter.creator.as_deref(), Some("@ferris"));

    let meta = &metadata.meta;
    assert_eq!(meta.title.as_deref(), Some("  Rust Programming Language  "));
    assert_eq!(meta.description.as_deref(), Some("A language empowering everyone"));
    assert_eq!(meta.canonical.as_deref(), Some("https://www.rust-lang.org/"));
    assert_eq!(meta.robots.as_deref(), Some("index, follow"));
    assert_eq!(meta.author.as_deref(), Some("The Rust Team"));
    assert_eq!(meta.keywords.as_deref(), Some("rust, systems"));
    assert_eq!(
        meta.viewport.as_deref(),
        Some("width=device-width, initial-scale=1")
    );
    assert_eq!(meta.charset.as_deref(), Some("utf-8"));
    assert_eq!(meta.theme_color.as_deref(), Some("#000000"));

    let technical = &metadata.technical;
    assert_eq!(technical.favicon.as_deref(), Some("/static/favicon.ico"));
    assert_eq!(technical.charset.as_deref(), Some("utf-8"));
    assert_eq!(technical.viewport, meta.viewport);
    assert!(technical.is_https);
    assert_eq!(technical.has_redirect, None);
    assert!(technical.has_structured_data);
    assert_eq!(technical.structured_data_types, vec!["Organization"]);
}

#[test]
fn test_page_without_tags_yields_empty_groups() {
    let extractor = MetadataExtractor::new();
    let metadata = extractor
        .extract("<html><head></head><body><p>hello</p></body></html>", "http://example.com")
        .unwrap();

    assert_eq!(metadata.open_graph, Default::default());
    assert_eq!(metadata.twitter, Default::default());
    assert_eq!(metadata.meta, Default::default());
    assert!(!metadata.technical.is_https);
    assert!(!metadata.technical.has_structured_data);
    assert!(metadata.technical.structured_data_types.is_empty());
    assert!(metadata.technical.favicon.is_none());
}

#[test]
fn test_twitter_property_fallback() {
    let html = r#"<html><head>
        <meta property="twitter:title" content="From property">
        <meta property="twitter:card" content="summary">
    </head></html>"#;

    let metadata = MetadataExtractor::new()
        .extract(html, "https://example.com")
        .unwrap();

    assert_eq!(metadata.twitter.title.as_deref(), Some("From property"));
    assert_eq!(metadata.twitter.card.as_deref(), Some("summary"));
}

#[test]
fn test_twitter_name_wins_over_property() {
    let html = r#"<html><head>
        <meta property="twitter:title" content="From property">
        <meta name="twitter:title" content="From name">
    </head></html>"#;

    let metadata = MetadataExtractor::new()
        .extract(html, "https://example.com")
        .unwrap();

    assert_eq!(metadata.twitter.title.as_deref(), Some("From name"));
}

#[test]
fn test_empty_content_is_absent_not_empty_string() {
    let html = r#"<html><head>
        <title></title>
        <meta property="og:title" content="">
        <meta name="description">
        <meta name="twitter:card" content="">
    </head></html>"#;

    let metadata = MetadataExtractor::new()
        .extract(html, "https://example.com")
        .unwrap();

    assert!(metadata.meta.title.is_none());
    assert!(metadata.open_graph.title.is_none());
    assert!(metadata.meta.description.is_none());
    assert!(metadata.twitter.card.is_none());
}

#[test]
fn test_whitespace_only_content_is_present() {
    let html = r#"<html><head>
        <title>   </title>
        <meta name="twitter:card" content=" ">
        <meta name="viewport" content="  ">
    </head></html>"#;

    let metadata = MetadataExtractor::new()
        .extract(html, "https://example.com")
        .unwrap();

    assert_eq!(metadata.meta.title.as_deref(), Some("   "));
    assert_eq!(metadata.twitter.card.as_deref(), Some(" "));
    assert_eq!(metadata.meta.viewport.as_deref(), Some("  "));
    assert_eq!(metadata.technical.viewport.as_deref(), Some("  "));
}

#[test]
fn test_structured_data_resilience() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"@context":"https://schema.org","@type":"Product"}</script>
        <script type="application/ld+json">{"@type": "Broken",</script>
    </head><body></body></html>"#;

    let metadata = MetadataExtractor::new()
        .extract(html, "https://shop.example.com")
        .unwrap();

    assert!(metadata.technical.has_structured_data);
    assert_eq!(metadata.technical.structured_data_types, vec!["Product"]);
}

#[test]
fn test_structured_data_arrays_follow_document_order() {
    let html = r#"<html><head>
        <script type="application/ld+json">[{"@type":"WebSite"},{"@type":"BreadcrumbList"}]</script>
        <script type="application/ld+json">{"@type":"WebSite"}</script>
    </head></html>"#;

    let metadata = MetadataExtractor::new()
        .extract(html, "https://example.com")
        .unwrap();

    assert_eq!(
        metadata.technical.structured_data_types,
        vec!["WebSite", "BreadcrumbList", "WebSite"]
    );
}

#[test]
fn test_only_malformed_structured_data_still_counts_as_present() {
    let html = r#"<html><head><script type="application/ld+json">not json</script></head></html>"#;

    let metadata = MetadataExtractor::new()
        .extract(html, "https://example.com")
        .unwrap();

    assert!(metadata.technical.has_structured_data);
    assert!(metadata.technical.structured_data_types.is_empty());
}

#[test]
fn test_malformed_html_degrades_gracefully() {
    let html = r#"<html><head><meta property="og:title" content="Still here"><div><p>unclosed"#;

    let metadata = MetadataExtractor::new()
        .extract(html, "https://example.com")
        .unwrap();

    assert_eq!(metadata.open_graph.title.as_deref(), Some("Still here"));
}

#[test]
fn test_empty_document_is_extraction_error() {
    let extractor = MetadataExtractor::new();

    assert!(matches!(
        extractor.extract("", "https://example.com"),
        Err(InspectError::ExtractionError(_))
    ));
    assert!(matches!(
        extractor.extract("  \n\t ", "https://example.com"),
        Err(InspectError::ExtractionError(_))
    ));
}

#[test]
fn test_extraction_is_deterministic() {
    let extractor = MetadataExtractor::new();
    let first = extractor.extract(FULL_PAGE, "https://www.rust-lang.org").unwrap();
    let second = extractor.extract(FULL_PAGE, "https://www.rust-lang.org").unwrap();
    assert_eq!(first, second);
}
