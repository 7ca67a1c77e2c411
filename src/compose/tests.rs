use super::*;
use crate::instrument::Injector;
use crate::store::{File, FileStore};

fn shim() -> Instrumentation {
    Injector::shim(false)
}

fn between<'a>(html: &'a str, open: &str, close: &str) -> &'a str {
    let start = html.find(open).unwrap() + open.len();
    let end = html[start..].find(close).unwrap() + start;
    &html[start..end]
}

#[test]
fn test_aggregate_is_deterministic() {
    let mut store = FileStore::in_memory();
    store.add("extra.css", FileKind::Css).unwrap();
    let snapshot = store.snapshot();

    let first = compose(&snapshot, &shim());
    let second = compose(&snapshot, &shim());
    assert_eq!(first, second);
    assert_eq!(first.mode, Mode::Aggregate);
    assert_eq!(first.source, None);
}

#[test]
fn test_utils_js_is_inlined_after_entry_script() {
    let mut store = FileStore::in_memory();
    store.add("utils.js", FileKind::Js).unwrap();
    store.update("utils.js", "window.X=1;").unwrap();
    store.select("index.html").unwrap();

    let doc = compose(&store.snapshot(), &shim());
    let script = between(&doc.html, "<script>", "</script>");
    let entry = store.get("script.js").unwrap().content.trim_end();

    let entry_at = script.find(entry).unwrap();
    let utils_at = script.find("window.X=1;").unwrap();
    assert!(entry_at < utils_at);
}

#[test]
fn test_n_css_and_m_js_files_inline_n_plus_one_and_m_plus_one() {
    let mut store = FileStore::in_memory();
    store.update("styles.css", "/*css-0*/").unwrap();
    store.update("script.js", "//js-0").unwrap();
    for i in 1..=2 {
        let name = format!("extra{i}.css");
        store.add(&name, FileKind::Css).unwrap();
        store.update(&name, format!("/*css-{i}*/")).unwrap();
    }
    for i in 1..=3 {
        let name = format!("extra{i}.js");
        store.add(&name, FileKind::Js).unwrap();
        store.update(&name, format!("//js-{i}")).unwrap();
    }

    let doc = compose(&store.snapshot(), &shim());
    assert_eq!(doc.html.matches("<style>").count(), 1);
    assert_eq!(doc.html.matches("<script>").count(), 1);

    let style = between(&doc.html, "<style>", "</style>");
    assert_eq!(style.trim(), "/*css-0*/\n/*css-1*/\n/*css-2*/");

    let script = between(&doc.html, "<script>", "</script>");
    assert!(script.starts_with(&format!("\n{}", shim().as_str())));
    assert!(script.trim_end().ends_with("//js-0\n//js-1\n//js-2\n//js-3"));
}

#[test]
fn test_project_references_are_stripped_and_others_kept() {
    let mut store = FileStore::in_memory();
    store.add("theme.css", FileKind::Css).unwrap();
    store
        .update(
            "index.html",
            concat!(
                "<link rel=\"stylesheet\" href=\"./theme.css\">\n",
                "<link rel=\"stylesheet\" href=\"https://cdn.example/x.css\">\n",
                "<link rel=\"icon\" href=\"styles.css\">\n",
                "<p id=\"keep\">hi</p>\n",
                "<script src=\"script.js\"></script>\n",
                "<script src=\"https://cdn.example/lib.js\"></script>\n",
            ),
        )
        .unwrap();

    let doc = compose(&store.snapshot(), &shim());
    let body = between(&doc.html, "<body>", "<script>\n");
    assert!(!body.contains("theme.css"));
    assert!(!body.contains("src=\"script.js\""));
    assert!(body.contains("https://cdn.example/x.css"));
    assert!(body.contains("https://cdn.example/lib.js"));
    assert!(body.contains("<link rel=\"icon\" href=\"styles.css\">"));
    assert!(body.contains("<p id=\"keep\">hi</p>"));
}

#[test]
fn test_closing_tags_in_inlined_content_are_neutralised() {
    let mut store = FileStore::in_memory();
    store.update("script.js", "console.log('</script><b>x</b>');").unwrap();
    store.update("styles.css", "/* </style> */").unwrap();

    let doc = compose(&store.snapshot(), &shim());
    assert_eq!(doc.html.matches("</script>").count(), 1);
    assert_eq!(doc.html.matches("</style>").count(), 1);
    assert!(doc.html.contains("console.log('<\\/script><b>x</b>');"));
    assert!(doc.html.contains("/* <\\/style> */"));
}

#[test]
fn test_missing_selection_falls_back_to_aggregate() {
    let mut snapshot = FileStore::in_memory().snapshot();
    snapshot.selected = "ghost.md".into();
    let doc = compose(&snapshot, &shim());
    assert_eq!(doc.mode, Mode::Aggregate);
    assert_eq!(doc.file, "ghost.md");
}

#[test]
fn test_missing_entry_html_gives_empty_body() {
    let snapshot = ProjectSnapshot {
        files: vec![File::new("styles.css", "p{}", FileKind::Css)],
        selected: "index.html".into(),
    };
    let doc = compose(&snapshot, &shim());
    assert_eq!(between(&doc.html, "<body>", "<script>").trim(), "");
    assert!(doc.html.contains("p{}"));
}

#[test]
fn test_markdown_note() {
    let mut store = FileStore::in_memory();
    store.add("note.md", FileKind::Markdown).unwrap();
    store.update("note.md", "# Title\n**bold**").unwrap();
    store.select("note.md").unwrap();

    let doc = compose(&store.snapshot(), &shim());
    assert_eq!(doc.mode, Mode::Single(FileKind::Markdown));
    assert!(doc.html.contains("<h1>Title</h1>"));
    assert!(doc.html.contains("<strong>bold</strong>"));
    assert_eq!(doc.source.as_deref(), Some("# Title\n**bold**"));
}

#[test]
fn test_valid_json_is_pretty_printed_in_order() {
    let mut store = FileStore::in_memory();
    store.add("data.json", FileKind::Json).unwrap();
    store.update("data.json", r#"{"b":1,"a":[true]}"#).unwrap();
    store.select("data.json").unwrap();

    let doc = compose(&store.snapshot(), &shim());
    assert!(doc.html.contains(
        "<pre>{\n  &quot;b&quot;: 1,\n  &quot;a&quot;: [\n    true\n  ]\n}</pre>"
    ));
    assert!(!doc.html.contains("data-invalid-json"));
}

#[test]
fn test_invalid_json_shows_raw_text_and_marker() {
    let mut store = FileStore::in_memory();
    store.add("bad.json", FileKind::Json).unwrap();
    store.update("bad.json", "{\"a\": <1>}").unwrap();
    store.select("bad.json").unwrap();

    let doc = compose(&store.snapshot(), &shim());
    assert!(doc.html.contains("data-invalid-json"));
    assert!(doc.html.contains("Invalid JSON: "));
    assert!(doc.html.contains("<pre>{&quot;a&quot;: &lt;1&gt;}</pre>"));
}

#[test]
fn test_shim_in_head_of_renderable_single_files() {
    let mut store = FileStore::in_memory();
    store.add("logo.svg", FileKind::Svg).unwrap();
    store.add("page.html", FileKind::Html).unwrap();

    for name in ["logo.svg", "page.html"] {
        store.select(name).unwrap();
        let doc = compose(&store.snapshot(), &shim());
        let head = between(&doc.html, "<head>", "</head>");
        assert!(head.contains(shim().as_str()), "{name}");
    }
}

#[test]
fn test_css_and_js_selections_render_as_escaped_text() {
    let mut store = FileStore::in_memory();
    store.update("script.js", "if (a < b) alert('x');").unwrap();

    for name in ["script.js", "styles.css"] {
        store.select(name).unwrap();
        let doc = compose(&store.snapshot(), &shim());
        assert!(!doc.html.contains("<script"), "{name}");
        assert!(doc.html.contains("<pre>"), "{name}");
    }
    store.select("script.js").unwrap();
    let doc = compose(&store.snapshot(), &shim());
    assert!(doc.html.contains("if (a &lt; b) alert(&#39;x&#39;);"));
    assert_eq!(doc.mode, Mode::Single(FileKind::Js));
}

#[test]
fn test_mode_display() {
    assert_eq!(Mode::Aggregate.to_string(), "aggregate");
    assert_eq!(Mode::Single(FileKind::Markdown).to_string(), "markdown");
}

#[test]
fn test_markup_in_file_name_stays_text_in_title() {
    let mut store = FileStore::in_memory();
    store.add("x<i>.md", FileKind::Markdown).unwrap();
    store.select("x<i>.md").unwrap();

    let doc = compose(&store.snapshot(), &shim());
    assert_eq!(between(&doc.html, "<title>", "</title>"), "x&lt;i&gt;.md");
}
