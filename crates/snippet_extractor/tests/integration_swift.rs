// crates/snippet_extractor/tests/integration_swift.rs

use std::path::PathBuf;

use anyhow::Result;
use snippet_extractor::processor::{process_file_with_processor, DefaultFileProcessor};
use snippet_extractor::{extract, ExtractError, MarkerSyntax, Region};

const CHILD_LINE: &str =
    "        container.autoregister(ChildManagering.self, initializer: ChildManager.init)";
const CHILD_SCOPE_LINE: &str = "            .inObjectScope(.container)";

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("example.swift")
}

fn fixture() -> String {
    std::fs::read_to_string(fixture_path()).expect("fixture should be readable")
}

/// Every non-marker source line strictly between the region's markers.
fn lines_between(source: &str, region: &Region) -> Vec<String> {
    let syntax = MarkerSyntax::default();
    source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(n, _)| *n > region.start_line && *n < region.end_line)
        .filter(|(n, line)| syntax.parse_line(line, *n).is_none())
        .map(|(_, line)| line.to_string())
        .collect()
}

fn is_contiguous_subsequence(inner: &[String], outer: &[String]) -> bool {
    inner.is_empty() || outer.windows(inner.len()).any(|w| w == inner)
}

#[test]
fn integration_fixture_regions() -> Result<()> {
    let result = extract(&fixture(), &MarkerSyntax::default())?;
    assert_eq!(result.ids().collect::<Vec<_>>(), vec!["gist1", "gist2", "gist3"]);

    let gist2 = result.get("gist2").unwrap();
    assert_eq!(gist2.lines, vec![CHILD_LINE]);

    let gist1 = result.get("gist1").unwrap();
    assert_eq!(
        gist1.lines,
        vec![
            "    func assemble(container: Container) {",
            CHILD_LINE,
            CHILD_SCOPE_LINE,
        ]
    );

    let gist3 = result.get("gist3").unwrap();
    assert_eq!(
        gist3.lines,
        vec![
            CHILD_LINE,
            CHILD_SCOPE_LINE,
            "        container.autoregister(UserManagering.self, initializer: UserManager.init)",
            "            .inObjectScope(.container)",
            "    }",
        ]
    );
    assert_eq!((gist3.start_line, gist3.end_line), (5, 13));
    Ok(())
}

#[test]
fn integration_fixture_round_trip() -> Result<()> {
    let source = fixture();
    let result = extract(&source, &MarkerSyntax::default())?;
    for region in result.iter() {
        assert_eq!(region.lines, lines_between(&source, region), "region {}", region.id);
        assert_eq!(region.text(), lines_between(&source, region).join("\n"));
    }
    Ok(())
}

#[test]
fn integration_fixture_nesting() -> Result<()> {
    let result = extract(&fixture(), &MarkerSyntax::default())?;
    let gist1 = result.get("gist1").unwrap();
    let gist2 = result.get("gist2").unwrap();
    let gist3 = result.get("gist3").unwrap();
    assert!(is_contiguous_subsequence(&gist2.lines, &gist1.lines));
    assert!(is_contiguous_subsequence(&gist2.lines, &gist3.lines));
    Ok(())
}

#[test]
fn integration_fixture_snippets_are_dedented() -> Result<()> {
    let result = extract(&fixture(), &MarkerSyntax::default())?;
    assert_eq!(
        result.get("gist1").unwrap().snippet(),
        "func assemble(container: Container) {\n    container.autoregister(ChildManagering.self, initializer: ChildManager.init)\n        .inObjectScope(.container)"
    );
    assert_eq!(
        result.get("gist2").unwrap().snippet(),
        "container.autoregister(ChildManagering.self, initializer: ChildManager.init)"
    );
    Ok(())
}

#[test]
fn integration_missing_end_marker_is_unclosed() {
    let source: String = fixture()
        .lines()
        .filter(|line| line.trim() != "//gistsnip:end:gist3")
        .collect::<Vec<_>>()
        .join("\n");
    let err = extract(&source, &MarkerSyntax::default()).unwrap_err();
    assert_eq!(err.unclosed_ids(), vec!["gist3"]);
    assert!(matches!(err, ExtractError::UnclosedRegion { .. }));
    assert!(err.to_string().contains("gist3"));
}

#[test]
fn integration_every_opened_id_appears_once() -> Result<()> {
    let source = "\
//gistsnip:start:a
//gistsnip:start:b
x
//gistsnip:end:b
//gistsnip:start:c
y
//gistsnip:end:a
//gistsnip:end:c
";
    let result = extract(source, &MarkerSyntax::default())?;
    assert_eq!(result.len(), 3);
    assert_eq!(result.ids().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn integration_hash_comment_prefix() -> Result<()> {
    let source = "\
#gistsnip:start:setup
pip install gistsnip
#gistsnip:end:setup
";
    let syntax = MarkerSyntax::for_comment_token("#")?;
    let result = extract(source, &syntax)?;
    assert_eq!(result.get("setup").unwrap().text(), "pip install gistsnip");
    // The default syntax does not recognise these lines.
    assert!(extract(source, &MarkerSyntax::default())?.is_empty());
    Ok(())
}

#[test]
fn integration_process_fixture_file() -> Result<()> {
    let result = process_file_with_processor(&DefaultFileProcessor::default(), fixture_path())?
        .expect("fixture should not be skipped");
    assert_eq!(result.len(), 3);
    Ok(())
}
