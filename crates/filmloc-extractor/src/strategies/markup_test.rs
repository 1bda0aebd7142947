use super::*;

const ARTICLE: &str = "\
'''Vertigo''' is a 1958 film.

== Plot ==
Scottie follows Madeleine.

== Production ==

=== Filming locations ===
{{Main|Vertigo filming locations}}
* [[Mission San Juan Bautista]], [[California]]
* [[Fort Point, San Francisco|Fort Point]], San Francisco, California<ref>{{cite web|url=http://x}}</ref>
* ''Podesta Baldocchi'' flower shop, [https://example.org/shop Grant Avenue], San Francisco
* x
<!-- hidden note -->

=== Release ===
Premiered in 1958.
";

fn limits() -> ExtractionLimits {
    ExtractionLimits::default()
}

// -----------------------------------------------------------------------
// Section location
// -----------------------------------------------------------------------

#[test]
fn finds_section_up_to_next_heading() {
    let section = find_filming_section(ARTICLE).expect("section present");
    assert!(section.contains("Mission San Juan Bautista"));
    assert!(!section.contains("Premiered"));
    assert!(!section.contains("Scottie"));
}

#[test]
fn heading_match_is_case_insensitive_and_any_level() {
    let markup = "==FILMING LOCATIONS==\nRome, Italy\n== Cast ==\nnobody";
    let section = find_filming_section(markup).expect("section present");
    assert_eq!(section.trim(), "Rome, Italy");
}

#[test]
fn crlf_headings_delimit_the_section() {
    let markup = "== Production ==\r\n=== Filming locations ===\r\n* [[Rome]], Italy\r\n\
                  === Release ===\r\nPremiered in 1958.\r\n";
    let section = find_filming_section(markup).expect("section present");
    assert!(section.contains("Rome"));
    assert!(!section.contains("Premiered"));
    assert_eq!(extract_from_markup(Some(markup), &limits()), vec!["Rome, Italy"]);
}

#[test]
fn section_runs_to_end_when_last() {
    let markup = "== Filming locations ==\nRome, Italy\nVenice, Italy\n";
    let section = find_filming_section(markup).expect("section present");
    assert!(section.contains("Venice, Italy"));
}

#[test]
fn missing_section_yields_empty() {
    assert!(find_filming_section("== Plot ==\nnothing here").is_none());
    assert!(extract_from_markup(Some("== Plot ==\nnothing"), &limits()).is_empty());
}

#[test]
fn absent_markup_yields_empty() {
    assert!(extract_from_markup(None, &limits()).is_empty());
}

// -----------------------------------------------------------------------
// Cleanup passes
// -----------------------------------------------------------------------

#[test]
fn strip_emphasis_removes_quote_runs() {
    assert_eq!(strip_emphasis("'''Bold''' and ''italic''"), "Bold and italic");
}

#[test]
fn strip_emphasis_keeps_seconds_mark_after_digit() {
    assert_eq!(
        strip_emphasis("Fort Point, 37°48'38''N 122°28'37''W"),
        "Fort Point, 37°48'38''N 122°28'37''W"
    );
    assert_eq!(strip_emphasis("''Vertigo'' (1958)"), "Vertigo (1958)");
}

#[test]
fn strip_templates_handles_nesting() {
    assert_eq!(
        strip_templates("Rome{{cite|a={{date|1958}}}}, Italy"),
        "Rome, Italy"
    );
}

#[test]
fn strip_external_links_keeps_label() {
    assert_eq!(
        strip_external_links("at [https://example.org/x Grant Avenue] today"),
        "at Grant Avenue today"
    );
    assert_eq!(strip_external_links("see [http://example.org]"), "see ");
}

#[test]
fn internal_links_prefer_display_text() {
    assert_eq!(
        rewrite_internal_links("[[Fort Point, San Francisco|Fort Point]] in [[California]]"),
        "Fort Point in California"
    );
}

#[test]
fn internal_links_fall_back_to_target_when_display_empty() {
    assert_eq!(rewrite_internal_links("[[Paris|]]"), "Paris");
}

#[test]
fn strip_references_removes_refs_and_comments() {
    assert_eq!(
        strip_references("Rome<ref name=\"a\">cite</ref><ref name=\"b\" /><!-- x -->, Italy"),
        "Rome, Italy"
    );
}

#[test]
fn cleanup_pipeline_has_fixed_order() {
    let names: Vec<_> = CLEANUP_PASSES.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        vec![
            "strip_references",
            "strip_emphasis",
            "strip_templates",
            "strip_external_links",
            "rewrite_internal_links"
        ]
    );
}

// -----------------------------------------------------------------------
// Full extraction
// -----------------------------------------------------------------------

#[test]
fn extracts_clean_lines_from_article() {
    let lines = extract_from_markup(Some(ARTICLE), &limits());
    assert_eq!(
        lines,
        vec![
            "Mission San Juan Bautista, California",
            "Fort Point, San Francisco, California",
            "Podesta Baldocchi flower shop, Grant Avenue, San Francisco",
        ]
    );
}

#[test]
fn straight_quote_dms_survives_cleanup() {
    let markup = "== Filming locations ==\n* '''Fort Point''', 37°48'38''N 122°28'37''W\n";
    let lines = extract_from_markup(Some(markup), &limits());
    assert_eq!(lines, vec!["Fort Point, 37°48'38''N 122°28'37''W"]);

    let coords = crate::coords::parse_coordinates(&lines[0]).expect("coordinates parsed");
    assert!((coords.latitude - 37.8106).abs() < 1e-3);
    assert!((coords.longitude + 122.4769).abs() < 1e-3);
}

#[test]
fn lines_outside_length_range_are_dropped() {
    let long_line = "a".repeat(401);
    let markup = format!("== Filming locations ==\nabcd\nabcde\n{long_line}\n");
    let lines = extract_from_markup(Some(&markup), &limits());
    assert_eq!(lines, vec!["abcde"]);
}

#[test]
fn line_count_is_capped() {
    let body: String = (0..250).map(|i| format!("Location number {i}\n")).collect();
    let markup = format!("== Filming locations ==\n{body}");
    let lines = extract_from_markup(Some(&markup), &limits());
    assert_eq!(lines.len(), 200);
    assert_eq!(lines[0], "Location number 0");
    assert_eq!(lines[199], "Location number 199");
}
