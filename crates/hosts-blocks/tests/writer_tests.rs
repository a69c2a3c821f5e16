//! Integration tests for merging managed blocks.

use hosts_blocks::{BlockMerger, Markers, merge, remove_block, upsert_block};
use pretty_assertions::assert_eq;
use rstest::rstest;

const START: &str = "# BEGIN HOSTS BLOCKER ENTRIES";
const END: &str = "# END HOSTS BLOCKER ENTRIES";

#[test]
fn test_literal_add_then_remove() {
    let added = merge("a.com 1.2.3.4\n", Some("b.com 5.6.7.8"));
    assert_eq!(
        added,
        "a.com 1.2.3.4\n# BEGIN HOSTS BLOCKER ENTRIES\nb.com 5.6.7.8\n# END HOSTS BLOCKER ENTRIES\n"
    );

    assert_eq!(merge(&added, None), "a.com 1.2.3.4\n");
}

#[test]
fn test_update_replaces_previous_payload() {
    let doc = format!("127.0.0.1 localhost\n{START}\n0.0.0.0 old.example\n{END}\n");

    let result = upsert_block(&doc, "0.0.0.0 new.example");

    assert_eq!(
        result,
        format!("127.0.0.1 localhost\n{START}\n0.0.0.0 new.example\n{END}\n")
    );
    assert_eq!(result.matches(START).count(), 1);
}

#[test]
fn test_update_relocates_block_to_end() {
    let doc = format!("head\n{START}\nold\n{END}\ntail\n");

    let result = upsert_block(&doc, "new");

    assert_eq!(result, format!("head\ntail\n{START}\nnew\n{END}\n"));
}

#[test]
fn test_remove_preserves_surrounding_bytes() {
    let doc = format!("head  \n\n{START}\nx\n{END}\n\ntail\twith tab\n");

    assert_eq!(remove_block(&doc), "head  \n\n\ntail\twith tab\n");
}

#[test]
fn test_remove_consumes_only_one_trailing_newline() {
    let doc = format!("a\n{START}\nx\n{END}\n\n\nb\n");

    assert_eq!(remove_block(&doc), "a\n\n\nb\n");
}

#[test]
fn test_remove_block_at_eof_without_newline() {
    let doc = format!("a\n{START}\nx\n{END}");

    assert_eq!(remove_block(&doc), "a\n");
}

#[test]
fn test_unterminated_block_is_left_alone() {
    let doc = format!("a\n{START}\n0.0.0.0 stale\n");

    assert_eq!(remove_block(&doc), doc);

    // With a payload the new block goes after the dangling marker
    let result = upsert_block(&doc, "fresh");
    assert_eq!(result, format!("{doc}{START}\nfresh\n{END}\n"));
}

#[test]
fn test_unterminated_start_captures_next_block_on_update() {
    let doc = format!("a\n{START}\n0.0.0.0 stale\n");
    let once = upsert_block(&doc, "fresh");

    // The dangling start now pairs with the appended end marker
    assert_eq!(upsert_block(&once, "fresh"), format!("a\n{START}\nfresh\n{END}\n"));
}

#[test]
fn test_duplicate_blocks_all_removed() {
    let doc = format!("a\n{START}\n1\n{END}\nb\n{START}\n2\n{END}\nc\n");

    assert_eq!(remove_block(&doc), "a\nb\nc\n");
    assert_eq!(
        upsert_block(&doc, "3"),
        format!("a\nb\nc\n{START}\n3\n{END}\n")
    );
}

#[test]
fn test_document_without_trailing_newline_is_not_padded() {
    let result = upsert_block("a.com 1.2.3.4", "b");

    assert_eq!(result, format!("a.com 1.2.3.4{START}\nb\n{END}\n"));
    assert_eq!(remove_block(&result), "a.com 1.2.3.4");
}

#[test]
fn test_empty_payload_still_writes_markers() {
    assert_eq!(upsert_block("", ""), format!("{START}\n\n{END}\n"));
}

#[test]
fn test_merger_with_configured_markers() {
    let merger = BlockMerger::new(Markers::new("# >>> adblock", "# <<< adblock").unwrap());
    let doc = format!("keep\n{START}\nforeign\n{END}\n");

    let result = merger.upsert(&doc, "0.0.0.0 a");

    assert_eq!(
        result,
        format!("keep\n{START}\nforeign\n{END}\n# >>> adblock\n0.0.0.0 a\n# <<< adblock\n")
    );
    assert_eq!(merger.remove(&result), doc);
}

#[rstest]
#[case::block_in_middle(
    "127.0.0.1 localhost\r\n# BEGIN HOSTS BLOCKER ENTRIES\r\n0.0.0.0 ads\r\n# END HOSTS BLOCKER ENTRIES\r\n10.0.0.5 nas\r\n",
    "127.0.0.1 localhost\r\n10.0.0.5 nas\r\n"
)]
#[case::block_at_end(
    "127.0.0.1 localhost\r\n# BEGIN HOSTS BLOCKER ENTRIES\r\n0.0.0.0 ads\r\n# END HOSTS BLOCKER ENTRIES\r\n",
    "127.0.0.1 localhost\r\n"
)]
#[case::lf_block_in_crlf_file(
    "127.0.0.1 localhost\r\n# BEGIN HOSTS BLOCKER ENTRIES\n0.0.0.0 ads\n# END HOSTS BLOCKER ENTRIES\n10.0.0.5 nas\r\n",
    "127.0.0.1 localhost\r\n10.0.0.5 nas\r\n"
)]
fn test_remove_crlf_block(#[case] doc: &str, #[case] expected: &str) {
    assert_eq!(remove_block(doc), expected);
}

#[rstest]
#[case::lf_payload("0.0.0.0 x\n0.0.0.0 y")]
#[case::crlf_payload("0.0.0.0 x\r\n0.0.0.0 y")]
fn test_update_crlf_document_keeps_crlf(#[case] payload: &str) {
    let doc = "127.0.0.1 localhost\r\n# BEGIN HOSTS BLOCKER ENTRIES\r\n0.0.0.0 ads\r\n# END HOSTS BLOCKER ENTRIES\r\n10.0.0.5 nas\r\n";

    let updated = upsert_block(doc, payload);

    assert_eq!(
        updated,
        "127.0.0.1 localhost\r\n10.0.0.5 nas\r\n\
         # BEGIN HOSTS BLOCKER ENTRIES\r\n0.0.0.0 x\r\n0.0.0.0 y\r\n# END HOSTS BLOCKER ENTRIES\r\n"
    );
    assert!(!updated.replace("\r\n", "").contains('\n'));
    assert_eq!(upsert_block(&updated, payload), updated);
    assert_eq!(remove_block(&updated), "127.0.0.1 localhost\r\n10.0.0.5 nas\r\n");
}

#[test]
fn test_lf_document_keeps_payload_verbatim() {
    let result = upsert_block("a\n", "x\r\ny");

    assert_eq!(result, format!("a\n{START}\nx\r\ny\n{END}\n"));
}
