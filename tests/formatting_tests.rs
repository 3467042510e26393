use chrono::{TimeZone, Utc};
use poise::serenity_prelude as serenity;
use recap::core::models::SummaryRecord;
use recap::discord::message_formatter::{
    MAX_EMBED_FIELDS, SummaryStyle, close_thread_custom_id, help_embed, page_footer,
    parse_close_thread_id, search_results_embed, summary_embed, turn_page,
};

/// Tests for the embed and button formatting logic
/// These tests verify that what users see stays consistent during refactoring.

fn record(id: i64) -> SummaryRecord {
    SummaryRecord {
        id,
        guild_id: "G1".to_string(),
        channel_id: "C42".to_string(),
        user_id: "U7".to_string(),
        start_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap(),
        summary: "text".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 2, 30, 0).unwrap(),
    }
}

#[test]
fn test_summary_embed_content() {
    let embed = summary_embed(SummaryStyle::Summary, "page body", 1, 1, "ann", None);
    let json = serde_json::to_value(&embed).unwrap();

    assert_eq!(json["title"], "📋 Conversation summary");
    assert_eq!(json["description"], "page body");
    assert_eq!(json["footer"]["text"], "Requested by ann");
}

#[test]
fn test_resummary_embed_title() {
    let embed = summary_embed(
        SummaryStyle::Resummary,
        "again",
        2,
        3,
        "bob",
        Some("https://cdn.example.com/a.png".to_string()),
    );
    let json = serde_json::to_value(&embed).unwrap();

    assert_eq!(json["title"], "📋 Re-summary");
    assert_eq!(json["footer"]["text"], "Requested by bob · page 2/3");
    assert_eq!(json["footer"]["icon_url"], "https://cdn.example.com/a.png");
}

#[test]
fn test_page_footer() {
    assert_eq!(page_footer("ann", 1, 1), "Requested by ann");
    assert_eq!(page_footer("ann", 3, 4), "Requested by ann · page 3/4");
}

#[test]
fn test_search_results_embed_lists_records() {
    let embed = search_results_embed("2024-01-01", &[record(1), record(2)]);
    let json = serde_json::to_value(&embed).unwrap();

    assert_eq!(json["title"], "📄 Summaries from 2024-01-01");
    let fields = json["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["name"], "Summary ID: 1");
    let value = fields[0]["value"].as_str().unwrap();
    assert!(value.contains("<#C42>"), "value was: {value}");
    assert!(value.contains("2024-01-01 02:30:00 UTC"), "value was: {value}");
}

#[test]
fn test_search_results_embed_caps_fields() {
    let records: Vec<SummaryRecord> = (1..=30).map(record).collect();
    let embed = search_results_embed("2024-01-01", &records);
    let json = serde_json::to_value(&embed).unwrap();

    assert_eq!(json["fields"].as_array().unwrap().len(), MAX_EMBED_FIELDS);
    assert!(
        json["description"]
            .as_str()
            .unwrap()
            .contains("first 25 of 30")
    );
}

#[test]
fn test_help_embed_lists_commands() {
    let json = serde_json::to_value(help_embed()).unwrap();
    let names: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec!["/summarize", "/search [date]", "/resummarize [summary_id]"]
    );
}

#[test]
fn test_close_thread_id_roundtrip() {
    let owner = serenity::UserId::new(80_351_110_224_678_912);
    let custom_id = close_thread_custom_id(owner);
    assert_eq!(parse_close_thread_id(&custom_id), Some(80_351_110_224_678_912));
}

#[test]
fn test_parse_close_thread_id_rejects_foreign_ids() {
    assert_eq!(parse_close_thread_id("12345prev"), None);
    assert_eq!(parse_close_thread_id("recap-close-thread:"), None);
    assert_eq!(parse_close_thread_id("recap-close-thread:abc"), None);
    assert_eq!(parse_close_thread_id("recap-close-thread:0"), None);
}

#[test]
fn test_turn_page_stays_in_bounds() {
    assert_eq!(turn_page(0, 3, false), 0);
    assert_eq!(turn_page(0, 3, true), 1);
    assert_eq!(turn_page(2, 3, true), 2);
    assert_eq!(turn_page(2, 3, false), 1);
}
