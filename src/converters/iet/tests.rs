//! Round-trip tests for script → XML → script

use super::*;
use crate::diagnostics::DiagnosticKind;

fn round_trip(script: &str) -> String {
    let report = encode_str(script, &EncodeSettings::default());
    decode_to_text(&report.xml, &DecodeSettings::default()).unwrap()
}

#[test]
fn test_page_break_scenario() {
    let report = encode_str("「あれ？」[pg]\n", &EncodeSettings::default());
    assert!(report
        .xml
        .contains("<p>\n<ul><q>あれ？</q><pg/></ul>\n</p>\n"));

    let lines = decode_str(&report.xml, &DecodeSettings::default()).unwrap();
    assert_eq!(lines, vec!["「あれ？」[pg]"]);
}

#[test]
fn test_single_empty_line() {
    let report = encode_str("\n", &EncodeSettings::default());
    assert!(report.xml.contains(">\n<br/>\n</iet>"));
    assert_eq!(
        decode_str(&report.xml, &DecodeSettings::default()).unwrap(),
        vec![""]
    );
}

#[test]
fn test_comment_and_save_label_scenarios() {
    assert_eq!(round_trip("//note\n"), "//note\n");
    assert_eq!(
        round_trip("[SAVELABLE TEXT=\"ch1\"]\n"),
        "[SAVELABLE TEXT=\"ch1\"]\n"
    );
}

#[test]
fn test_speaker_suffix_keeps_attribution_without_diagnostic() {
    let report = encode_str("[char_l_st_mizu01]\n「やあ」[l]\n", &EncodeSettings::default());
    assert!(report.xml.contains("<ul char=\"l: mizu\">"));
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_unknown_suffix_reports_and_still_round_trips() {
    let script = "[char_l_st_mizu01]\n「やあ」[xyz]\n";
    let report = encode_str(script, &EncodeSettings::default());

    assert_eq!(
        report
            .diagnostics
            .of_kind(DiagnosticKind::UnrecognizedTrailingMarker)
            .count(),
        1
    );
    assert!(report.xml.contains("<ul char=\"l: mizu\">「やあ」[xyz]</ul>"));
    assert_eq!(round_trip(script), script);
}

#[test]
fn test_full_script_round_trip() {
    let script = "\
//==== 第一話 ====
*start|はじまり
[SAVELABLE TEXT=\"第一話 はじまり\"]

[bg storage=room01 time=500]
[char_l_st_mizu01 fade=300]
[char_r_st_sora02 fade=300]
「おはよう」[sl]
「今日もいい天気だね」[pg]
　窓の外を見る。[pg]

[char_l_st_mizu03]
「そうかな？」[l]
「うん」[r]
[char_all_clear]
　そして、誰もいなくなった。[pg]
";
    assert_eq!(round_trip(script), script);
}

#[test]
fn test_markup_special_characters_survive() {
    let script = "\
//a < b && c > d
*label\"quoted\"
[eval exp=\"f.x = 'y' & 1\"]
「<b>&amp;</b> 'single' \"double\"」[pg]
";
    let report = encode_str(script, &EncodeSettings::default());
    assert!(report.xml.contains("&lt;b&gt;&amp;amp;&lt;/b&gt;"));
    assert_eq!(round_trip(script), script);
}

#[test]
fn test_leading_full_width_space_survives() {
    let script = "　「あ」[sl]\n　　二つ[pg]\n";
    let report = encode_str(script, &EncodeSettings::default());
    assert!(report.xml.contains("<ul><emsp/>「あ」<sl/></ul>"));
    assert!(report.xml.contains("<ul><emsp/>　二つ<pg/></ul>"));
    assert_eq!(round_trip(script), script);
}

#[test]
fn test_blank_line_runs_and_missing_page_break() {
    let script = "\n\n//x\n\n\n「途中」[sl]\n「終わらない」[l]\n";
    assert_eq!(round_trip(script), script);
}

#[test]
fn test_attribution_follows_latest_update() {
    let report = encode_str(
        "[char_l_st_mizu01]\n[char_r_st_sora01]\n「一」[l]\n[char_l_st_mizu02]\n「二」[l]\n",
        &EncodeSettings::default(),
    );
    assert!(report.xml.contains("<ul char=\"l: mizu, r: sora\">「一」[l]</ul>"));
    assert!(report.xml.contains("<ul char=\"r: sora, l: mizu\">「二」[l]</ul>"));
}

#[test]
fn test_clear_all_then_dialogue_has_no_attribute() {
    let report = encode_str(
        "[char_c_st_kai01]\n[char_all_clear]\n「だれ？」[pg]\n",
        &EncodeSettings::default(),
    );
    assert!(report.xml.contains("<ul><q>だれ？</q><pg/></ul>"));
}

#[test]
fn test_western_quote_decode() {
    let report = encode_str("「Hello」[pg]\n", &EncodeSettings::default());
    let settings = DecodeSettings {
        quote_style: QuoteStyle::Western,
    };
    assert_eq!(decode_to_text(&report.xml, &settings).unwrap(), "“Hello”[pg]\n");
}

#[test]
fn test_crlf_input_normalizes_to_lf() {
    assert_eq!(round_trip("//a\r\n\r\n「b」[pg]\r\n"), "//a\n\n「b」[pg]\n");
}

#[test]
fn test_streamed_fragments_match_report() {
    let script = ["//x", "", "「a」[sl]", "「b」[pg]"];
    let streamed: Vec<String> = XmlFragments::new(script, &EncodeSettings::default()).collect();
    let report = encode_lines(script, &EncodeSettings::default());

    assert!(streamed.iter().all(|fragment| fragment.ends_with('\n')));
    assert_eq!(streamed.concat(), report.xml);
}

#[test]
fn test_save_label_with_trailing_tag_stays_a_tag() {
    let script = "[SAVELABLE TEXT=\"a\"][wait time=10]\n";
    let report = encode_str(script, &EncodeSettings::default());

    assert!(report
        .xml
        .contains("<tag>[SAVELABLE TEXT=&quot;a&quot;][wait time=10]</tag>"));
    assert!(!report.xml.contains("<save-label"));
    assert_eq!(round_trip(script), script);
}
