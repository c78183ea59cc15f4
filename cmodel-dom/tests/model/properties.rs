//! Property tests over generated HTML.

use crate::common::roundtrip;
use cmodel_dom::{html_to_model, model_from_json, model_to_html, model_to_json};
use proptest::prelude::*;

fn tag_soup() -> impl Strategy<Value = String> {
    let fragments = vec![
        "<p>",
        "</p>",
        "<ol start=\"7\">",
        "<ul>",
        "<li>",
        "</ol>",
        "<table><tr><td colspan=\"3\">",
        "<td rowspan=\"9\">",
        "</table>",
        "<b style=\"font-size: 3rem; color: var(--x)\">",
        "<a href=\"#x\">",
        "<br>",
        "<hr>",
        "<blockquote>",
        "<pre>",
        "<div style=\"margin: 1px 2px; display: flex\">",
    ];
    let piece = prop_oneof![
        prop::sample::select(fragments).prop_map(String::from),
        "[a-z ]{0,6}",
    ];
    prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

fn inline_run() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-z]{1,8}",
        "[a-z]{1,8}".prop_map(|word| format!("<b>{word}</b>")),
        "[a-z]{1,8}".prop_map(|word| format!("<i>{word}</i>")),
        Just("<br>".to_string()),
    ];
    prop::collection::vec(piece, 1..6).prop_map(|pieces| pieces.join(" "))
}

fn block() -> impl Strategy<Value = String> {
    prop_oneof![
        inline_run().prop_map(|run| format!("<p>{run}</p>")),
        prop::collection::vec(inline_run(), 1..4).prop_map(|items| {
            let items: String = items.iter().map(|item| format!("<li>{item}</li>")).collect();
            format!("<ul>{items}</ul>")
        }),
        prop::collection::vec(inline_run(), 1..4).prop_map(|items| {
            let items: String = items.iter().map(|item| format!("<li>{item}</li>")).collect();
            format!("<ol>{items}</ol>")
        }),
    ]
}

fn document_html() -> impl Strategy<Value = String> {
    prop::collection::vec(block(), 1..5).prop_map(|blocks| blocks.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_conversion_never_fails_on_tag_soup(html in tag_soup()) {
        let document = html_to_model(&html, None);
        prop_assert!(model_to_html(&document, None).is_ok());
    }

    #[test]
    fn prop_leading_text_survives_tag_soup(word in "[a-z]{1,6}", soup in tag_soup()) {
        let html = format!("{word}{soup}");
        let document = html_to_model(&html, None);
        prop_assert!(!document.blocks.is_empty(), "{html}");

        let output = model_to_html(&document, None).unwrap();
        prop_assert!(output.contains(&word), "{html} => {output}");
    }

    #[test]
    fn prop_conversion_never_fails_on_any_text(html in "\\PC{0,64}") {
        let document = html_to_model(&html, None);
        prop_assert!(model_to_html(&document, None).is_ok());
    }

    #[test]
    fn prop_roundtrip_is_stable(html in document_html()) {
        let once = roundtrip(&html, None);
        let twice = roundtrip(&once, None);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_json_preserves_model(html in document_html()) {
        let document = html_to_model(&html, None);
        let json = model_to_json(&document, false).unwrap();
        prop_assert_eq!(model_from_json(&json).unwrap(), document);
    }
}
