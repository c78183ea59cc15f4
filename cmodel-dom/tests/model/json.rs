//! Content model JSON shape.

use cmodel_dom::model::{Block, Document};
use cmodel_dom::{html_to_model, model_from_json, model_to_html, model_to_json, ConvertError};
use insta::assert_snapshot;

#[test]
fn test_json_is_camel_case_and_sparse() {
    let document = html_to_model(r#"<ol start="3"><li>a</li></ol>"#, None);
    assert_snapshot!(model_to_json(&document, true).unwrap(), @r#"
    {
      "blocks": [
        {
          "blockType": "ListItem",
          "levels": [
            {
              "listType": "OL",
              "format": {
                "startNumberOverride": 3,
                "marginTop": "1em",
                "marginBottom": "1em"
              }
            }
          ],
          "blocks": [
            {
              "blockType": "Paragraph",
              "segments": [
                {
                  "segmentType": "Text",
                  "text": "a"
                }
              ],
              "isImplicit": true
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn test_hand_written_model_renders() {
    let json = r#"{
        "blocks": [
            {"blockType": "Divider", "tagName": "hr", "format": {"marginTop": "0.5em", "marginBottom": "0.5em"}},
            {"blockType": "Paragraph", "segments": [{"segmentType": "Br"}], "isImplicit": false}
        ]
    }"#;
    let document = model_from_json(json).unwrap();
    assert!(matches!(document.blocks[0], Block::Divider(_)));
    assert_eq!(
        model_to_html(&document, None).unwrap(),
        "<hr><div><span><br></span></div>"
    );
}

#[test]
fn test_parsed_documents_survive_json() {
    let html = r##"<h2 style="color: green">T</h2><table><tr><td rowspan="2" data-x="1">a</td><td>b</td></tr><tr><td>c</td></tr></table><p><img src="a.png" width="10"><a href="#x">l</a></p>"##;
    let document = html_to_model(html, None);
    let json = model_to_json(&document, false).unwrap();
    let reread: Document = model_from_json(&json).unwrap();
    assert_eq!(reread, document);
}

#[test]
fn test_unknown_block_type_is_rejected() {
    let err = model_from_json(r#"{"blocks": [{"blockType": "Video"}]}"#).unwrap_err();
    assert!(matches!(err, ConvertError::ParseError(_)));
}
