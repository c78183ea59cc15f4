//! Dark mode color handling across a full conversion.

use crate::common::paragraph;
use cmodel_dom::utils::DarkColorHandler;
use cmodel_dom::{html_to_model, model_to_html, DarkColorRegistry, EditorContext};
use std::cell::RefCell;
use std::rc::Rc;

fn dark_context(registry: &Rc<RefCell<DarkColorRegistry>>) -> EditorContext {
    EditorContext::new().with_dark_mode(registry.clone())
}

#[test]
fn test_colors_are_written_as_variables() {
    let registry = Rc::new(RefCell::new(DarkColorRegistry::default()));
    let document = html_to_model(r#"<p><span style="color: red">x</span></p>"#, None);
    let html = model_to_html(&document, Some(dark_context(&registry))).unwrap();

    assert!(html.contains("color: var(--darkColor_red, red)"), "{html}");
    let registry = registry.borrow();
    let pair = registry.known_colors().get("--darkColor_red").expect("registered pair");
    assert_eq!(pair.light_mode_color, "red");
}

#[test]
fn test_dark_html_reads_back_light_colors() {
    let registry = Rc::new(RefCell::new(DarkColorRegistry::default()));
    let light = html_to_model(r#"<p><span style="color: #336699">x</span></p>"#, None);
    let dark_html = model_to_html(&light, Some(dark_context(&registry))).unwrap();

    let reread = html_to_model(&dark_html, Some(dark_context(&registry)));
    let blocks = reread.blocks;
    assert_eq!(
        paragraph(&blocks[0]).segments[0].format().text_color.text_color.as_deref(),
        Some("#336699")
    );
}

#[test]
fn test_registry_is_shared_across_conversions() {
    let registry = Rc::new(RefCell::new(DarkColorRegistry::default()));
    let document = html_to_model(r#"<p><span style="color: blue">a</span></p>"#, None);
    model_to_html(&document, Some(dark_context(&registry))).unwrap();
    model_to_html(&document, Some(dark_context(&registry))).unwrap();

    assert_eq!(registry.borrow().registration_count(), 1);
}
