use crate::dom::{get_attribute, set_attribute, tag_name};
use crate::format::slices::LinkFormat;
use crate::format::FormatHandler;
use markup5ever_rcdom::Handle;

fn is_anchor(element: &Handle) -> bool {
    tag_name(element).as_deref() == Some("a")
}

fn attributes(format: &LinkFormat) -> [(&'static str, &Option<String>); 7] {
    [
        ("href", &format.href),
        ("target", &format.target),
        ("title", &format.anchor_title),
        ("id", &format.anchor_id),
        ("class", &format.anchor_class),
        ("name", &format.name),
        ("rel", &format.relationship),
    ]
}

/// Anchor attributes. Only `a` elements carry them; the other attributes are read only when the
/// anchor is an actual link (`href`) or a named target (`name`).
pub const LINK_HANDLER: FormatHandler<LinkFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if !is_anchor(element) {
            return;
        }
        let read = |name: &str| get_attribute(element, name).filter(|value| !value.is_empty());
        let href = read("href");
        let name = read("name");
        if href.is_none() && name.is_none() {
            return;
        }
        format.href = href;
        format.name = name;
        format.target = read("target");
        format.anchor_title = read("title");
        format.anchor_id = read("id");
        format.anchor_class = read("class");
        format.relationship = read("rel");
    },
    apply: |format, element, _| {
        if !is_anchor(element) || (format.href.is_none() && format.name.is_none()) {
            return;
        }
        for (attribute, value) in attributes(format) {
            if let Some(value) = value {
                set_attribute(element, attribute, value);
            }
        }
    },
};
