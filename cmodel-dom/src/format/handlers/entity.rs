//! Entity wrapper format: id, type and readonly state carried as `_E*` class tokens.

use crate::dom::{
    class_list, get_attribute, is_content_editable, remove_attribute, set_attribute,
};
use crate::format::slices::EntityFormat;
use crate::format::FormatHandler;
use crate::utils::entity_class::{
    generate_entity_class_names, merge_entity_class_names, parse_entity_class,
};

/// Entity metadata, carried in the wrapper's class tokens.
///
/// A wrapper without the `_Entity` marker is a fake entity: its readonly state comes from
/// `contenteditable` and its classes are left alone when written back.
pub const ENTITY_HANDLER: FormatHandler<EntityFormat> = FormatHandler {
    parse: |format, element, _, _| {
        let classes = class_list(element);
        let info = parse_entity_class(classes.iter().map(String::as_str));
        if info.is_entity {
            format.id = info.id;
            format.entity_type = info.entity_type;
            format.is_readonly = info.is_readonly;
        } else {
            format.is_fake_entity = Some(true);
            format.is_readonly = Some(!is_content_editable(element));
        }
    },
    apply: |format, element, _| {
        let is_readonly = format.is_readonly.unwrap_or(false);
        if format.is_fake_entity != Some(true) {
            let generated = generate_entity_class_names(
                format.id.as_deref(),
                format.entity_type.as_deref(),
                is_readonly,
            );
            let existing = get_attribute(element, "class").unwrap_or_default();
            set_attribute(
                element,
                "class",
                &merge_entity_class_names(&existing, &generated),
            );
        }
        if is_readonly {
            set_attribute(element, "contenteditable", "false");
        } else {
            remove_attribute(element, "contenteditable");
        }
    },
};
