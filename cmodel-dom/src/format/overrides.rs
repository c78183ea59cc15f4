//! Per category parser/applier lists and the override maps they are resolved from.
//!
//! The default list of a category is its key list (see [`keys`](super::keys)). An override map
//! replaces the handler of individual keys in place, or removes a key with `None`. Additional
//! parsers and appliers are appended after the defaults, in the order given. Overrides for keys
//! a category does not list are ignored.

use super::categories::*;
use super::keys;
use super::slices::{DatasetFormat, EntityFormat};
use super::{FormatApplier, FormatKey, FormatParser, FormatSlots};
use std::collections::BTreeMap;

/// One resolved step of a category's parse pass.
pub enum CategoryParser<F: 'static> {
    /// The default handler of this key from the handler map.
    Key(FormatKey),
    /// A caller supplied replacement for this key.
    Override(FormatKey, FormatParser<F>),
    /// A caller supplied parser appended after the defaults.
    Additional(String, FormatParser<F>),
}

/// One resolved step of a category's apply pass.
pub enum CategoryApplier<F: 'static> {
    Key(FormatKey),
    Override(FormatKey, FormatApplier<F>),
    Additional(String, FormatApplier<F>),
}

impl<F: FormatSlots> CategoryParser<F> {
    pub fn label(&self) -> String {
        match self {
            CategoryParser::Key(key) | CategoryParser::Override(key, _) => key.to_string(),
            CategoryParser::Additional(name, _) => name.clone(),
        }
    }
}

impl<F: FormatSlots> CategoryApplier<F> {
    pub fn label(&self) -> String {
        match self {
            CategoryApplier::Key(key) | CategoryApplier::Override(key, _) => key.to_string(),
            CategoryApplier::Additional(name, _) => name.clone(),
        }
    }
}

fn build_parsers<F: FormatSlots>(
    category: &str,
    keys: &[FormatKey],
    overrides: &BTreeMap<FormatKey, Option<FormatParser<F>>>,
    additional: &[(String, FormatParser<F>)],
) -> Vec<CategoryParser<F>> {
    for key in overrides.keys().filter(|key| !keys.contains(key)) {
        tracing::debug!(category, key = %key, "ignoring parser override for unlisted key");
    }
    keys.iter()
        .copied()
        .filter(|key| F::has_key(*key))
        .filter_map(|key| match overrides.get(&key) {
            None => Some(CategoryParser::Key(key)),
            Some(None) => None,
            Some(Some(parse)) => Some(CategoryParser::Override(key, *parse)),
        })
        .chain(
            additional
                .iter()
                .map(|(name, parse)| CategoryParser::Additional(name.clone(), *parse)),
        )
        .collect()
}

fn build_appliers<F: FormatSlots>(
    category: &str,
    keys: &[FormatKey],
    overrides: &BTreeMap<FormatKey, Option<FormatApplier<F>>>,
    additional: &[(String, FormatApplier<F>)],
) -> Vec<CategoryApplier<F>> {
    for key in overrides.keys().filter(|key| !keys.contains(key)) {
        tracing::debug!(category, key = %key, "ignoring applier override for unlisted key");
    }
    keys.iter()
        .copied()
        .filter(|key| F::has_key(*key))
        .filter_map(|key| match overrides.get(&key) {
            None => Some(CategoryApplier::Key(key)),
            Some(None) => None,
            Some(Some(apply)) => Some(CategoryApplier::Override(key, *apply)),
        })
        .chain(
            additional
                .iter()
                .map(|(name, apply)| CategoryApplier::Additional(name.clone(), *apply)),
        )
        .collect()
}

macro_rules! category_table {
    ($($field:ident: $format:ty = $keys:path => $name:literal),* $(,)?) => {
        /// Key based parser replacements, per category. `None` disables the key.
        #[derive(Default)]
        pub struct FormatParserOverride {
            $(pub $field: BTreeMap<FormatKey, Option<FormatParser<$format>>>,)*
        }

        /// Key based applier replacements, per category. `None` disables the key.
        #[derive(Default)]
        pub struct FormatApplierOverride {
            $(pub $field: BTreeMap<FormatKey, Option<FormatApplier<$format>>>,)*
        }

        /// Named parsers appended after a category's defaults.
        #[derive(Default)]
        pub struct AdditionalFormatParsers {
            $(pub $field: Vec<(String, FormatParser<$format>)>,)*
        }

        /// Named appliers appended after a category's defaults.
        #[derive(Default)]
        pub struct AdditionalFormatAppliers {
            $(pub $field: Vec<(String, FormatApplier<$format>)>,)*
        }

        /// Resolved parse passes, per category.
        pub struct FormatParsers {
            $(pub $field: Vec<CategoryParser<$format>>,)*
        }

        /// Resolved apply passes, per category.
        pub struct FormatAppliers {
            $(pub $field: Vec<CategoryApplier<$format>>,)*
        }

        impl FormatParsers {
            pub fn build(
                overrides: &FormatParserOverride,
                additional: &AdditionalFormatParsers,
            ) -> Self {
                FormatParsers {
                    $($field: build_parsers($name, &$keys, &overrides.$field, &additional.$field),)*
                }
            }
        }

        impl Default for FormatParsers {
            fn default() -> Self {
                Self::build(&FormatParserOverride::default(), &AdditionalFormatParsers::default())
            }
        }

        impl FormatAppliers {
            pub fn build(
                overrides: &FormatApplierOverride,
                additional: &AdditionalFormatAppliers,
            ) -> Self {
                FormatAppliers {
                    $($field: build_appliers($name, &$keys, &overrides.$field, &additional.$field),)*
                }
            }
        }

        impl Default for FormatAppliers {
            fn default() -> Self {
                Self::build(&FormatApplierOverride::default(), &AdditionalFormatAppliers::default())
            }
        }

        /// Every category with its ordered default keys.
        pub fn category_keys() -> Vec<(&'static str, &'static [FormatKey])> {
            vec![$(($name, &$keys[..]),)*]
        }
    };
}

category_table! {
    block: BlockFormat = keys::BLOCK => "block",
    container: ContainerFormat = keys::CONTAINER => "container",
    divider: DividerFormat = keys::DIVIDER => "divider",
    list_item_element: ListItemFormat = keys::LIST_ITEM_ELEMENT => "listItemElement",
    list_level: ListLevelFormat = keys::LIST_LEVEL => "listLevel",
    segment: SegmentFormat = keys::SEGMENT => "segment",
    segment_on_block: SegmentFormat = keys::SEGMENT_ON_BLOCK => "segmentOnBlock",
    segment_on_table_cell: SegmentFormat = keys::SEGMENT_ON_TABLE_CELL => "segmentOnTableCell",
    table: TableFormat = keys::TABLE => "table",
    table_row: TableRowFormat = keys::TABLE_ROW => "tableRow",
    table_cell: TableCellFormat = keys::TABLE_CELL => "tableCell",
    table_column: TableColumnFormat = keys::TABLE_COLUMN => "tableColumn",
    image: ImageFormat = keys::IMAGE => "image",
    link: HyperLinkFormat = keys::LINK => "link",
    dataset: DatasetFormat = keys::DATASET => "dataset",
    entity: EntityFormat = keys::ENTITY => "entity",
    code: CodeFormat = keys::CODE => "code",
}
