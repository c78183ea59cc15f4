//! Content Model node types.

use crate::format::*;
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Root of a content model tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub blocks: Vec<Block>,
    /// Default segment format the document was converted with.
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub format: SegmentFormat,
}

/// A block level node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockType")]
pub enum Block {
    Paragraph(Paragraph),
    ListItem(ListItem),
    Table(Table),
    Divider(Divider),
    FormatContainer(FormatContainer),
    Entity(Entity),
}

/// A run of segments laid out as one paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub segments: Vec<Segment>,
    #[serde(default, skip_serializing_if = "BlockFormat::is_empty")]
    pub format: BlockFormat,
    /// Character format applied on the paragraph element itself.
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub segment_format: SegmentFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorator: Option<ParagraphDecorator>,
    /// Created for loose inline content; has no element of its own.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_implicit: bool,
}

impl Paragraph {
    pub fn new(format: BlockFormat, is_implicit: bool) -> Self {
        Paragraph {
            format,
            is_implicit,
            ..Paragraph::default()
        }
    }
}

/// Tag (`p`, `h1`..`h6`) a paragraph is wrapped in, with the format that tag implies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphDecorator {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub format: SegmentFormat,
}

/// An inline node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "segmentType")]
pub enum Segment {
    Text(Text),
    Br(Br),
    Image(Image),
    Entity(Entity),
}

impl Segment {
    pub fn format(&self) -> &SegmentFormat {
        match self {
            Segment::Text(text) => &text.format,
            Segment::Br(br) => &br.format,
            Segment::Image(image) => &image.segment_format,
            Segment::Entity(entity) => &entity.segment_format,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: String,
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub format: SegmentFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

impl Text {
    pub fn new(text: impl Into<String>, format: SegmentFormat) -> Self {
        Text {
            text: text.into(),
            format,
            ..Text::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Br {
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub format: SegmentFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "ImageFormat::is_empty")]
    pub format: ImageFormat,
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub segment_format: SegmentFormat,
    #[serde(default, skip_serializing_if = "DatasetFormat::is_empty")]
    pub dataset: DatasetFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

/// Hyperlink decoration of a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub format: HyperLinkFormat,
    #[serde(default, skip_serializing_if = "DatasetFormat::is_empty")]
    pub dataset: DatasetFormat,
}

/// Inline code decoration of a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Code {
    #[serde(default, skip_serializing_if = "CodeFormat::is_empty")]
    pub format: CodeFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ListType {
    Ol,
    Ul,
}

impl ListType {
    pub fn tag_name(&self) -> &'static str {
        match self {
            ListType::Ol => "ol",
            ListType::Ul => "ul",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ListType> {
        match tag {
            "ol" => Some(ListType::Ol),
            "ul" => Some(ListType::Ul),
            _ => None,
        }
    }
}

/// One level of list nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLevel {
    pub list_type: ListType,
    #[serde(default, skip_serializing_if = "ListLevelFormat::is_empty")]
    pub format: ListLevelFormat,
    #[serde(default, skip_serializing_if = "DatasetFormat::is_empty")]
    pub dataset: DatasetFormat,
}

/// A list item together with every list level it is nested in, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub levels: Vec<ListLevel>,
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "ListItemFormat::is_empty")]
    pub format: ListItemFormat,
    /// Character format of the list marker.
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub format_holder: SegmentFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub rows: Vec<TableRow>,
    /// Column widths in px, from `colgroup` when present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub widths: Vec<f64>,
    #[serde(default, skip_serializing_if = "TableFormat::is_empty")]
    pub format: TableFormat,
    #[serde(default, skip_serializing_if = "DatasetFormat::is_empty")]
    pub dataset: DatasetFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "TableRowFormat::is_empty")]
    pub format: TableRowFormat,
    pub cells: Vec<TableCell>,
}

/// A grid cell. Cells covered by a `colspan`/`rowspan` are kept as placeholders flagged with
/// `span_left`/`span_above`, so every row has the same number of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_header: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub span_left: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub span_above: bool,
    #[serde(default, skip_serializing_if = "TableCellFormat::is_empty")]
    pub format: TableCellFormat,
    #[serde(default, skip_serializing_if = "DatasetFormat::is_empty")]
    pub dataset: DatasetFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Divider {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "DividerFormat::is_empty")]
    pub format: DividerFormat,
}

/// A block element (`blockquote`, `pre`, styled `div`) kept around its child blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatContainer {
    pub tag_name: String,
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "ContainerFormat::is_empty")]
    pub format: ContainerFormat,
}

/// An embedded widget, kept as raw HTML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default, skip_serializing_if = "EntityFormat::is_empty")]
    pub format: EntityFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_block: bool,
    /// Inner HTML of the wrapper element.
    pub html: String,
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub segment_format: SegmentFormat,
}
