//! Design document model for the Aura inspector.
//!
//! A `Document` holds every editable property of the single element being
//! designed: content, box model, typography, background, border, 2D/3D
//! transforms, and effects. It is plain data with no behavior beyond
//! defaults and merging.
//!
//! `PartialDocument` mirrors the same shape with every field optional. It is
//! what a stored snapshot decodes into and what the design generator
//! returns. `Document::merge` is the one place a partial is folded onto a
//! full document, field by field, including inside nested records.

use crate::id::ElementId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Element ID of a fresh session.
pub const DEFAULT_ELEMENT_ID: &str = "aura-emgn5hp8g9knbc3d";

/// Raw utility-class override carried by the default document.
pub const DEFAULT_TAILWIND_CLASSES: &str =
    "px-2 pb-3 text-[18px] md:text-[20px] font-semibold tracking-tight";

/// Identity value of `transforms.scale` (percent).
pub const SCALE_IDENTITY: f64 = 100.0;

/// Identity value of `opacity` (percent).
pub const OPACITY_IDENTITY: f64 = 100.0;

/// Copy each present `Option` field of `$src` into the same field of `$dst`.
macro_rules! merge_fields {
    ($dst:ident, $src:ident; $($field:ident),+ $(,)?) => {
        $(
            if let Some(v) = &$src.$field {
                $dst.$field = ToOwned::to_owned(v);
            }
        )+
    };
}

// ─── Enumerations ────────────────────────────────────────────────────────

/// Semantic HTML tag of the inspected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementTag {
    Div,
    Section,
    Article,
    Header,
    Footer,
    Nav,
    H1,
    #[default]
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    Span,
    Button,
    A,
    Ul,
    Ol,
    Li,
}

impl ElementTag {
    pub const ALL: [ElementTag; 19] = [
        Self::Div,
        Self::Section,
        Self::Article,
        Self::Header,
        Self::Footer,
        Self::Nav,
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::H5,
        Self::H6,
        Self::P,
        Self::Span,
        Self::Button,
        Self::A,
        Self::Ul,
        Self::Ol,
        Self::Li,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Section => "section",
            Self::Article => "article",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Nav => "nav",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::P => "p",
            Self::Span => "span",
            Self::Button => "button",
            Self::A => "a",
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Li => "li",
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// Background discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Solid,
    Linear,
    Radial,
}

/// Radial gradient shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientShape {
    #[default]
    Circle,
    Ellipse,
}

impl GradientShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
        }
    }
}

/// Responsive breakpoint tier. `Auto` and `Base` emit no prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Breakpoint {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xl2,
}

impl Breakpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Base => "base",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xl2 => "2xl",
        }
    }

    /// The class prefix without the trailing colon, if this tier has one.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Auto | Self::Base => None,
            other => Some(other.as_str()),
        }
    }
}

// ─── Nested records ──────────────────────────────────────────────────────

/// Dimensions. Empty string = unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub width: String,
    pub height: String,
    pub max_width: String,
    pub max_height: String,
}

/// Four independent side values, used for both margin and padding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sides {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

/// Typography tokens. All but `text_align` are symbolic scale names or
/// bare numbers, not raw CSS values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub font_size: String,
    pub font_weight: String,
    pub letter_spacing: String,
    pub line_height: String,
    pub text_align: TextAlign,
}

/// Two-stop gradient. `angle` applies to linear, `shape` to radial.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Gradient {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<GradientShape>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Background {
    #[serde(rename = "type")]
    pub kind: BackgroundType,
    /// Solid color, also kept as a fallback in gradient modes.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Border {
    pub color: String,
    pub width: String,
    pub radius: String,
}

/// 2D transforms. Pixels for translate, degrees for rotate/skew,
/// percent for scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transforms {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate: f64,
    pub scale: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

impl Default for Transforms {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            rotate: 0.0,
            scale: SCALE_IDENTITY,
            skew_x: 0.0,
            skew_y: 0.0,
        }
    }
}

/// 3D transforms. Degrees for rotations; `perspective` is scaled ×100
/// when emitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transforms3d {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub perspective: f64,
}

// ─── Document ────────────────────────────────────────────────────────────

/// The complete design state of one element at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub element_id: ElementId,
    pub element_tag: ElementTag,
    pub text_content: String,
    /// Empty = no link wrapper.
    pub link: String,

    pub size: Size,
    pub margin: Sides,
    pub padding: Sides,
    pub typography: Typography,
    pub background: Background,
    pub border: Border,
    pub transforms: Transforms,
    pub transforms3d: Transforms3d,

    /// Percent, identity 100.
    pub opacity: f64,
    /// Pixels.
    pub blur: f64,
    /// Pixels.
    pub backdrop_blur: f64,

    /// Raw class override. When non-empty it replaces the generated
    /// classes in the markup output.
    pub tailwind_classes: String,
    pub breakpoint: Breakpoint,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            element_id: ElementId::intern(DEFAULT_ELEMENT_ID),
            element_tag: ElementTag::H2,
            text_content: "Layers".into(),
            link: String::new(),
            size: Size::default(),
            margin: Sides::default(),
            padding: Sides {
                top: String::new(),
                right: "2".into(),
                bottom: "3".into(),
                left: "2".into(),
            },
            typography: Typography {
                font_family: "inter".into(),
                font_size: "18".into(),
                font_weight: "semibold".into(),
                letter_spacing: "tight".into(),
                line_height: "normal".into(),
                text_align: TextAlign::Left,
            },
            background: Background::default(),
            border: Border::default(),
            transforms: Transforms::default(),
            transforms3d: Transforms3d::default(),
            opacity: OPACITY_IDENTITY,
            blur: 0.0,
            backdrop_blur: 0.0,
            tailwind_classes: DEFAULT_TAILWIND_CLASSES.into(),
            breakpoint: Breakpoint::Auto,
        }
    }
}

impl Document {
    /// Restore a stored snapshot: decode `json` as a partial document and
    /// overlay it on the defaults. Undecodable input yields the defaults.
    pub fn merge_stored(json: &str) -> Self {
        match PartialDocument::from_json(json) {
            Ok(partial) => Self::default().merged(&partial),
            Err(e) => {
                log::warn!("discarding malformed stored document: {e}");
                Self::default()
            }
        }
    }

    /// Fold every present field of `partial` onto `self`.
    pub fn merge(&mut self, partial: &PartialDocument) {
        merge_fields!(self, partial;
            element_id, element_tag, text_content, link,
            opacity, blur, backdrop_blur, tailwind_classes, breakpoint,
        );
        if let Some(p) = &partial.size {
            self.size.merge(p);
        }
        if let Some(p) = &partial.margin {
            self.margin.merge(p);
        }
        if let Some(p) = &partial.padding {
            self.padding.merge(p);
        }
        if let Some(p) = &partial.typography {
            self.typography.merge(p);
        }
        if let Some(p) = &partial.background {
            self.background.merge(p);
        }
        if let Some(p) = &partial.border {
            self.border.merge(p);
        }
        if let Some(p) = &partial.transforms {
            self.transforms.merge(p);
        }
        if let Some(p) = &partial.transforms3d {
            self.transforms3d.merge(p);
        }
    }

    #[must_use]
    pub fn merged(mut self, partial: &PartialDocument) -> Self {
        self.merge(partial);
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ─── Partial shapes ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialSize {
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialSides {
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTypography {
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialGradient {
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub shape: Option<GradientShape>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialBackground {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "value",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<BackgroundType>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub gradient: Option<PartialGradient>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialBorder {
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTransforms {
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTransforms3d {
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub rotate_x: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub rotate_y: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub rotate_z: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub perspective: Option<f64>,
}

/// A `Document` with every field optional.
///
/// Decoding is forgiving: unknown keys are ignored, and a field whose value
/// has the wrong shape (an unknown tag, a string where a record belongs) is
/// read as absent rather than failing the whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialDocument {
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub element_id: Option<ElementId>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub element_tag: Option<ElementTag>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub size: Option<PartialSize>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub margin: Option<PartialSides>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub padding: Option<PartialSides>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub typography: Option<PartialTypography>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub background: Option<PartialBackground>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub border: Option<PartialBorder>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub transforms: Option<PartialTransforms>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub transforms3d: Option<PartialTransforms3d>,

    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub backdrop_blur: Option<f64>,

    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub tailwind_classes: Option<String>,
    #[serde(default, deserialize_with = "value", skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<Breakpoint>,
}

impl PartialDocument {
    /// Decode from JSON text. Fails only when the text is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Size {
    pub fn merge(&mut self, p: &PartialSize) {
        merge_fields!(self, p; width, height, max_width, max_height);
    }
}

impl Sides {
    pub fn merge(&mut self, p: &PartialSides) {
        merge_fields!(self, p; top, right, bottom, left);
    }
}

impl Typography {
    pub fn merge(&mut self, p: &PartialTypography) {
        merge_fields!(self, p;
            font_family, font_size, font_weight, letter_spacing, line_height, text_align,
        );
    }
}

impl Gradient {
    pub fn merge(&mut self, p: &PartialGradient) {
        merge_fields!(self, p; from, to);
        if p.angle.is_some() {
            self.angle = p.angle;
        }
        if p.shape.is_some() {
            self.shape = p.shape;
        }
    }
}

impl Background {
    pub fn merge(&mut self, p: &PartialBackground) {
        merge_fields!(self, p; kind, color);
        if let Some(g) = &p.gradient {
            self.gradient.get_or_insert_with(Gradient::default).merge(g);
        }
    }
}

impl Border {
    pub fn merge(&mut self, p: &PartialBorder) {
        merge_fields!(self, p; color, width, radius);
    }
}

impl Transforms {
    pub fn merge(&mut self, p: &PartialTransforms) {
        merge_fields!(self, p; translate_x, translate_y, rotate, scale, skew_x, skew_y);
    }
}

impl Transforms3d {
    pub fn merge(&mut self, p: &PartialTransforms3d) {
        merge_fields!(self, p; rotate_x, rotate_y, rotate_z, perspective);
    }
}

// ─── Forgiving field decoders ────────────────────────────────────────────

/// Decode any `T`, treating a mismatched value as absent.
fn value<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(de)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

/// Decode a string field; bare numbers are accepted as their decimal text.
fn text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(de)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Decode a numeric field; numeric strings are accepted.
fn number<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(de)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
