//! Typed document mutations.
//!
//! `Field` replaces one top-level property wholesale. `NestedField` replaces
//! a single entry inside a nested record and leaves its siblings alone.
//! Applying either is total: a well-typed mutation cannot fail, and values
//! are stored exactly as given (no clamping).
//!
//! Bridges that speak in UI keys (`"padding"`, `"top"`) go through
//! [`Mutation::from_json`], the only fallible entry point.

use aura_core::model::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MutationError {
    #[error("unknown property `{0}`")]
    UnknownKey(String),
    #[error("property `{0}` cannot be changed")]
    ReadOnly(String),
    #[error("invalid value for `{path}`: {reason}")]
    InvalidValue { path: String, reason: String },
}

/// Replacement value for a top-level document property.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    ElementTag(ElementTag),
    TextContent(String),
    Link(String),
    Size(Size),
    Margin(Sides),
    Padding(Sides),
    Typography(Typography),
    Background(Background),
    Border(Border),
    Transforms(Transforms),
    Transforms3d(Transforms3d),
    Opacity(f64),
    Blur(f64),
    BackdropBlur(f64),
    TailwindClasses(String),
    Breakpoint(Breakpoint),
}

impl Field {
    pub fn apply(self, doc: &mut Document) {
        match self {
            Field::ElementTag(v) => doc.element_tag = v,
            Field::TextContent(v) => doc.text_content = v,
            Field::Link(v) => doc.link = v,
            Field::Size(v) => doc.size = v,
            Field::Margin(v) => doc.margin = v,
            Field::Padding(v) => doc.padding = v,
            Field::Typography(v) => doc.typography = v,
            Field::Background(v) => doc.background = v,
            Field::Border(v) => doc.border = v,
            Field::Transforms(v) => doc.transforms = v,
            Field::Transforms3d(v) => doc.transforms3d = v,
            Field::Opacity(v) => doc.opacity = v,
            Field::Blur(v) => doc.blur = v,
            Field::BackdropBlur(v) => doc.backdrop_blur = v,
            Field::TailwindClasses(v) => doc.tailwind_classes = v,
            Field::Breakpoint(v) => doc.breakpoint = v,
        }
    }
}

// ─── Nested keys ─────────────────────────────────────────────────────────

/// Declares a key enum over string fields of one record, with wire names
/// and a mutable slot accessor.
macro_rules! string_keys {
    ($name:ident for $record:ty { $($variant:ident => $field:ident : $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            pub fn slot(self, record: &mut $record) -> &mut String {
                match self {
                    $(Self::$variant => &mut record.$field),+
                }
            }

            pub fn get(self, record: &$record) -> &str {
                match self {
                    $(Self::$variant => &record.$field),+
                }
            }
        }
    };
}

/// Same as `string_keys!` for numeric records.
macro_rules! number_keys {
    ($name:ident for $record:ty { $($variant:ident => $field:ident : $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            pub fn slot(self, record: &mut $record) -> &mut f64 {
                match self {
                    $(Self::$variant => &mut record.$field),+
                }
            }
        }
    };
}

string_keys!(SizeKey for Size {
    Width => width: "width",
    Height => height: "height",
    MaxWidth => max_width: "maxWidth",
    MaxHeight => max_height: "maxHeight",
});

string_keys!(Side for Sides {
    Top => top: "top",
    Right => right: "right",
    Bottom => bottom: "bottom",
    Left => left: "left",
});

string_keys!(BorderKey for Border {
    Color => color: "color",
    Width => width: "width",
    Radius => radius: "radius",
});

number_keys!(TransformKey for Transforms {
    TranslateX => translate_x: "translateX",
    TranslateY => translate_y: "translateY",
    Rotate => rotate: "rotate",
    Scale => scale: "scale",
    SkewX => skew_x: "skewX",
    SkewY => skew_y: "skewY",
});

number_keys!(Transform3dKey for Transforms3d {
    RotateX => rotate_x: "rotateX",
    RotateY => rotate_y: "rotateY",
    RotateZ => rotate_z: "rotateZ",
    Perspective => perspective: "perspective",
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypographyField {
    FontFamily(String),
    FontSize(String),
    FontWeight(String),
    LetterSpacing(String),
    LineHeight(String),
    TextAlign(TextAlign),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundField {
    Kind(BackgroundType),
    Color(String),
    Gradient(Option<Gradient>),
}

/// Replacement value for one entry of a nested record.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedField {
    Size(SizeKey, String),
    Margin(Side, String),
    Padding(Side, String),
    Typography(TypographyField),
    Background(BackgroundField),
    Border(BorderKey, String),
    Transforms(TransformKey, f64),
    Transforms3d(Transform3dKey, f64),
}

impl NestedField {
    pub fn apply(self, doc: &mut Document) {
        match self {
            NestedField::Size(key, v) => *key.slot(&mut doc.size) = v,
            NestedField::Margin(side, v) => *side.slot(&mut doc.margin) = v,
            NestedField::Padding(side, v) => *side.slot(&mut doc.padding) = v,
            NestedField::Typography(f) => {
                let ty = &mut doc.typography;
                match f {
                    TypographyField::FontFamily(v) => ty.font_family = v,
                    TypographyField::FontSize(v) => ty.font_size = v,
                    TypographyField::FontWeight(v) => ty.font_weight = v,
                    TypographyField::LetterSpacing(v) => ty.letter_spacing = v,
                    TypographyField::LineHeight(v) => ty.line_height = v,
                    TypographyField::TextAlign(v) => ty.text_align = v,
                }
            }
            NestedField::Background(f) => match f {
                BackgroundField::Kind(v) => doc.background.kind = v,
                BackgroundField::Color(v) => doc.background.color = v,
                BackgroundField::Gradient(v) => doc.background.gradient = v,
            },
            NestedField::Border(key, v) => *key.slot(&mut doc.border) = v,
            NestedField::Transforms(key, v) => *key.slot(&mut doc.transforms) = v,
            NestedField::Transforms3d(key, v) => *key.slot(&mut doc.transforms3d) = v,
        }
    }
}

/// One recorded edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Set(Field),
    SetNested(NestedField),
}

impl From<Field> for Mutation {
    fn from(f: Field) -> Self {
        Mutation::Set(f)
    }
}

impl From<NestedField> for Mutation {
    fn from(f: NestedField) -> Self {
        Mutation::SetNested(f)
    }
}

impl Mutation {
    pub fn apply(self, doc: &mut Document) {
        match self {
            Mutation::Set(f) => f.apply(doc),
            Mutation::SetNested(f) => f.apply(doc),
        }
    }

    /// Decode a UI-keyed edit. `nested_key` selects an entry inside the
    /// record named by `key`; without it the whole property is replaced.
    pub fn from_json(key: &str, nested_key: Option<&str>, value: Value) -> Result<Self, MutationError> {
        match nested_key {
            None => top_level(key, value).map(Mutation::Set),
            Some(nested) => nested_field(key, nested, value).map(Mutation::SetNested),
        }
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, MutationError> {
    serde_json::from_value(value).map_err(|e| MutationError::InvalidValue {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

fn top_level(key: &str, value: Value) -> Result<Field, MutationError> {
    Ok(match key {
        "elementId" => return Err(MutationError::ReadOnly(key.to_string())),
        "elementTag" => Field::ElementTag(decode(key, value)?),
        "textContent" => Field::TextContent(decode(key, value)?),
        "link" => Field::Link(decode(key, value)?),
        "size" => Field::Size(decode(key, value)?),
        "margin" => Field::Margin(decode(key, value)?),
        "padding" => Field::Padding(decode(key, value)?),
        "typography" => Field::Typography(decode(key, value)?),
        "background" => Field::Background(decode(key, value)?),
        "border" => Field::Border(decode(key, value)?),
        "transforms" => Field::Transforms(decode(key, value)?),
        "transforms3d" => Field::Transforms3d(decode(key, value)?),
        "opacity" => Field::Opacity(decode(key, value)?),
        "blur" => Field::Blur(decode(key, value)?),
        "backdropBlur" => Field::BackdropBlur(decode(key, value)?),
        "tailwindClasses" => Field::TailwindClasses(decode(key, value)?),
        "breakpoint" => Field::Breakpoint(decode(key, value)?),
        _ => return Err(MutationError::UnknownKey(key.to_string())),
    })
}

fn nested_field(key: &str, nested: &str, value: Value) -> Result<NestedField, MutationError> {
    let path = format!("{key}.{nested}");
    let unknown = || MutationError::UnknownKey(path.clone());
    Ok(match key {
        "size" => NestedField::Size(SizeKey::from_name(nested).ok_or_else(unknown)?, decode(&path, value)?),
        "margin" => NestedField::Margin(Side::from_name(nested).ok_or_else(unknown)?, decode(&path, value)?),
        "padding" => NestedField::Padding(Side::from_name(nested).ok_or_else(unknown)?, decode(&path, value)?),
        "border" => NestedField::Border(BorderKey::from_name(nested).ok_or_else(unknown)?, decode(&path, value)?),
        "transforms" => NestedField::Transforms(
            TransformKey::from_name(nested).ok_or_else(unknown)?,
            decode(&path, value)?,
        ),
        "transforms3d" => NestedField::Transforms3d(
            Transform3dKey::from_name(nested).ok_or_else(unknown)?,
            decode(&path, value)?,
        ),
        "typography" => NestedField::Typography(match nested {
            "fontFamily" => TypographyField::FontFamily(decode(&path, value)?),
            "fontSize" => TypographyField::FontSize(decode(&path, value)?),
            "fontWeight" => TypographyField::FontWeight(decode(&path, value)?),
            "letterSpacing" => TypographyField::LetterSpacing(decode(&path, value)?),
            "lineHeight" => TypographyField::LineHeight(decode(&path, value)?),
            "textAlign" => TypographyField::TextAlign(decode(&path, value)?),
            _ => return Err(unknown()),
        }),
        "background" => NestedField::Background(match nested {
            "type" => BackgroundField::Kind(decode(&path, value)?),
            "color" => BackgroundField::Color(decode(&path, value)?),
            "gradient" => BackgroundField::Gradient(decode(&path, value)?),
            _ => return Err(unknown()),
        }),
        _ => return Err(MutationError::UnknownKey(key.to_string())),
    })
}

// ─── Generated designs ───────────────────────────────────────────────────

/// Expand a partial design into one mutation per present field, in the
/// order the inspector applies generated designs. Each mutation becomes
/// its own undo step.
///
/// Nested entries replace the current value outright. A generated
/// gradient carries only what the design names; omitted parts fall back
/// to their defaults.
pub fn mutations_for_design(design: &PartialDocument) -> Vec<Mutation> {
    let mut out: Vec<Mutation> = Vec::new();

    if let Some(tag) = design.element_tag {
        out.push(Field::ElementTag(tag).into());
    }
    if let Some(text) = design.text_content.as_ref().filter(|t| !t.is_empty()) {
        out.push(Field::TextContent(text.clone()).into());
    }
    if let Some(link) = &design.link {
        out.push(Field::Link(link.clone()).into());
    }
    if let Some(v) = design.opacity {
        out.push(Field::Opacity(v).into());
    }
    if let Some(v) = design.blur {
        out.push(Field::Blur(v).into());
    }
    if let Some(v) = design.backdrop_blur {
        out.push(Field::BackdropBlur(v).into());
    }

    if let Some(size) = &design.size {
        let entries = [
            (SizeKey::Width, &size.width),
            (SizeKey::Height, &size.height),
            (SizeKey::MaxWidth, &size.max_width),
            (SizeKey::MaxHeight, &size.max_height),
        ];
        for (key, v) in entries {
            if let Some(v) = v {
                out.push(NestedField::Size(key, v.clone()).into());
            }
        }
    }
    if let Some(p) = &design.padding {
        for (side, v) in sides(p) {
            out.push(NestedField::Padding(side, v).into());
        }
    }
    if let Some(m) = &design.margin {
        for (side, v) in sides(m) {
            out.push(NestedField::Margin(side, v).into());
        }
    }

    if let Some(ty) = &design.typography {
        let mut push = |f: TypographyField| out.push(NestedField::Typography(f).into());
        if let Some(v) = &ty.font_family {
            push(TypographyField::FontFamily(v.clone()));
        }
        if let Some(v) = &ty.font_size {
            push(TypographyField::FontSize(v.clone()));
        }
        if let Some(v) = &ty.font_weight {
            push(TypographyField::FontWeight(v.clone()));
        }
        if let Some(align) = ty.text_align {
            push(TypographyField::TextAlign(align));
        }
        if let Some(v) = &ty.line_height {
            push(TypographyField::LineHeight(v.clone()));
        }
        if let Some(v) = &ty.letter_spacing {
            push(TypographyField::LetterSpacing(v.clone()));
        }
    }

    if let Some(bg) = &design.background {
        if let Some(kind) = bg.kind {
            out.push(NestedField::Background(BackgroundField::Kind(kind)).into());
        }
        if let Some(color) = &bg.color {
            out.push(NestedField::Background(BackgroundField::Color(color.clone())).into());
        }
        if let Some(partial) = &bg.gradient {
            let mut gradient = Gradient::default();
            gradient.merge(partial);
            out.push(NestedField::Background(BackgroundField::Gradient(Some(gradient))).into());
        }
    }

    if let Some(border) = &design.border {
        let entries = [
            (BorderKey::Color, &border.color),
            (BorderKey::Width, &border.width),
            (BorderKey::Radius, &border.radius),
        ];
        for (key, v) in entries {
            if let Some(v) = v {
                out.push(NestedField::Border(key, v.clone()).into());
            }
        }
    }

    if let Some(t) = &design.transforms {
        let entries = [
            (TransformKey::TranslateX, t.translate_x),
            (TransformKey::TranslateY, t.translate_y),
            (TransformKey::Rotate, t.rotate),
            (TransformKey::Scale, t.scale),
            (TransformKey::SkewX, t.skew_x),
            (TransformKey::SkewY, t.skew_y),
        ];
        for (key, v) in entries {
            if let Some(v) = v {
                out.push(NestedField::Transforms(key, v).into());
            }
        }
    }
    if let Some(t) = &design.transforms3d {
        let entries = [
            (Transform3dKey::RotateX, t.rotate_x),
            (Transform3dKey::RotateY, t.rotate_y),
            (Transform3dKey::RotateZ, t.rotate_z),
            (Transform3dKey::Perspective, t.perspective),
        ];
        for (key, v) in entries {
            if let Some(v) = v {
                out.push(NestedField::Transforms3d(key, v).into());
            }
        }
    }

    if let Some(classes) = &design.tailwind_classes {
        out.push(Field::TailwindClasses(classes.clone()).into());
    }
    if let Some(bp) = design.breakpoint {
        out.push(Field::Breakpoint(bp).into());
    }

    out
}

fn sides(p: &PartialSides) -> impl Iterator<Item = (Side, String)> + '_ {
    [
        (Side::Top, &p.top),
        (Side::Right, &p.right),
        (Side::Bottom, &p.bottom),
        (Side::Left, &p.left),
    ]
    .into_iter()
    .filter_map(|(side, v)| v.clone().map(|v| (side, v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_field_leaves_siblings() {
        let mut doc = Document::default();
        NestedField::Padding(Side::Top, "4".into()).apply(&mut doc);
        assert_eq!(doc.padding.top, "4");
        assert_eq!(doc.padding.right, "2");
        assert_eq!(doc.padding.bottom, "3");
        assert_eq!(doc.padding.left, "2");
    }

    #[test]
    fn values_are_not_clamped() {
        let mut doc = Document::default();
        NestedField::Transforms(TransformKey::Scale, 500.0).apply(&mut doc);
        Field::Opacity(-20.0).apply(&mut doc);
        assert_eq!(doc.transforms.scale, 500.0);
        assert_eq!(doc.opacity, -20.0);
    }

    #[test]
    fn from_json_top_level() {
        let m = Mutation::from_json("elementTag", None, json!("section")).unwrap();
        assert_eq!(m, Mutation::Set(Field::ElementTag(ElementTag::Section)));

        let m = Mutation::from_json("breakpoint", None, json!("2xl")).unwrap();
        assert_eq!(m, Mutation::Set(Field::Breakpoint(Breakpoint::Xl2)));
    }

    #[test]
    fn from_json_nested() {
        let m = Mutation::from_json("transforms", Some("rotate"), json!(45)).unwrap();
        assert_eq!(
            m,
            Mutation::SetNested(NestedField::Transforms(TransformKey::Rotate, 45.0))
        );

        let m = Mutation::from_json("background", Some("gradient"), json!(null)).unwrap();
        assert_eq!(
            m,
            Mutation::SetNested(NestedField::Background(BackgroundField::Gradient(None)))
        );

        let m = Mutation::from_json("size", Some("maxWidth"), json!("640")).unwrap();
        assert_eq!(
            m,
            Mutation::SetNested(NestedField::Size(SizeKey::MaxWidth, "640".into()))
        );
    }

    #[test]
    fn from_json_rejects_bad_input() {
        assert_eq!(
            Mutation::from_json("shadow", None, json!("lg")),
            Err(MutationError::UnknownKey("shadow".into()))
        );
        assert_eq!(
            Mutation::from_json("padding", Some("inline"), json!("4")),
            Err(MutationError::UnknownKey("padding.inline".into()))
        );
        assert_eq!(
            Mutation::from_json("elementId", None, json!("other")),
            Err(MutationError::ReadOnly("elementId".into()))
        );
        assert!(matches!(
            Mutation::from_json("opacity", None, json!("half")),
            Err(MutationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn design_expands_in_apply_order() {
        let design = PartialDocument::from_json(
            r##"{
                "transforms": {"rotate": 15},
                "padding": {"top": "4", "left": "6"},
                "elementTag": "button",
                "opacity": 90
            }"##,
        )
        .unwrap();
        let muts = mutations_for_design(&design);
        assert_eq!(
            muts,
            vec![
                Mutation::Set(Field::ElementTag(ElementTag::Button)),
                Mutation::Set(Field::Opacity(90.0)),
                Mutation::SetNested(NestedField::Padding(Side::Top, "4".into())),
                Mutation::SetNested(NestedField::Padding(Side::Left, "6".into())),
                Mutation::SetNested(NestedField::Transforms(TransformKey::Rotate, 15.0)),
            ]
        );
    }

    #[test]
    fn design_skips_empty_text_and_ignores_element_id() {
        let design =
            PartialDocument::from_json(r#"{"textContent":"","elementId":"other"}"#).unwrap();
        assert!(mutations_for_design(&design).is_empty());
    }

    #[test]
    fn design_gradient_replaces_current() {
        let design =
            PartialDocument::from_json(r##"{"background":{"gradient":{"to":"#ffffff"}}}"##).unwrap();
        assert_eq!(
            mutations_for_design(&design),
            vec![Mutation::SetNested(NestedField::Background(
                BackgroundField::Gradient(Some(Gradient {
                    from: String::new(),
                    to: "#ffffff".into(),
                    angle: None,
                    shape: None,
                }))
            ))]
        );
    }

    #[test]
    fn key_names_roundtrip() {
        for key in TransformKey::ALL {
            assert_eq!(TransformKey::from_name(key.name()), Some(*key));
        }
        for key in SizeKey::ALL {
            assert_eq!(SizeKey::from_name(key.name()), Some(*key));
        }
        assert_eq!(Side::Left.get(&Document::default().padding), "2");
    }
}
