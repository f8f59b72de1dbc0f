//! Emitter: Document → utility classes and HTML markup.
//!
//! Both projections are pure functions of the document. Nothing is cached,
//! so callers recompute on every change.

use crate::model::*;
use smallvec::SmallVec;
use std::fmt::Write;

/// Ordered, de-duplicating token buffer with the breakpoint prefix baked in.
struct ClassList {
    prefix: Option<&'static str>,
    tokens: SmallVec<[String; 24]>,
}

impl ClassList {
    fn new(breakpoint: Breakpoint) -> Self {
        Self {
            prefix: breakpoint.prefix(),
            tokens: SmallVec::new(),
        }
    }

    fn push(&mut self, token: impl AsRef<str>) {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return;
        }
        let token = match self.prefix {
            Some(bp) => format!("{bp}:{token}"),
            None => token.to_string(),
        };
        if !self.tokens.contains(&token) {
            self.tokens.push(token);
        }
    }

    /// Push `{name}-{value}` when `value` is set.
    fn push_scale(&mut self, name: &str, value: &str) {
        if !value.is_empty() {
            self.push(format!("{name}-{value}"));
        }
    }

    /// Push `{name}-[{value}{unit}]` when `value` is set.
    fn push_arbitrary(&mut self, name: &str, value: &str, unit: &str) {
        if !value.is_empty() {
            self.push(format!("{name}-[{value}{unit}]"));
        }
    }

    fn finish(self) -> String {
        self.tokens.join(" ")
    }
}

/// Render the document as a space-separated utility-class string.
///
/// Group order is fixed: padding, margin, size, typography, 2D transforms,
/// 3D transforms, effects, background, border. A property is skipped while
/// it is unset (empty string) or at its identity value.
#[must_use]
pub fn emit_classes(doc: &Document) -> String {
    let mut out = ClassList::new(doc.breakpoint);

    emit_sides(&mut out, "p", &doc.padding);
    emit_sides(&mut out, "m", &doc.margin);

    out.push_arbitrary("w", &doc.size.width, "px");
    out.push_arbitrary("h", &doc.size.height, "px");
    out.push_arbitrary("max-w", &doc.size.max_width, "px");
    out.push_arbitrary("max-h", &doc.size.max_height, "px");

    let ty = &doc.typography;
    out.push_arbitrary("text", &ty.font_size, "px");
    out.push_scale("font", &ty.font_weight);
    out.push_scale("tracking", &ty.letter_spacing);
    out.push_scale("leading", &ty.line_height);
    out.push_scale("text", ty.text_align.as_str());

    emit_transforms(&mut out, &doc.transforms);
    emit_transforms3d(&mut out, &doc.transforms3d);

    if doc.opacity != OPACITY_IDENTITY {
        out.push(format!("opacity-[{:.2}]", doc.opacity / 100.0));
    }
    if doc.blur > 0.0 {
        out.push(format!("blur-[{}px]", format_num(doc.blur)));
    }
    if doc.backdrop_blur > 0.0 {
        out.push(format!("backdrop-blur-[{}px]", format_num(doc.backdrop_blur)));
    }

    emit_background(&mut out, &doc.background);

    let border = &doc.border;
    out.push_arbitrary("border", &border.color, "");
    out.push_arbitrary("border", &border.width, "px");
    out.push_arbitrary("rounded", &border.radius, "px");

    out.finish()
}

fn emit_sides(out: &mut ClassList, name: &str, sides: &Sides) {
    out.push_scale(&format!("{name}t"), &sides.top);
    out.push_scale(&format!("{name}r"), &sides.right);
    out.push_scale(&format!("{name}b"), &sides.bottom);
    out.push_scale(&format!("{name}l"), &sides.left);
}

fn emit_transforms(out: &mut ClassList, t: &Transforms) {
    if t.translate_x != 0.0 {
        out.push(format!("translate-x-[{}px]", format_num(t.translate_x)));
    }
    if t.translate_y != 0.0 {
        out.push(format!("translate-y-[{}px]", format_num(t.translate_y)));
    }
    if t.rotate != 0.0 {
        out.push(format!("rotate-[{}deg]", format_num(t.rotate)));
    }
    if t.scale != SCALE_IDENTITY {
        out.push(format!("scale-[{:.2}]", t.scale / 100.0));
    }
    if t.skew_x != 0.0 {
        out.push(format!("skew-x-[{}deg]", format_num(t.skew_x)));
    }
    if t.skew_y != 0.0 {
        out.push(format!("skew-y-[{}deg]", format_num(t.skew_y)));
    }
}

fn emit_transforms3d(out: &mut ClassList, t: &Transforms3d) {
    for (axis, deg) in [("X", t.rotate_x), ("Y", t.rotate_y), ("Z", t.rotate_z)] {
        if deg != 0.0 {
            out.push(format!("[transform:rotate{axis}({}deg)]", format_num(deg)));
        }
    }
    if t.perspective != 0.0 {
        out.push(format!(
            "[perspective:{}px]",
            format_num(t.perspective * 100.0)
        ));
    }
}

fn emit_background(out: &mut ClassList, bg: &Background) {
    match (bg.kind, &bg.gradient) {
        (BackgroundType::Solid, _) => out.push_arbitrary("bg", &bg.color, ""),
        (BackgroundType::Linear, Some(g)) => {
            let angle = g.angle.unwrap_or(90.0);
            out.push("bg-gradient-to-r");
            out.push(format!(
                "[background:linear-gradient({}deg,{},{})]",
                format_num(angle),
                g.from,
                g.to
            ));
        }
        (BackgroundType::Radial, Some(g)) => {
            let shape = g.shape.unwrap_or_default();
            out.push(format!(
                "[background:radial-gradient({},{},{})]",
                shape.as_str(),
                g.from,
                g.to
            ));
        }
        (BackgroundType::Linear | BackgroundType::Radial, None) => {}
    }
}

/// Render the element as indented HTML, wrapped in an anchor when the
/// document carries a link.
#[must_use]
pub fn emit_markup(doc: &Document, classes: &str) -> String {
    let tag = doc.element_tag.as_str();
    let content = if doc.text_content.is_empty() {
        "Content"
    } else {
        doc.text_content.as_str()
    };
    let classes = classes.trim();

    let mut out = String::with_capacity(128);
    if doc.link.is_empty() {
        let _ = write!(out, "<{tag} class=\"{classes}\">\n  {content}\n</{tag}>");
    } else {
        let _ = write!(
            out,
            "<a href=\"{}\" class=\"inline-block\">\n  <{tag} class=\"{classes}\">\n    {content}\n  </{tag}>\n</a>",
            doc.link
        );
    }
    out
}

/// Shortest decimal form: `10`, `1.5`, `-45`.
fn format_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
