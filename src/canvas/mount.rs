//! The live container a stroke SVG is mounted into.
//!
//! [`Canvas::from_markup`] is the only point raw markup crosses into the animation core.
//! The resulting [`Canvas`] keeps the document-ordered strokes, labels and gradients plus
//! their current presentation, and implements [`StrokeSurface`] for the driver.

use std::collections::BTreeMap;

use crate::canvas::geometry::{parse_path_data, path_bounds, path_length};
use crate::canvas::surface::{StrokeSurface, StrokeTransition};
use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::error::{HitsujunError, HitsujunResult};
use crate::source::svg::extract_svg_element;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const KANJIVG_NS: &str = "http://kanjivg.tagaini.net";

// Subtrees whose paths are never painted directly.
const NON_RENDERED: [&str; 6] = ["defs", "clipPath", "mask", "marker", "pattern", "symbol"];

/// Presentation of one stroke, the equivalent of its inline dash styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct StrokeStyle {
    /// Dash pattern length; `None` until the driver first touches the stroke.
    pub dash_array: Option<f64>,
    /// Dash offset; `None` until the driver first touches the stroke.
    pub dash_offset: Option<f64>,
    /// Declared transition, if any.
    pub transition: Option<StrokeTransition>,
}

/// A `<path>` stroke in draw order.
#[derive(Clone, Debug)]
pub struct StrokeElement {
    /// `id` attribute, if present.
    pub id: Option<String>,
    /// Parsed geometry; empty when the `d` attribute was missing or malformed.
    pub path: BezPath,
    /// Arc length of `path`.
    pub length: f64,
    /// Tight bounds of `path`.
    pub bounds: Option<Rect>,
    /// Id of the gradient referenced through `stroke="url(#id)"`.
    pub gradient: Option<String>,
    /// Current presentation.
    pub style: StrokeStyle,
}

/// A `<text>` stroke-order label.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LabelElement {
    /// Text content, usually the stroke number.
    pub text: String,
    /// Lit (full opacity) once its stroke has started.
    pub lit: bool,
    /// `display` on/off.
    pub displayed: bool,
}

/// End points of a `<linearGradient>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct GradientSpan {
    /// `x1`/`y1`.
    pub from: Point,
    /// `x2`/`y2`.
    pub to: Point,
}

/// A mounted stroke-order SVG.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: f32,
    height: f32,
    strokes: Vec<StrokeElement>,
    labels: Vec<LabelElement>,
    gradients: BTreeMap<String, GradientSpan>,
}

impl Canvas {
    /// Parse stroke-order markup (anything containing one `<svg>...</svg>` element).
    #[tracing::instrument(skip(markup), fields(bytes = markup.len()))]
    pub fn from_markup(markup: &str) -> HitsujunResult<Self> {
        let svg = extract_svg_element(markup)
            .ok_or_else(|| HitsujunError::markup("no <svg> element in markup"))?;
        let svg = declare_kanjivg_namespace(svg);

        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())
            .map_err(|e| HitsujunError::markup(format!("parse svg tree: {e}")))?;
        let size = tree.size();

        let doc = roxmltree::Document::parse(&svg)
            .map_err(|e| HitsujunError::markup(format!("parse svg xml: {e}")))?;

        let mut canvas = Self {
            width: size.width(),
            height: size.height(),
            strokes: Vec::new(),
            labels: Vec::new(),
            gradients: BTreeMap::new(),
        };
        canvas.collect(doc.root_element());

        tracing::debug!(
            strokes = canvas.strokes.len(),
            labels = canvas.labels.len(),
            gradients = canvas.gradients.len(),
            "mounted svg"
        );
        Ok(canvas)
    }

    fn collect(&mut self, node: roxmltree::Node<'_, '_>) {
        for child in node.children().filter(|n| n.is_element()) {
            let tag = child.tag_name();
            if tag.namespace().is_some_and(|ns| ns != SVG_NS) {
                continue;
            }
            match tag.name() {
                name if NON_RENDERED.contains(&name) => self.collect_gradients(child),
                "path" => self.strokes.push(stroke_from_node(child)),
                "text" => self.labels.push(LabelElement {
                    text: text_content(child),
                    lit: true,
                    displayed: true,
                }),
                "linearGradient" => self.insert_gradient(child),
                _ => self.collect(child),
            }
        }
    }

    // Inside <defs> and friends only gradients matter.
    fn collect_gradients(&mut self, node: roxmltree::Node<'_, '_>) {
        for n in node.descendants() {
            if n.is_element() && n.tag_name().name() == "linearGradient" {
                self.insert_gradient(n);
            }
        }
    }

    fn insert_gradient(&mut self, node: roxmltree::Node<'_, '_>) {
        let Some(id) = node.attribute("id") else {
            return;
        };
        let num = |name: &str| {
            node.attribute(name)
                .and_then(|v| v.trim().trim_end_matches('%').parse::<f64>().ok())
                .unwrap_or(0.0)
        };
        self.gradients.insert(
            id.to_owned(),
            GradientSpan {
                from: Point::new(num("x1"), num("y1")),
                to: Point::new(num("x2"), num("y2")),
            },
        );
    }

    /// Canvas size in user units, as resolved by `usvg`.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Strokes in draw order.
    pub fn strokes(&self) -> &[StrokeElement] {
        &self.strokes
    }

    /// Stroke-order labels in document order.
    pub fn labels(&self) -> &[LabelElement] {
        &self.labels
    }

    /// Gradient span by id.
    pub fn gradient(&self, id: &str) -> Option<&GradientSpan> {
        self.gradients.get(id)
    }

    /// Style of stroke `index`.
    pub fn stroke_style(&self, index: usize) -> Option<&StrokeStyle> {
        self.strokes.get(index).map(|s| &s.style)
    }
}

impl StrokeSurface for Canvas {
    fn stroke_lengths(&self) -> Vec<f64> {
        self.strokes.iter().map(|s| s.length).collect()
    }

    fn label_count(&self) -> usize {
        self.labels.len()
    }

    fn set_stroke_dash(&mut self, index: usize, length: f64) {
        if let Some(s) = self.strokes.get_mut(index) {
            s.style.dash_array = Some(length);
        }
    }

    fn set_stroke_offset(&mut self, index: usize, offset: f64) {
        if let Some(s) = self.strokes.get_mut(index) {
            s.style.dash_offset = Some(offset);
        }
    }

    fn set_stroke_transition(&mut self, index: usize, transition: Option<StrokeTransition>) {
        if let Some(s) = self.strokes.get_mut(index) {
            s.style.transition = transition;
        }
    }

    fn set_label_lit(&mut self, index: usize, lit: bool) {
        if let Some(l) = self.labels.get_mut(index) {
            l.lit = lit;
        }
    }

    fn set_label_visible(&mut self, index: usize, visible: bool) {
        if let Some(l) = self.labels.get_mut(index) {
            l.displayed = visible;
        }
    }

    // The gradient runs from the bbox origin to the point `progress` of the way across it.
    // Only meaningful for strokes drawn roughly corner to corner.
    fn set_gradient_progress(&mut self, index: usize, progress: f64) {
        let Some(stroke) = self.strokes.get(index) else {
            return;
        };
        let (Some(id), Some(b)) = (stroke.gradient.as_deref(), stroke.bounds) else {
            return;
        };
        let Some(span) = self.gradients.get_mut(id) else {
            return;
        };
        let p = progress.clamp(0.0, 1.0);
        span.from = Point::new(b.x0, b.y0);
        span.to = Point::new(b.x0 + b.width() * p, b.y0 + b.height() * p);
    }

    fn stroke_offset(&self, index: usize) -> Option<f64> {
        self.strokes.get(index).and_then(|s| s.style.dash_offset)
    }
}

fn stroke_from_node(node: roxmltree::Node<'_, '_>) -> StrokeElement {
    let d = node.attribute("d").unwrap_or_default();
    let path = parse_path_data(d).unwrap_or_else(|| {
        tracing::warn!(id = node.attribute("id"), "unparseable stroke path data");
        BezPath::new()
    });
    StrokeElement {
        id: node.attribute("id").map(str::to_owned),
        length: path_length(&path),
        bounds: path_bounds(&path),
        gradient: node.attribute("stroke").and_then(gradient_ref),
        path,
        style: StrokeStyle::default(),
    }
}

fn gradient_ref(paint: &str) -> Option<String> {
    let inner = paint.trim().strip_prefix("url(")?.strip_suffix(')')?;
    let id = inner.trim().trim_matches(|c| c == '"' || c == '\'').strip_prefix('#')?;
    (!id.is_empty()).then(|| id.to_owned())
}

fn text_content(node: roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_owned()
}

// KanjiVG declares its `kvg:` prefix in the DOCTYPE, which is gone once the markup is trimmed
// to the <svg> element. Re-declare it on the root so the document is namespace-well-formed.
fn declare_kanjivg_namespace(svg: &str) -> String {
    if !svg.contains("kvg:") || svg.contains("xmlns:kvg") {
        return svg.to_owned();
    }
    let insert_at = "<svg".len();
    let mut out = String::with_capacity(svg.len() + KANJIVG_NS.len() + 16);
    out.push_str(&svg[..insert_at]);
    out.push_str(&format!(" xmlns:kvg=\"{KANJIVG_NS}\""));
    out.push_str(&svg[insert_at..]);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/mount.rs"]
mod tests;
