use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{HitsujunError, HitsujunResult};

/// Something that can produce the stroke-order SVG for a character.
pub trait StrokeSource {
    /// Raw markup trimmed to the `<svg>...</svg>` element.
    ///
    /// Missing or empty assets are [`HitsujunError::NotFound`].
    fn fetch_stroke_svg(&self, character: char) -> HitsujunResult<String>;
}

/// File name of a character's stroke SVG: its code point as 5-digit lowercase hex.
pub fn svg_file_name(character: char) -> String {
    format!("{:05x}.svg", u32::from(character))
}

/// Slice out the first `<svg ...>...</svg>` element, ignoring ASCII case.
///
/// Anything before (XML declaration, DOCTYPE, comments) or after is dropped.
pub fn extract_svg_element(text: &str) -> Option<&str> {
    let lower = text.to_ascii_lowercase();
    let mut from = 0;
    let start = loop {
        let at = from + lower[from..].find("<svg")?;
        // Reject `<svgfoo`; the tag name must end here.
        match lower.as_bytes().get(at + 4) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => break at,
            _ => from = at + 4,
        }
    };
    let end = start + lower[start..].rfind("</svg>")? + "</svg>".len();
    Some(&text[start..end])
}

/// Stroke SVGs stored as `<root>/<codepoint>.svg` files (the KanjiVG layout).
#[derive(Clone, Debug)]
pub struct DirStrokeSource {
    root: PathBuf,
}

impl DirStrokeSource {
    /// Source reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the files are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a character's SVG file.
    pub fn path_for(&self, character: char) -> PathBuf {
        self.root.join(svg_file_name(character))
    }
}

impl StrokeSource for DirStrokeSource {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn fetch_stroke_svg(&self, character: char) -> HitsujunResult<String> {
        let path = self.path_for(character);
        if !path.is_file() {
            return Err(HitsujunError::not_found(format!(
                "no stroke svg for '{character}' at '{}'",
                path.display()
            )));
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read stroke svg '{}'", path.display()))?;
        let svg = extract_svg_element(&text).ok_or_else(|| {
            HitsujunError::not_found(format!(
                "'{}' contains no <svg> element",
                path.display()
            ))
        })?;
        tracing::debug!(bytes = svg.len(), "fetched stroke svg");
        Ok(svg.to_owned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/svg.rs"]
mod tests;
