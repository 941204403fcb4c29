use std::io::Cursor;

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::{PixtraceError, PixtraceResult};

/// Presentation tweaks applied to engine output after tracing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    /// Multiplier for the root element's width and height.
    pub scale: f64,
    /// Stroke width added to every path, using the path's fill as stroke color. 0 disables it.
    pub stroke_width: f64,
}

impl Decoration {
    fn is_noop(&self) -> bool {
        self.scale == 1.0 && self.stroke_width <= 0.0
    }
}

pub(crate) fn is_element(element: &BytesStart<'_>, name: &[u8]) -> bool {
    element.local_name().as_ref() == name
}

fn markup_error(err: impl std::fmt::Display) -> PixtraceError {
    PixtraceError::Trace(format!("invalid SVG markup: {err}"))
}

/// Rewrite SVG markup, scaling the root element and stroking paths.
///
/// Everything else streams through untouched.
pub fn decorate_svg(markup: &str, decoration: &Decoration) -> PixtraceResult<String> {
    if decoration.is_noop() {
        return Ok(markup.to_string());
    }

    let mut reader = Reader::from_str(markup);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    loop {
        let event = reader.read_event().map_err(markup_error)?;
        let written = match event {
            Event::Eof => break,
            Event::Start(e) if is_element(&e, b"svg") => {
                writer.write_event(Event::Start(scale_root(&e, decoration.scale)?))
            }
            Event::Start(e) if is_element(&e, b"path") => {
                writer.write_event(Event::Start(stroke_path(&e, decoration.stroke_width)?))
            }
            Event::Empty(e) if is_element(&e, b"path") => {
                writer.write_event(Event::Empty(stroke_path(&e, decoration.stroke_width)?))
            }
            other => writer.write_event(other),
        };
        written.map_err(markup_error)?;
    }

    String::from_utf8(writer.into_inner().into_inner()).map_err(markup_error)
}

fn owned_start(element: &BytesStart<'_>) -> BytesStart<'static> {
    BytesStart::new(String::from_utf8_lossy(element.name().as_ref()).into_owned())
}

fn scale_root(element: &BytesStart<'_>, scale: f64) -> PixtraceResult<BytesStart<'static>> {
    let mut out = owned_start(element);
    if scale == 1.0 {
        for attr in element.attributes() {
            out.push_attribute(attr.map_err(markup_error)?);
        }
        return Ok(out);
    }

    let mut width = None;
    let mut height = None;
    let mut has_view_box = false;
    for attr in element.attributes() {
        let attr = attr.map_err(markup_error)?;
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        match attr.key.as_ref() {
            b"width" => {
                out.push_attribute(("width", scale_length(&value, scale).as_str()));
                width = Some(value);
            }
            b"height" => {
                out.push_attribute(("height", scale_length(&value, scale).as_str()));
                height = Some(value);
            }
            key => {
                has_view_box |= key == b"viewBox";
                out.push_attribute(attr);
            }
        }
    }

    if !has_view_box && let (Some(w), Some(h)) = (width, height) {
        out.push_attribute(("viewBox", format!("0 0 {w} {h}").as_str()));
    }
    Ok(out)
}

fn stroke_path(element: &BytesStart<'_>, stroke_width: f64) -> PixtraceResult<BytesStart<'static>> {
    let mut out = owned_start(element);
    let mut fill = None;
    let mut has_stroke = false;
    for attr in element.attributes() {
        let attr = attr.map_err(markup_error)?;
        match attr.key.as_ref() {
            b"fill" => fill = Some(String::from_utf8_lossy(&attr.value).into_owned()),
            b"stroke" => has_stroke = true,
            _ => {}
        }
        out.push_attribute(attr);
    }

    if stroke_width > 0.0
        && !has_stroke
        && let Some(fill) = fill
    {
        out.push_attribute(("stroke", fill.as_str()));
        out.push_attribute(("stroke-width", format_number(stroke_width).as_str()));
    }
    Ok(out)
}

/// Multiply a numeric length, keeping non-numeric values as they are.
fn scale_length(value: &str, scale: f64) -> String {
    match value.trim().parse::<f64>() {
        Ok(n) => format_number(n * scale),
        Err(_) => value.to_string(),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.3}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
