use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;

use crate::markup::is_element;

/// Summary figures reported next to a traced SVG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SvgStats {
    /// Width of the source pixel grid.
    pub width: u32,
    /// Height of the source pixel grid.
    pub height: u32,
    /// Number of `path` elements.
    pub paths: usize,
    /// Drawing-command letters across all paths; an estimate of node count.
    pub nodes: usize,
    /// Serialized size in bytes.
    pub bytes: usize,
    /// Serialized size formatted as kilobytes, e.g. `"1.25KB"`.
    pub size: String,
}

/// Compute path count, node estimate and size for SVG markup.
///
/// Markup that fails to parse reports zero paths and nodes.
pub fn extract_svg_stats(markup: &str, width: u32, height: u32) -> SvgStats {
    let (paths, nodes) = count_paths(markup).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Could not parse SVG markup for statistics");
        (0, 0)
    });

    SvgStats {
        width,
        height,
        paths,
        nodes,
        bytes: markup.len(),
        size: format_kilobytes(markup.len()),
    }
}

/// Format a byte count as kilobytes with two decimals.
pub fn format_kilobytes(bytes: usize) -> String {
    format!("{:.2}KB", bytes as f64 / 1024.0)
}

fn count_paths(markup: &str) -> Result<(usize, usize), quick_xml::Error> {
    let mut reader = Reader::from_str(markup);
    let mut paths = 0;
    let mut nodes = 0;
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) if is_element(&e, b"path") => {
                paths += 1;
                nodes += command_letters(&e)?;
            }
            _ => {}
        }
    }
    Ok((paths, nodes))
}

fn command_letters(path: &BytesStart<'_>) -> Result<usize, quick_xml::Error> {
    for attr in path.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"d" {
            return Ok(attr.value.iter().filter(|b| b.is_ascii_alphabetic()).count());
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_paths_and_command_letters() {
        let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
            <path d="M0 0 L1 0 L1 1 Z" fill="#000"/>
            <path d="M2 2 z" fill="#111"/>
            <path d="M0 0 C1 1 2 2 3 3 Q1 1 2 2 L4 4 H1 Z" fill="#222"/>
        </svg>"##;
        let stats = extract_svg_stats(markup, 4, 4);
        assert_eq!(stats.paths, 3);
        assert_eq!(stats.nodes, 12);
        assert_eq!((stats.width, stats.height), (4, 4));
    }

    #[test]
    fn path_without_d_counts_as_path() {
        let stats = extract_svg_stats("<svg><path fill=\"red\"/></svg>", 1, 1);
        assert_eq!(stats.paths, 1);
        assert_eq!(stats.nodes, 0);
    }

    #[test]
    fn non_path_elements_are_ignored() {
        let markup = "<svg><rect width=\"1\" height=\"1\"/><g><path d=\"M0 0L1 1\"></path></g></svg>";
        let stats = extract_svg_stats(markup, 1, 1);
        assert_eq!(stats.paths, 1);
        assert_eq!(stats.nodes, 2);
    }

    #[test]
    fn namespaced_paths_are_counted() {
        let markup = "<svg:svg xmlns:svg=\"http://www.w3.org/2000/svg\"><svg:path d=\"M0 0Z\"/></svg:svg>";
        assert_eq!(extract_svg_stats(markup, 1, 1).paths, 1);
    }

    #[test]
    fn unparsable_markup_reports_zero() {
        let stats = extract_svg_stats("<svg><path d=\"M0 0\"></svg>", 1, 1);
        assert_eq!(stats.paths, 0);
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.bytes, 26);
    }

    #[test]
    fn size_is_reported_in_kilobytes() {
        assert_eq!(format_kilobytes(0), "0.00KB");
        assert_eq!(format_kilobytes(1024), "1.00KB");
        assert_eq!(format_kilobytes(1536), "1.50KB");
        assert_eq!(format_kilobytes(2000), "1.95KB");

        let markup = "a".repeat(3072);
        let stats = extract_svg_stats(&markup, 0, 0);
        assert_eq!(stats.size, "3.00KB");
        assert_eq!(stats.bytes, 3072);
    }

    #[test]
    fn size_counts_utf8_bytes() {
        let stats = extract_svg_stats("<svg><desc>é</desc></svg>", 0, 0);
        assert_eq!(stats.bytes, 26);
    }
}
