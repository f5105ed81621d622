//! Intrinsic dimensions of SVG documents.
//!
//! The document is parsed with `roxmltree` (character references decoded,
//! doctype declarations allowed) and the first element whose local name is
//! `svg` supplies the size. Markup that is not well-formed XML, or that has no
//! `svg` element, has no intrinsic size.
//!
//! # Example
//!
//! ```
//! use zenlogo::svg::parse_dimensions;
//!
//! let doc = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100"></svg>"#;
//! assert_eq!(parse_dimensions(doc).unwrap(), Some((200.0, 100.0)));
//!
//! let doc = r#"<svg width="120px" height="40"></svg>"#;
//! assert_eq!(parse_dimensions(doc).unwrap(), Some((120.0, 40.0)));
//! ```

use alloc::string::{String, ToString};

use roxmltree::{Document, Node, ParsingOptions};

/// Malformed numeric content in the root element.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SvgError {
    /// A `viewBox` component is not a finite number.
    #[error("invalid viewBox number {value:?}")]
    InvalidNumber { value: String },
}

/// Width and height of an SVG document, rejecting malformed `viewBox` numbers.
///
/// A `viewBox` (or lowercase `viewbox`) with exactly four numbers wins and
/// contributes its last two. Otherwise the leading number of each of `width`
/// and `height` is used, ignoring units (`"120px"` is 120). Returns
/// `Ok(None)` for empty or ill-formed input, a document without an `svg`
/// element, or when neither source yields both dimensions.
///
/// Values are returned as written; zero or negative sizes are the caller's
/// to handle.
pub fn parse_dimensions(svg: &str) -> Result<Option<(f64, f64)>, SvgError> {
    dimensions(svg, true)
}

/// Like [`parse_dimensions`], but unparseable `viewBox` components are
/// dropped. When fewer than four numbers remain, `width` and `height` decide.
///
/// ```
/// use zenlogo::svg::parse_dimensions_lenient;
///
/// let doc = r#"<svg viewBox="0 0 x 100" width="200" height="100"/>"#;
/// assert_eq!(parse_dimensions_lenient(doc), Some((200.0, 100.0)));
/// ```
pub fn parse_dimensions_lenient(svg: &str) -> Option<(f64, f64)> {
    dimensions(svg, false).ok().flatten()
}

fn dimensions(svg: &str, strict: bool) -> Result<Option<(f64, f64)>, SvgError> {
    if svg.trim().is_empty() {
        return Ok(None);
    }
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = match Document::parse_with_options(svg, options) {
        Ok(doc) => doc,
        Err(e) => {
            log::debug!("svg is not well-formed XML: {e}");
            return Ok(None);
        }
    };
    let Some(root) = find_root(&doc) else {
        log::debug!("no <svg> element found");
        return Ok(None);
    };

    let view_box = root.attribute("viewBox").or_else(|| root.attribute("viewbox"));
    if let Some(value) = view_box {
        if let Some((w, h)) = view_box_size(value, strict)? {
            return Ok(Some((w, h)));
        }
    }

    let width = root.attribute("width").and_then(leading_number);
    let height = root.attribute("height").and_then(leading_number);
    Ok(width.zip(height))
}

/// First element, in document order, whose local name is `svg`.
fn find_root<'a, 'input>(doc: &'a Document<'input>) -> Option<Node<'a, 'input>> {
    doc.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "svg")
}

/// `(width, height)` from a `viewBox` value, or `None` when it does not hold
/// exactly four numbers. In strict mode the first bad component is an error;
/// otherwise bad components are skipped.
fn view_box_size(value: &str, strict: bool) -> Result<Option<(f64, f64)>, SvgError> {
    let mut parts = [0.0; 4];
    let mut count = 0;
    for part in value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
    {
        let Some(number) = part.parse::<f64>().ok().filter(|v| v.is_finite()) else {
            if strict {
                return Err(SvgError::InvalidNumber {
                    value: part.to_string(),
                });
            }
            continue;
        };
        if count < parts.len() {
            parts[count] = number;
        }
        count += 1;
    }
    Ok((count == 4).then_some((parts[2], parts[3])))
}

/// First `[-+]?\d*\.?\d+` run in `s`, parsed.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    for start in 0..bytes.len() {
        let mut i = start;
        if matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let int_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let int_digits = i - int_start;

        let mut end = None;
        if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            end = Some(j);
        } else if int_digits > 0 {
            end = Some(i);
        }

        if let Some(end) = end {
            return s[start..end].parse::<f64>().ok().filter(|v| v.is_finite());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_box_wins_over_width_height() {
        let doc = r#"<svg width="10" height="10" viewBox="0 0 200 100"/>"#;
        assert_eq!(parse_dimensions(doc), Ok(Some((200.0, 100.0))));
    }

    #[test]
    fn view_box_accepts_commas_and_lowercase_name() {
        let doc = r#"<svg viewbox="0,0, 64.5,32"></svg>"#;
        assert_eq!(parse_dimensions(doc), Ok(Some((64.5, 32.0))));
    }

    #[test]
    fn view_box_with_wrong_arity_falls_back() {
        let doc = r#"<svg viewBox="0 0 200" width="30" height="15"></svg>"#;
        assert_eq!(parse_dimensions(doc), Ok(Some((30.0, 15.0))));
    }

    #[test]
    fn invalid_view_box_number_is_an_error() {
        let doc = r#"<svg viewBox="0 0 x 100" xmlns="http://www.w3.org/2000/svg"></svg>"#;
        assert_eq!(
            parse_dimensions(doc),
            Err(SvgError::InvalidNumber { value: "x".into() })
        );
        assert!(parse_dimensions(r#"<svg viewBox="0 0 inf 1"/>"#).is_err());
    }

    #[test]
    fn lenient_skips_bad_view_box_numbers() {
        let doc = r#"<svg viewBox="0 0 x 100" width="200" height="100"/>"#;
        assert_eq!(parse_dimensions_lenient(doc), Some((200.0, 100.0)));
        // Four numbers survive the bad component.
        let doc = r#"<svg viewBox="0 0 x 64 32" width="1" height="1"/>"#;
        assert_eq!(parse_dimensions_lenient(doc), Some((64.0, 32.0)));
        assert_eq!(parse_dimensions_lenient(r#"<svg viewBox="a b c d"/>"#), None);
    }

    #[test]
    fn character_references_are_decoded() {
        let doc = r#"<svg width="&#49;20" height="40"/>"#;
        assert_eq!(parse_dimensions(doc), Ok(Some((120.0, 40.0))));
        let doc = r#"<svg viewBox="0 0 &#50;00 100" xmlns="http://www.w3.org/2000/svg"/>"#;
        assert_eq!(parse_dimensions(doc), Ok(Some((200.0, 100.0))));
    }

    #[test]
    fn width_height_units_are_ignored() {
        let doc = r#"<svg width="120px" height='2.5em'></svg>"#;
        assert_eq!(parse_dimensions(doc), Ok(Some((120.0, 2.5))));
        let doc = r#"<svg width=".5in" height="-3"></svg>"#;
        assert_eq!(parse_dimensions(doc), Ok(Some((0.5, -3.0))));
    }

    #[test]
    fn missing_dimension_gives_none() {
        assert_eq!(parse_dimensions(r#"<svg width="100%"></svg>"#), Ok(None));
        assert_eq!(parse_dimensions(r#"<svg width="auto" height="10"></svg>"#), Ok(None));
    }

    #[test]
    fn empty_and_rootless_input() {
        assert_eq!(parse_dimensions(""), Ok(None));
        assert_eq!(parse_dimensions("   \n"), Ok(None));
        assert_eq!(parse_dimensions("<html><body/></html>"), Ok(None));
        assert_eq!(parse_dimensions("not markup at all"), Ok(None));
        assert_eq!(parse_dimensions("<svg viewBox='0 0 1 1'>"), Ok(None));
    }

    #[test]
    fn accepts_prolog_and_namespaced_root() {
        let doc = concat!(
            r#"<?xml version="1.0"?>"#,
            "<!DOCTYPE svg>",
            "<!-- <svg viewBox=\"0 0 1 1\"> -->",
            r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" viewBox="0 0 40 20"/>"#,
        );
        assert_eq!(parse_dimensions(doc), Ok(Some((40.0, 20.0))));
    }

    #[test]
    fn finds_nested_svg_element() {
        let doc = r#"<div class="a>b"><p/><svg viewBox="0 0 8 6"></svg></div>"#;
        assert_eq!(parse_dimensions(doc), Ok(Some((8.0, 6.0))));
    }

    #[test]
    fn attribute_name_must_match_exactly() {
        let doc = r#"<svg data-width="9" data-height="9" width="3" height="4"/>"#;
        assert_eq!(parse_dimensions(doc), Ok(Some((3.0, 4.0))));
    }

    #[test]
    fn leading_number_forms() {
        assert_eq!(leading_number("12"), Some(12.0));
        assert_eq!(leading_number(" +7.25pt"), Some(7.25));
        assert_eq!(leading_number("abc-1"), Some(-1.0));
        assert_eq!(leading_number("3."), Some(3.0));
        assert_eq!(leading_number("."), None);
        assert_eq!(leading_number(""), None);
    }
}
