//! Attribute maps for start tags and processing instructions.
//!
//! Both `<item id="1" hidden>` and `<?xml version="1.0"?>` carry a list of
//! `key="value"` pairs. quick-xml's HTML-mode iterator lexes them, so bare
//! tokens and unquoted values are accepted; its duplicate check is turned off.

use quick_xml::events::BytesStart;
use quick_xml::events::attributes::Attribute;
use strata_ir::{Attributes, Scalar};
use tracing::trace;

use super::infer_scalar;

/// Collects the attributes of a start tag into an ordered attribute map.
///
/// Values are read raw and type-inferred; a bare token maps to `true`. A
/// repeated key keeps its first position and takes the last value. Malformed
/// attributes are skipped.
pub(crate) fn collect_attributes(start: &BytesStart<'_>) -> Attributes {
    let tag: &[u8] = start;
    let mut attrs = Attributes::new();

    let mut iter = start.html_attributes();
    iter.with_checks(false);
    for attr in iter {
        let attr = match attr {
            Ok(attr) => attr,
            Err(err) => {
                trace!(%err, "Skipping malformed attribute");
                continue;
            }
        };

        let value = if is_valueless(tag, &attr) {
            Scalar::Bool(true)
        } else {
            infer_scalar(&String::from_utf8_lossy(&attr.value))
        };
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        attrs.insert(key, value);
    }

    attrs
}

/// Splits a declaration or processing instruction body into its target and
/// attribute map.
pub(crate) fn instruction_attributes(body: &[u8]) -> (String, Attributes) {
    let body = String::from_utf8_lossy(body);
    let body = body.trim_start();
    let target_len = body
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(body.len());

    let content = BytesStart::from_content(body, target_len);
    (body[..target_len].to_string(), collect_attributes(&content))
}

/// Tells `<input disabled>` apart from `<input disabled="">`.
///
/// The key borrows from `tag`; a valueless key is not followed by `=`.
fn is_valueless(tag: &[u8], attr: &Attribute<'_>) -> bool {
    if !attr.value.is_empty() {
        return false;
    }

    let key = attr.key.as_ref();
    let key_end = (key.as_ptr() as usize + key.len()).saturating_sub(tag.as_ptr() as usize);
    let next = tag
        .get(key_end..)
        .and_then(|rest| rest.iter().find(|b| !b.is_ascii_whitespace()));
    next != Some(&b'=')
}
