//! Route labels for spans and metrics.
//!
//! UUID path segments are collapsed so each route yields one label.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RouteLabel {
    pub(super) path: String,
    pub(super) span_name: String,
}

pub(super) fn route_label(method: &str, path: &str) -> RouteLabel {
    let path = collapse_ids(path);
    let span_name = format!("{method} {path}");

    RouteLabel { path, span_name }
}

fn collapse_ids(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
