use warddata_core::{GENERIC_MARKER, ParamMarker};

/// Number of generic placeholders in `sql`.
#[must_use]
pub fn count_markers(sql: &str) -> usize {
    sql.matches(GENERIC_MARKER).count()
}

/// Replaces every generic placeholder with the engine's marker.
///
/// Numbered styles are numbered left to right from 1, so the statement must
/// be complete (predicates and pagination already appended) and must not be
/// rewritten twice.
#[must_use]
pub fn rewrite_markers(sql: &str, marker: ParamMarker) -> String {
    if marker == ParamMarker::Generic {
        return sql.to_string();
    }

    let mut out = String::with_capacity(sql.len() + 8);
    let mut position = 0;
    let mut rest = sql;
    while let Some(idx) = rest.find(GENERIC_MARKER) {
        position += 1;
        out.push_str(&rest[..idx]);
        out.push_str(&marker.render(position));
        rest = &rest[idx + GENERIC_MARKER.len()..];
    }
    out.push_str(rest);
    out
}
