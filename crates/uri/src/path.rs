//! Dot-segment handling for raw (still percent-encoded) paths.

/// A segment that a following `..` may cancel out.
///
/// `..` itself, `.`-prefixed names like `.hidden` and the empty root segment
/// are never folded.
fn is_foldable(segment: &str) -> bool {
    if segment.is_empty() {
        return false;
    }
    let dots = segment.bytes().take_while(|&b| b == b'.').count();
    match dots {
        0 => true,
        1 => false,
        2 => dots < segment.len(),
        _ => true,
    }
}

/// Normalizes `path`: drops `.` segments, merges repeated slashes and folds
/// `name/..` pairs. A `..` that would climb above the start of a relative
/// path is kept, so `../foo` stays `../foo`.
pub fn collapse_dots(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    let mut out: Vec<&str> = Vec::with_capacity(segments.len());
    let mut trailing_slash = false;

    for (i, segment) in segments.iter().copied().enumerate() {
        let is_last = i == last;
        match segment {
            // Keep the leading empty segment of an absolute path.
            "" if i == 0 => out.push(""),
            "" => trailing_slash = is_last && !out.is_empty(),
            "." => trailing_slash = is_last && !out.is_empty(),
            ".." if out.last().copied().is_some_and(is_foldable) => {
                out.pop();
                trailing_slash = is_last && !out.is_empty();
            }
            _ => {
                out.push(segment);
                trailing_slash = false;
            }
        }
    }

    let mut collapsed = out.join("/");
    if trailing_slash {
        collapsed.push('/');
    }
    collapsed
}

/// Removes leading `../` segments (and a bare trailing `..`) that survived
/// [`collapse_dots`]; used once a path is anchored to a base.
pub(crate) fn strip_extra_parents(path: &str) -> &str {
    let mut rest = path;
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
    }
    if rest == ".." { "" } else { rest }
}

/// Drops `..` segments that sit directly under the root of an absolute path.
pub(crate) fn clamp_to_root(path: &str) -> String {
    let Some(mut rest) = path.strip_prefix('/') else {
        return path.to_string();
    };
    loop {
        if let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        } else if rest == ".." {
            rest = "";
        } else {
            break;
        }
    }
    format!("/{rest}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_parent_segments() {
        assert_eq!(collapse_dots("foo/../bar"), "bar");
        assert_eq!(collapse_dots("foo/./bar"), "foo/bar");
        assert_eq!(collapse_dots("foo/../bar/./../../baz"), "../baz");
        assert_eq!(collapse_dots("a/b/../../c"), "c");
        assert_eq!(collapse_dots("/a/../b"), "/b");
    }

    #[test]
    fn never_climbs_above_relative_start() {
        assert_eq!(collapse_dots("../foo"), "../foo");
        assert_eq!(strip_extra_parents(&collapse_dots("../foo")), "foo");
        assert_eq!(strip_extra_parents("../../.."), "");
    }

    #[test]
    fn normalizes_single_dots_and_slashes() {
        assert_eq!(collapse_dots("./foo"), "foo");
        assert_eq!(collapse_dots("foo//bar"), "foo/bar");
        assert_eq!(collapse_dots("foo/."), "foo/");
        assert_eq!(collapse_dots("x/a/.."), "x/");
        assert_eq!(collapse_dots("a/.."), "");
        assert_eq!(collapse_dots("/"), "/");
        assert_eq!(collapse_dots(""), "");
        assert_eq!(collapse_dots("./"), "");
        assert_eq!(collapse_dots("../"), "../");
    }

    #[test]
    fn dot_prefixed_names_are_not_folded() {
        assert_eq!(collapse_dots(".hidden/../x"), ".hidden/../x");
        assert_eq!(collapse_dots("..x/../y"), "y");
        assert_eq!(collapse_dots(".../../y"), "y");
    }

    #[test]
    fn absolute_paths_clamp_at_root() {
        assert_eq!(clamp_to_root("/../a"), "/a");
        assert_eq!(clamp_to_root("/../../"), "/");
        assert_eq!(clamp_to_root("rel/../a"), "rel/../a");
    }
}
