use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::discover::is_header;

/// Maps a header's `(relative directory, stem)` to the object its
/// paired source compiles to, for every source discovered in the
/// build. Only sources with a known object end up here; an entry
/// missing from this map means "not a known build target", which is
/// exactly the condition that stops expansion.
pub type ObjectsByStem = BTreeMap<(PathBuf, String), PathBuf>;

/// Every known object's own direct header set, for recursion.
pub type HeadersByObject = BTreeMap<PathBuf, Vec<PathBuf>>;

/// Starting from `direct_headers`, walks the header graph to the full
/// transitive set of objects this translation unit depends on.
///
/// Headers whose stem equals `current_stem` are skipped (a test
/// binary never depends on the production object of its own source).
/// Non-headers are skipped. A header only contributes an object when
/// that object is a known build target; the "already added" check
/// (`seen.insert`) both de-duplicates and prevents infinite recursion
/// on header cycles.
pub fn transitive_objects(
    current_stem: &str,
    direct_headers: &[PathBuf],
    src_dir: &Path,
    objects_by_stem: &ObjectsByStem,
    headers_by_object: &HeadersByObject,
) -> Vec<PathBuf> {
    let mut seen = Vec::new();
    let mut stack: Vec<PathBuf> = direct_headers.to_vec();

    while let Some(header) = stack.pop() {
        if !is_header(&header) {
            continue;
        }
        let stem = match header.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };
        if stem == current_stem {
            continue;
        }
        let rel_dir = header
            .parent()
            .and_then(|p| p.strip_prefix(src_dir).ok())
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();

        let Some(object) = objects_by_stem.get(&(rel_dir, stem)) else {
            continue;
        };
        if seen.contains(object) {
            continue;
        }
        seen.push(object.clone());
        if let Some(more) = headers_by_object.get(object) {
            stack.extend(more.clone());
        }
    }

    seen
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn walks_transitive_headers_into_objects() {
        let src_dir = PathBuf::from("/proj/src");
        let mut objects_by_stem = ObjectsByStem::new();
        objects_by_stem.insert((PathBuf::from(""), "foo".into()), PathBuf::from("foo.o"));
        objects_by_stem.insert((PathBuf::from(""), "bar".into()), PathBuf::from("bar.o"));

        let mut headers_by_object = HeadersByObject::new();
        headers_by_object.insert(
            PathBuf::from("foo.o"),
            vec![PathBuf::from("/proj/src/bar.hpp")],
        );

        let direct = vec![PathBuf::from("/proj/src/foo.hpp")];
        let objects = transitive_objects("main", &direct, &src_dir, &objects_by_stem, &headers_by_object);

        assert_eq!(objects, vec![PathBuf::from("foo.o"), PathBuf::from("bar.o")]);
    }

    #[test]
    fn skips_headers_matching_the_current_stem() {
        let src_dir = PathBuf::from("/proj/src");
        let mut objects_by_stem = ObjectsByStem::new();
        objects_by_stem.insert((PathBuf::from(""), "foo".into()), PathBuf::from("foo.o"));

        let direct = vec![PathBuf::from("/proj/src/foo.hpp")];
        let objects = transitive_objects(
            "foo",
            &direct,
            &src_dir,
            &objects_by_stem,
            &HeadersByObject::new(),
        );
        assert!(objects.is_empty());
    }

    #[test]
    fn header_cycles_do_not_infinite_loop() {
        let src_dir = PathBuf::from("/proj/src");
        let mut objects_by_stem = ObjectsByStem::new();
        objects_by_stem.insert((PathBuf::from(""), "foo".into()), PathBuf::from("foo.o"));
        objects_by_stem.insert((PathBuf::from(""), "bar".into()), PathBuf::from("bar.o"));

        let mut headers_by_object = HeadersByObject::new();
        headers_by_object.insert(
            PathBuf::from("foo.o"),
            vec![PathBuf::from("/proj/src/bar.hpp")],
        );
        headers_by_object.insert(
            PathBuf::from("bar.o"),
            vec![PathBuf::from("/proj/src/foo.hpp")],
        );

        let direct = vec![PathBuf::from("/proj/src/foo.hpp")];
        let objects = transitive_objects("main", &direct, &src_dir, &objects_by_stem, &headers_by_object);
        assert_eq!(objects.len(), 2);
    }
}
