//! Resolving stages by symbolic name and argument list.

use super::{BuiltinStage, Dump, Grep, ReadFile, Replace, Sort, StageKind, WriteFile};
use crate::core::StageId;
use crate::errors::{FactoryError, TextflowError};
use tracing::debug;

type Constructor = fn(StageId, &[&str]) -> Result<BuiltinStage, TextflowError>;

/// A name the factory recognises.
#[derive(Clone, Copy)]
pub struct StageEntry {
    /// The name used to request the stage.
    pub name: &'static str,
    /// The kind of stage it builds.
    pub kind: StageKind,
    /// Exact number of arguments required.
    pub arity: usize,
    /// Short human readable description of the arguments.
    pub usage: &'static str,
    construct: Constructor,
}

impl std::fmt::Debug for StageEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageEntry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

// Constructors receive exactly `arity` arguments.
const STAGE_TABLE: &[StageEntry] = &[
    StageEntry {
        name: "read",
        kind: StageKind::Read,
        arity: 1,
        usage: "read <filename>",
        construct: |id, args| Ok(ReadFile::new(id, args[0]).into()),
    },
    StageEntry {
        name: "readfile",
        kind: StageKind::Read,
        arity: 1,
        usage: "readfile <filename>",
        construct: |id, args| Ok(ReadFile::new(id, args[0]).into()),
    },
    StageEntry {
        name: "write",
        kind: StageKind::Write,
        arity: 1,
        usage: "write <filename>",
        construct: |id, args| Ok(WriteFile::new(id, args[0]).into()),
    },
    StageEntry {
        name: "writefile",
        kind: StageKind::Write,
        arity: 1,
        usage: "writefile <filename>",
        construct: |id, args| Ok(WriteFile::new(id, args[0]).into()),
    },
    StageEntry {
        name: "grep",
        kind: StageKind::Grep,
        arity: 1,
        usage: "grep <word>",
        construct: |id, args| Ok(Grep::new(id, args[0]).into()),
    },
    StageEntry {
        name: "egrep",
        kind: StageKind::Grep,
        arity: 1,
        usage: "egrep <regex>",
        construct: |id, args| Ok(Grep::regex(id, args[0])?.into()),
    },
    StageEntry {
        name: "sort",
        kind: StageKind::Sort,
        arity: 0,
        usage: "sort",
        construct: |id, _| Ok(Sort::new(id).into()),
    },
    StageEntry {
        name: "replace",
        kind: StageKind::Replace,
        arity: 2,
        usage: "replace <pattern> <substitution>",
        construct: |id, args| Ok(Replace::new(id, args[0], args[1])?.into()),
    },
    StageEntry {
        name: "dump",
        kind: StageKind::Dump,
        arity: 1,
        usage: "dump <filename>",
        construct: |id, args| Ok(Dump::new(id, args[0]).into()),
    },
];

/// Returns every name the factory recognises.
#[must_use]
pub fn stage_table() -> &'static [StageEntry] {
    STAGE_TABLE
}

/// Looks up a table entry by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static StageEntry> {
    STAGE_TABLE.iter().find(|entry| entry.name == name)
}

/// Builds a stage from its name and arguments, reporting why it cannot.
///
/// # Errors
///
/// Returns [`FactoryError::UnknownStage`] for an unrecognised name,
/// [`FactoryError::Arity`] when the argument count differs from the
/// stage's arity, and [`FactoryError::InvalidArgument`] when the stage
/// rejects the argument values.
pub fn try_construct_stage<S: AsRef<str>>(
    id: StageId,
    name: &str,
    args: &[S],
) -> Result<BuiltinStage, FactoryError> {
    let entry = lookup(name).ok_or_else(|| FactoryError::unknown(name))?;

    if args.len() != entry.arity {
        return Err(FactoryError::arity(name, entry.arity, args.len(), entry.usage));
    }

    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let stage = (entry.construct)(id, &args)
        .map_err(|err| FactoryError::invalid_argument(name, err))?;

    debug!(stage = %id, stage_name = name, kind = %entry.kind, "Constructed stage");
    Ok(stage)
}

/// Builds a stage from its name and arguments.
///
/// Returns `None` when the name is unknown or the arguments are not valid
/// for it; both cases look the same to the caller. Use
/// [`try_construct_stage`] to tell them apart.
#[must_use]
pub fn construct_stage<S: AsRef<str>>(id: StageId, name: &str, args: &[S]) -> Option<BuiltinStage> {
    match try_construct_stage(id, name, args) {
        Ok(stage) => Some(stage),
        Err(err) => {
            debug!(stage = %id, stage_name = name, error = %err, "Stage not constructed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ResultShape, StageResult};
    use crate::stages::Stage;

    const NO_ARGS: [&str; 0] = [];

    #[test]
    fn test_construct_every_canonical_name() {
        let cases: [(&str, Vec<&str>, StageKind); 6] = [
            ("read", vec!["in.txt"], StageKind::Read),
            ("write", vec!["out.txt"], StageKind::Write),
            ("grep", vec!["word"], StageKind::Grep),
            ("sort", vec![], StageKind::Sort),
            ("replace", vec!["a", "b"], StageKind::Replace),
            ("dump", vec!["dump.txt"], StageKind::Dump),
        ];

        for (index, (name, args, kind)) in cases.into_iter().enumerate() {
            let id = StageId(index as u64);
            let stage = construct_stage(id, name, &args)
                .unwrap_or_else(|| panic!("'{name}' should resolve"));
            assert_eq!(stage.kind(), kind);
            assert_eq!(stage.id(), id);
        }
    }

    #[test]
    fn test_table_shapes() {
        let shapes: Vec<(&str, usize, ResultShape, ResultShape)> = stage_table()
            .iter()
            .map(|e| (e.name, e.arity, e.kind.input_shape(), e.kind.output_shape()))
            .collect();

        assert!(shapes.contains(&("read", 1, ResultShape::None, ResultShape::Text)));
        assert!(shapes.contains(&("write", 1, ResultShape::Text, ResultShape::None)));
        assert!(shapes.contains(&("grep", 1, ResultShape::Text, ResultShape::Text)));
        assert!(shapes.contains(&("sort", 0, ResultShape::Text, ResultShape::Text)));
        assert!(shapes.contains(&("replace", 2, ResultShape::Text, ResultShape::Text)));
        assert!(shapes.contains(&("dump", 1, ResultShape::Text, ResultShape::Text)));
    }

    #[test]
    fn test_table_names_are_unique() {
        let mut names: Vec<&str> = stage_table().iter().map(|e| e.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_aliases() {
        let read = construct_stage(StageId(1), "readfile", &["a.txt"]).unwrap();
        assert_eq!(read.kind(), StageKind::Read);

        let write = construct_stage(StageId(2), "writefile", &["b.txt"]).unwrap();
        assert_eq!(write.kind(), StageKind::Write);
    }

    #[test]
    fn test_unknown_name_is_absent() {
        assert!(construct_stage(StageId(1), "unknown_stage_xyz", &NO_ARGS).is_none());

        let err = try_construct_stage(StageId(1), "unknown_stage_xyz", &NO_ARGS).unwrap_err();
        assert!(matches!(err, FactoryError::UnknownStage { .. }));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(construct_stage(StageId(1), "SORT", &NO_ARGS).is_none());
    }

    #[test]
    fn test_replace_with_one_argument_is_absent() {
        assert!(construct_stage(StageId(1), "replace", &["foo"]).is_none());

        let err = try_construct_stage(StageId(1), "replace", &["foo"]).unwrap_err();
        match err {
            FactoryError::Arity {
                name,
                expected,
                actual,
                usage,
            } => {
                assert_eq!(name, "replace");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
                assert_eq!(usage, lookup("replace").unwrap().usage);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_too_many_arguments_is_absent() {
        assert!(construct_stage(StageId(1), "sort", &["extra"]).is_none());
        assert!(construct_stage(StageId(1), "read", &["a", "b"]).is_none());
    }

    #[test]
    fn test_invalid_argument_content_is_absent() {
        assert!(construct_stage(StageId(1), "replace", &["", "x"]).is_none());
        assert!(construct_stage(StageId(1), "egrep", &["(unclosed"]).is_none());

        let err = try_construct_stage(StageId(1), "replace", &["", "x"]).unwrap_err();
        assert!(matches!(err, FactoryError::InvalidArgument { .. }));
    }

    #[test]
    fn test_accepts_owned_arguments() {
        let args = vec!["foo".to_string(), "baz".to_string()];
        let stage = construct_stage(StageId(3), "replace", &args).unwrap();

        let result = stage.execute(StageResult::text("foo bar foo")).unwrap();
        assert_eq!(result, StageResult::text("baz bar baz"));
    }

    #[test]
    fn test_egrep_builds_regex_grep() {
        match construct_stage(StageId(1), "egrep", &["^a"]).unwrap() {
            BuiltinStage::Grep(grep) => assert!(grep.is_regex()),
            other => panic!("unexpected stage: {other:?}"),
        }
    }
}
