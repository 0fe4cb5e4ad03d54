// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A single test item, as reported by the host runner.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TestItemSummary {
    /// The unique identity of the test, with components separated by `::`.
    ///
    /// For example, `tests/test_foo.py::TestSanity::test_with_flag[a]`.
    pub id: String,

    /// The display name of the test: usually the last component of [`Self::id`], including any
    /// parametrization suffix such as `[a]`.
    ///
    /// Empty if the host didn't report one; consumers fall back to the last component of the
    /// identity.
    #[serde(default)]
    pub name: String,

    /// The module containing the test, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// The module of the test's declared parent, if known.
    ///
    /// Generated tests (doctests, for example) often lack a module of their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_module: Option<String>,

    /// The annotations attached to this test, closest to the test function first.
    ///
    /// Annotations inherited from enclosing groups come after the test's own annotations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationSummary>,

    /// True if this test is a doctest.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub doctest: bool,
}

impl TestItemSummary {
    /// Creates a new summary with the given identity and display name, and no annotations.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            module: None,
            parent_module: None,
            annotations: Vec::new(),
            doctest: false,
        }
    }

    /// Sets the module for this test.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Sets the module of this test's parent.
    pub fn with_parent_module(mut self, parent_module: impl Into<String>) -> Self {
        self.parent_module = Some(parent_module.into());
        self
    }

    /// Appends an annotation.
    ///
    /// Annotations are stored closest-first, so an annotation appended later is treated as being
    /// further away from the test function.
    pub fn with_annotation(mut self, annotation: AnnotationSummary) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Marks this test as a doctest.
    pub fn with_doctest(mut self, doctest: bool) -> Self {
        self.doctest = doctest;
        self
    }

    /// Returns the identity used to group this test with its neighbors.
    ///
    /// This is the test's own module, or if that isn't known, its parent's module. Returns `None`
    /// if neither is known.
    pub fn group_identity(&self) -> Option<&str> {
        self.module.as_deref().or(self.parent_module.as_deref())
    }

    /// Returns the file this test lives in: the first `::`-separated component of the identity.
    pub fn file(&self) -> &str {
        match self.id.split_once("::") {
            Some((file, _)) => file,
            None => &self.id,
        }
    }

    /// Returns an iterator over the annotations with the given name, closest-first.
    pub fn annotations_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a AnnotationSummary> + 'a {
        self.annotations.iter().filter(move |a| a.name == name)
    }
}

/// An annotation attached to a test, such as `describe("A basic foo")`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct AnnotationSummary {
    /// The name of the annotation: `describe`, `context`, `it`, or anything else the host knows
    /// about.
    pub name: SmolStr,

    /// Arguments passed to the annotation. May be empty if the annotation was used bare.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl AnnotationSummary {
    /// The name of the annotation that opens a `Describe:` block.
    pub const DESCRIBE: &'static str = "describe";

    /// The name of the annotation that opens a `Context:` block.
    pub const CONTEXT: &'static str = "context";

    /// The name of the annotation that labels a test with `It:`.
    pub const IT: &'static str = "it";

    /// Creates an annotation with a single argument.
    pub fn new(name: impl Into<SmolStr>, arg: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: vec![arg.into()],
        }
    }

    /// Creates an annotation that was used without any arguments.
    pub fn bare(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Creates a `describe` annotation.
    pub fn describe(label: impl Into<String>) -> Self {
        Self::new(Self::DESCRIBE, label)
    }

    /// Creates a `context` annotation.
    pub fn context(label: impl Into<String>) -> Self {
        Self::new(Self::CONTEXT, label)
    }

    /// Creates an `it` annotation.
    pub fn it(label: impl Into<String>) -> Self {
        Self::new(Self::IT, label)
    }

    /// Returns the first argument, if any.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use test_case::test_case;

    #[test_case("tests/test_foo.py::TestSanity::test_x", "tests/test_foo.py"; "nested")]
    #[test_case("tests/test_foo.py::test_x[a::b]", "tests/test_foo.py"; "param with separator")]
    #[test_case("test_x", "test_x"; "no separator")]
    #[test_case("", ""; "empty")]
    fn file(id: &str, expected: &str) {
        let item = TestItemSummary::new(id, "test_x");
        assert_eq!(item.file(), expected);
    }

    #[test]
    fn group_identity_fallback() {
        let item = TestItemSummary::new("a::b", "b");
        assert_eq!(item.group_identity(), None);

        let item = item.with_parent_module("parent");
        assert_eq!(item.group_identity(), Some("parent"));

        let item = item.with_module("own");
        assert_eq!(item.group_identity(), Some("own"));
    }

    #[test]
    fn parse_item() {
        let input = indoc! {r#"
            {
                "id": "test_mod.py::test_foo",
                "name": "test_foo",
                "module": "test_mod",
                "annotations": [
                    { "name": "it", "args": ["Does something"] },
                    { "name": "context" },
                    { "name": "describe", "args": ["A basic foo"] },
                    { "name": "slow" }
                ]
            }
        "#};
        let item: TestItemSummary = serde_json::from_str(input).expect("valid item");
        assert_eq!(item.group_identity(), Some("test_mod"));
        assert!(!item.doctest);
        assert_eq!(item.annotations.len(), 4);
        assert_eq!(item.annotations[1], AnnotationSummary::bare("context"));
        assert_eq!(item.annotations[1].first_arg(), None);

        let describes: Vec<_> = item
            .annotations_named(AnnotationSummary::DESCRIBE)
            .filter_map(|a| a.first_arg())
            .collect();
        assert_eq!(describes, ["A basic foo"]);
    }

    #[test]
    fn parse_item_without_name() {
        let item: TestItemSummary =
            serde_json::from_str(r#"{"id": "m.py::TestX::test_y", "module": "m"}"#)
                .expect("name is optional");
        assert_eq!(item.name, "");
        assert_eq!(item.id, "m.py::TestX::test_y");
    }
}
