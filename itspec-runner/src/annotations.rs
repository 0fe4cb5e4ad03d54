// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of describe/context/it annotations from test items.
//!
//! The main structure in this module is [`SpecItem`], a read-only view over a
//! [`TestItemSummary`] with everything the spec reporter needs to place a test in the document:
//! its chain of enclosing groups, its leaf label, and the key that groups it with its neighbors.

use crate::config::ImplicitItPrefixes;
use itspec_metadata::{AnnotationSummary, TestItemSummary};
use std::fmt;

/// The kind of a group annotation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AnnotationKind {
    /// A `describe` block: the outermost, most general grouping.
    Describe,
    /// A `context` block: the circumstances a test runs under.
    Context,
}

impl AnnotationKind {
    /// Returns the kind for an annotation name, or `None` if the annotation doesn't open a group.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            AnnotationSummary::DESCRIBE => Some(Self::Describe),
            AnnotationSummary::CONTEXT => Some(Self::Context),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Describe => write!(f, "describe"),
            Self::Context => write!(f, "context"),
        }
    }
}

/// A group annotation with its label.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Annotation {
    /// The kind of group.
    pub kind: AnnotationKind,
    /// The label passed to the annotation.
    pub label: String,
}

impl Annotation {
    /// Creates a new annotation.
    pub fn new(kind: AnnotationKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

/// The label printed on a test's own line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeafLabel {
    /// The label text.
    pub text: String,
    /// True if the label came from an `it` annotation or the implicit-it naming convention, in
    /// which case the line is tagged with `It:`.
    pub has_explicit_it: bool,
}

/// A test item as seen by the spec reporter.
///
/// Built fresh from a [`TestItemSummary`] each time a test is rendered. The only instance that
/// outlives a single render is the previously rendered item, which the reporter keeps around to
/// diff the next item's chain against.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpecItem {
    name: String,
    chain: Vec<Annotation>,
    leaf: LeafLabel,
    display_path: String,
    group: Option<String>,
    param_suffix: Option<String>,
}

impl SpecItem {
    /// Extracts a spec item from a test item summary.
    ///
    /// This never fails: annotations without arguments are dropped, annotations that aren't
    /// describe/context/it are ignored, and a missing display name falls back to the last
    /// component of the test's identity.
    pub fn new(item: &TestItemSummary, prefixes: &ImplicitItPrefixes) -> Self {
        let name = if item.name.is_empty() {
            item.id.rsplit("::").next().unwrap_or_default().to_owned()
        } else {
            item.name.clone()
        };
        let (base_name, param_suffix) = match name.split_once('[') {
            Some((base, suffix)) => (base, Some(suffix.to_owned())),
            None => (name.as_str(), None),
        };

        let mut leaf = leaf_label(item, &name, base_name, prefixes);
        if item.doctest {
            leaf.text = format!("{name} - [doctest]");
        }

        Self {
            chain: group_chain(item),
            leaf,
            display_path: display_path(&item.id),
            group: item.group_identity().map(|g| g.to_owned()),
            param_suffix,
            name,
        }
    }

    /// Returns the test's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the chain of enclosing groups, outermost first.
    pub fn chain(&self) -> &[Annotation] {
        &self.chain
    }

    /// Returns the label printed on the test's own line.
    pub fn leaf(&self) -> &LeafLabel {
        &self.leaf
    }

    /// Returns the test's identity with its last component removed.
    pub fn display_path(&self) -> &str {
        &self.display_path
    }

    /// Returns the key grouping this test with its neighbors, if known.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Returns the parametrization suffix: everything after the first `[` in the name.
    pub fn param_suffix(&self) -> Option<&str> {
        self.param_suffix.as_deref()
    }
}

fn group_chain(item: &TestItemSummary) -> Vec<Annotation> {
    // Annotations are closest-first, so reverse to get the outermost group first.
    let mut chain: Vec<_> = item
        .annotations
        .iter()
        .filter_map(|a| {
            let kind = AnnotationKind::from_name(&a.name)?;
            Some(Annotation::new(kind, a.first_arg()?))
        })
        .collect();
    chain.reverse();
    chain
}

fn leaf_label(
    item: &TestItemSummary,
    name: &str,
    base_name: &str,
    prefixes: &ImplicitItPrefixes,
) -> LeafLabel {
    let explicit = item
        .annotations_named(AnnotationSummary::IT)
        .find_map(|a| a.first_arg())
        .map(|label| label.to_owned());
    let label = explicit.or_else(|| prefixes.humanize(base_name));

    match label {
        Some(text) if !text.is_empty() => LeafLabel {
            text,
            has_explicit_it: true,
        },
        // An empty `it` label is treated as if there were no label at all.
        _ => LeafLabel {
            text: name.to_owned(),
            has_explicit_it: false,
        },
    }
}

fn display_path(id: &str) -> String {
    match id.rsplit_once("::") {
        Some((path, _)) => path.to_owned(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn extract(item: &TestItemSummary) -> SpecItem {
        SpecItem::new(item, &ImplicitItPrefixes::default())
    }

    #[test]
    fn chain_is_outer_to_inner() {
        // Closest-first: the `it` is on the function, then two contexts, then the describe.
        let item = TestItemSummary::new("test_mod.py::test_foo", "test_foo")
            .with_annotation(AnnotationSummary::it("Does something"))
            .with_annotation(AnnotationSummary::context("and also in another circumstance"))
            .with_annotation(AnnotationSummary::context("When called with no arguments"))
            .with_annotation(AnnotationSummary::describe("A basic foo"));
        let spec = extract(&item);

        assert_eq!(
            spec.chain(),
            [
                Annotation::new(AnnotationKind::Describe, "A basic foo"),
                Annotation::new(AnnotationKind::Context, "When called with no arguments"),
                Annotation::new(AnnotationKind::Context, "and also in another circumstance"),
            ]
        );
        assert_eq!(
            spec.leaf(),
            &LeafLabel {
                text: "Does something".to_owned(),
                has_explicit_it: true,
            }
        );
    }

    #[test]
    fn bare_and_unknown_annotations_are_dropped() {
        let item = TestItemSummary::new("test_mod.py::test_foo", "test_foo")
            .with_annotation(AnnotationSummary::bare("it"))
            .with_annotation(AnnotationSummary::bare("context"))
            .with_annotation(AnnotationSummary::new("slow", "very"))
            .with_annotation(AnnotationSummary::bare("describe"));
        let spec = extract(&item);

        assert!(spec.chain().is_empty());
        assert_eq!(
            spec.leaf(),
            &LeafLabel {
                text: "test_foo".to_owned(),
                has_explicit_it: false,
            }
        );
    }

    #[test]
    fn first_it_with_argument_wins() {
        let item = TestItemSummary::new("m.py::test_foo", "test_foo")
            .with_annotation(AnnotationSummary::bare("it"))
            .with_annotation(AnnotationSummary::it("Closest with argument"))
            .with_annotation(AnnotationSummary::it("Farther away"));
        assert_eq!(extract(&item).leaf().text, "Closest with argument");
    }

    #[test_case("test_it_does_something", "Does something", true; "implicit it")]
    #[test_case("test_it_does_something[a]", "Does something", true; "implicit it with param")]
    #[test_case("test_does_something", "test_does_something", false; "plain name")]
    #[test_case("test_it_", "test_it_", false; "prefix alone")]
    fn leaf_from_name(name: &str, text: &str, has_explicit_it: bool) {
        let item = TestItemSummary::new(format!("m.py::{name}"), name);
        let spec = extract(&item);
        assert_eq!(
            spec.leaf(),
            &LeafLabel {
                text: text.to_owned(),
                has_explicit_it,
            }
        );
    }

    #[test]
    fn explicit_it_beats_naming_convention() {
        let item = TestItemSummary::new("m.py::test_it_does_x", "test_it_does_x")
            .with_annotation(AnnotationSummary::it("Really does y"));
        assert_eq!(extract(&item).leaf().text, "Really does y");
    }

    #[test]
    fn empty_it_label_falls_back_to_name() {
        let item = TestItemSummary::new("m.py::test_it_does_x", "test_it_does_x")
            .with_annotation(AnnotationSummary::it(""));
        assert_eq!(
            extract(&item).leaf(),
            &LeafLabel {
                text: "test_it_does_x".to_owned(),
                has_explicit_it: false,
            }
        );
    }

    #[test_case("test_foo[a]", Some("a]"); "single param")]
    #[test_case("test_foo[a-b]", Some("a-b]"); "compound param")]
    #[test_case("test_foo[a[0]]", Some("a[0]]"); "nested brackets")]
    #[test_case("test_foo", None; "no param")]
    fn param_suffix(name: &str, expected: Option<&str>) {
        let item = TestItemSummary::new(format!("m.py::{name}"), name);
        assert_eq!(extract(&item).param_suffix(), expected);
    }

    #[test_case("tests/test_foo.py::TestSanity::test_x", "tests/test_foo.py::TestSanity"; "class")]
    #[test_case("tests/test_foo.py::test_x", "tests/test_foo.py"; "module")]
    #[test_case("test_x", ""; "bare")]
    fn display_paths(id: &str, expected: &str) {
        let item = TestItemSummary::new(id, "test_x");
        assert_eq!(extract(&item).display_path(), expected);
    }

    #[test]
    fn doctest_label() {
        let item = TestItemSummary::new("m.py::m.add", "m.add")
            .with_parent_module("m")
            .with_doctest(true);
        let spec = extract(&item);
        assert_eq!(spec.leaf().text, "m.add - [doctest]");
        assert!(!spec.leaf().has_explicit_it);
        assert_eq!(spec.group(), Some("m"));
    }

    #[test]
    fn missing_name_uses_identity() {
        let item = TestItemSummary::new("m.py::TestX::test_y", "");
        let spec = extract(&item);
        assert_eq!(spec.name(), "test_y");
        assert_eq!(spec.leaf().text, "test_y");
        assert_eq!(spec.group(), None);
    }
}
