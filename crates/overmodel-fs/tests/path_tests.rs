use overmodel_fs::NormalizedPath;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case("app.yaml", 0)]
#[case(".app.yaml", 0)]
#[case("env/.app.yaml", 1)]
#[case("env/prod/.app.yaml", 2)]
#[case("a/b/c/d.properties", 3)]
fn depth_counts_separators(#[case] input: &str, #[case] expected: usize) {
    assert_eq!(NormalizedPath::new(input).depth(), expected);
}

#[rstest]
#[case("models", "env/prod/.app.yaml", "models/env/prod/.app.yaml")]
#[case("models/", "app.yaml", "models/app.yaml")]
#[case("", "app.yaml", "app.yaml")]
#[case("models", "/app.yaml", "models/app.yaml")]
fn join_produces_single_separator(
    #[case] base: &str,
    #[case] segment: &str,
    #[case] expected: &str,
) {
    assert_eq!(NormalizedPath::new(base).join(segment).as_str(), expected);
}

#[test]
fn backslashes_are_normalized() {
    let path = NormalizedPath::new("env\\prod\\.app.yaml");
    assert_eq!(path.as_str(), "env/prod/.app.yaml");
    assert_eq!(path.file_name(), Some(".app.yaml"));
}

proptest! {
    #[test]
    fn join_adds_depth(
        base in "[a-z]{1,8}(/[a-z]{1,8}){0,3}",
        rel in "[a-z.]{1,8}(/[a-z.]{1,8}){0,3}",
    ) {
        let base = NormalizedPath::new(&base);
        let rel = NormalizedPath::new(&rel);
        let joined = base.join(rel.as_str());
        prop_assert_eq!(joined.depth(), base.depth() + rel.depth() + 1);
        prop_assert!(joined.as_str().ends_with(rel.as_str()));
    }

    #[test]
    fn normalized_paths_have_no_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));
    }
}
