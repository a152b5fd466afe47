//! Volume overlap and expansion tests

use proptest::prelude::*;
use rstest::rstest;
use serde_json::json;
use ysenv_core::{FieldSet, Source, merge, resolve_volumes};
use ysenv_fs::NormalizedPath;

fn fields(volume: serde_json::Value) -> FieldSet {
    let mut fields = FieldSet::new();
    let raw = json!({ "volume": volume });
    merge(&mut fields, &Source::Instance, raw.as_object().unwrap()).unwrap();
    fields
}

fn specs(volume: serde_json::Value, container_home: Option<&str>) -> Vec<String> {
    let home = NormalizedPath::new("/home/dev");
    resolve_volumes(&fields(volume), &home, container_home)
        .unwrap()
        .unwrap()
        .iter()
        .map(|entry| entry.to_spec())
        .collect()
}

#[test]
fn distinct_nested_paths_are_all_kept() {
    assert_eq!(
        specs(json!(["/a:/x", "/b:/x/y", "/c:/z"]), Some("/")),
        vec!["/a:/x", "/b:/x/y", "/c:/z"]
    );
}

#[test]
fn later_equal_path_drops_earlier() {
    assert_eq!(
        specs(json!(["/a:/x", "/b:/x/y", "/c:/z", "/d:/x"]), Some("/")),
        vec!["/b:/x/y", "/c:/z", "/d:/x"]
    );
}

#[rstest]
#[case("~/foo:~/bar", Some("/root"), "/home/dev/foo:/root/bar")]
#[case("~/foo:~/bar", Some("/"), "/home/dev/foo:/bar")]
#[case("~/foo:~/bar", Some(""), "/home/dev/foo:/home/dev/bar")]
#[case("~/foo:~/bar", None, "/home/dev/foo:/home/dev/bar")]
#[case("/srv//data/:/data:ro", None, "/srv/data:/data:ro")]
#[case("/a:/b::extra", None, "/a:/b")]
#[case("/a:/b:ro:extra", None, "/a:/b:ro")]
fn spec_normalization(
    #[case] spec: &str,
    #[case] container_home: Option<&str>,
    #[case] expected: &str,
) {
    assert_eq!(specs(json!([spec]), container_home), vec![expected]);
}

#[test]
fn absent_volume_field_resolves_to_none() {
    let home = NormalizedPath::new("/home/dev");
    let resolved = resolve_volumes(&FieldSet::new(), &home, None).unwrap();
    assert!(resolved.is_none());
}

#[test]
fn numbers_in_volume_list_are_malformed_specs() {
    let home = NormalizedPath::new("/home/dev");
    let err = resolve_volumes(&fields(json!([42])), &home, None).unwrap_err();
    assert!(err.to_string().contains("\"42\""));
}

const PATHS: &[&str] = &["/x", "/x/y", "/x/y/z", "/z", "/xy"];

proptest! {
    /// Each distinct container path survives exactly once, as its latest
    /// declaration, and survivors keep declaration order.
    #[test]
    fn one_survivor_per_container_path(picks in prop::collection::vec(0..PATHS.len(), 0..10)) {
        let declared: Vec<String> = picks
            .iter()
            .enumerate()
            .map(|(i, p)| format!("/h{}:{}", i, PATHS[*p]))
            .collect();
        let survivors = specs(json!(declared), None);

        let mut expected: Vec<(usize, String)> = Vec::new();
        for (i, p) in picks.iter().enumerate() {
            let later = picks[i + 1..].contains(p);
            if !later {
                expected.push((i, format!("/h{}:{}", i, PATHS[*p])));
            }
        }
        let expected: Vec<String> = expected.into_iter().map(|(_, s)| s).collect();
        prop_assert_eq!(survivors, expected);
    }
}
