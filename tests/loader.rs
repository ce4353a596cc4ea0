// SPDX-License-Identifier: PMPL-1.0-or-later

//! Clause-file loading through the filesystem.

use hornlog::kb::KnowledgeBase;
use hornlog::query;
use hornlog::storage::FactSetProvider;
use std::fs;

#[test]
fn test_load_file_and_query() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("family.pl");
    fs::write(
        &path,
        "% a small family tree\n\
         parent(john, bob).\n\
         parent(bob, alice).\n\
         \n\
         grandparent(X, Z) :- parent(X, Y), parent(Y, Z).\n",
    )
    .expect("write fixture");

    let mut kb = KnowledgeBase::new();
    let stats = kb.load_file(&path).expect("file should load");
    assert_eq!(stats.facts, 2);
    assert_eq!(stats.rules, 1);

    let solutions = query::query(&kb, "grandparent(john, ?Z)").unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].get("Z").unwrap().to_string(), "alice");
}

#[test]
fn test_missing_file_is_an_io_error() {
    let mut kb = KnowledgeBase::new();
    let err = kb.load_file("does/not/exist.pl").unwrap_err();
    assert!(format!("{:#}", err).contains("cannot open"));
}

#[test]
fn test_malformed_line_identifies_the_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.pl");
    fs::write(&path, "parent(john, bob).\nparent(bob, .\n").expect("write fixture");

    let mut kb = KnowledgeBase::new();
    let err = kb.load_file(&path).unwrap_err();
    let rendered = format!("{:#}", err);
    assert!(rendered.contains("line 2"), "got: {}", rendered);
}

#[test]
fn test_rule_body_commas_inside_brackets_do_not_split() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lists.pl");
    fs::write(
        &path,
        "append([], L, L).\n\
         append([H | T1], L, [H | T2]) :- append(T1, L, T2).\n\
         pair_of(X) :- append([X, X], [], [a, a]).\n",
    )
    .expect("write fixture");

    let mut kb = KnowledgeBase::new();
    kb.load_file(&path).expect("file should load");
    let solutions = query::query(&kb, "pair_of(?X)").unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].get("X").unwrap().to_string(), "a");
}

#[test]
fn test_provider_file_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kb_path = dir.path().join("rules.pl");
    let provider_path = dir.path().join("cities.pl");
    fs::write(
        &kb_path,
        "capital_of(norway, oslo).\n\
         known_city(X) :- city(X).\n",
    )
    .expect("write kb");
    fs::write(
        &provider_path,
        "% external city facts\n\
         city(oslo).\n\
         city(bergen).\n",
    )
    .expect("write provider");

    let mut kb = KnowledgeBase::new();
    kb.load_file(&kb_path).expect("kb should load");
    let provider = FactSetProvider::from_file(&provider_path).expect("provider should load");
    assert_eq!(provider.len(), 2);
    kb.add_provider(Box::new(provider));

    let solutions = query::query(&kb, "known_city(?C)").unwrap();
    let cities: Vec<String> = solutions
        .iter()
        .map(|s| s.get("C").unwrap().to_string())
        .collect();
    assert_eq!(cities, vec!["oslo", "bergen"]);
}

#[test]
fn test_provider_file_rejects_rules() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad_provider.pl");
    fs::write(&path, "p(X) :- q(X).\n").expect("write fixture");
    assert!(FactSetProvider::from_file(&path).is_err());
}
