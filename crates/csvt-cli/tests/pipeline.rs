use std::path::PathBuf;

use csvt_cli::pipeline::{
    extract_map, rmfields_streams, select_streams, unzip_streams, zip_streams,
};
use csvt_map::DuplicatePolicy;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "csvt-cli-test-{tag}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

const INPUT: &str = "b,a,c\nb1,a1,c1\nb2,a2,c2\nb1,a1,c3\n";

#[test]
fn extract_map_creates_store_and_appends_across_runs() {
    let dir = temp_dir("extract");
    let map_file = dir.join("ab.csv");

    let mut output = Vec::new();
    let stats = extract_map(
        "a,other=b",
        "id=ab_id",
        &map_file,
        DuplicatePolicy::default(),
        INPUT.as_bytes(),
        &mut output,
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "b,a,c,ab_id\nb1,a1,c1,1\nb2,a2,c2,2\nb1,a1,c3,1\n"
    );
    assert_eq!(
        std::fs::read_to_string(&map_file).unwrap(),
        "id,a,other\n1,a1,b1\n2,a2,b2\n"
    );
    assert_eq!(stats.minted, 2);

    // Second run: known tuples are reused, the new one is appended.
    let second_input = "b,a,c\nb1,a1,c9\nb3,a3,c9\n";
    let mut output = Vec::new();
    let stats = extract_map(
        "a,other=b",
        "id=ab_id",
        &map_file,
        DuplicatePolicy::default(),
        second_input.as_bytes(),
        &mut output,
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "b,a,c,ab_id\nb1,a1,c9,1\nb3,a3,c9,3\n"
    );
    assert_eq!(
        std::fs::read_to_string(&map_file).unwrap(),
        "id,a,other\n1,a1,b1\n2,a2,b2\n3,a3,b3\n"
    );
    assert_eq!(stats.minted, 1);
    assert_eq!(stats.max_ref, 3);
}

#[test]
fn extract_map_accepts_reordered_field_specs_on_reopen() {
    let dir = temp_dir("reorder");
    let map_file = dir.join("ab.csv");

    let mut output = Vec::new();
    extract_map(
        "a,other=b",
        "id=ab_id",
        &map_file,
        DuplicatePolicy::default(),
        INPUT.as_bytes(),
        &mut output,
    )
    .unwrap();

    // Same field set, different logical order: the store still matches and
    // keeps its physical column order on disk.
    let mut output = Vec::new();
    extract_map(
        "other=b,a",
        "id=ab_id",
        &map_file,
        DuplicatePolicy::default(),
        "b,a\nb4,a4\n".as_bytes(),
        &mut output,
    )
    .unwrap();

    assert_eq!(
        std::fs::read_to_string(&map_file).unwrap(),
        "id,a,other\n1,a1,b1\n2,a2,b2\n3,a4,b4\n"
    );
}

#[test]
fn extract_map_failed_creation_leaves_nothing_behind() {
    let dir = temp_dir("invalid-spec");
    let map_file = dir.join("ab.csv");

    // Reference field also listed as an attribute: construction fails
    // before anything is written, and no empty store file survives it.
    let mut output = Vec::new();
    let result = extract_map(
        "a,b",
        "a",
        &map_file,
        DuplicatePolicy::default(),
        INPUT.as_bytes(),
        &mut output,
    );
    assert!(result.is_err());
    assert!(output.is_empty());
    assert!(!map_file.exists());

    // The path is not poisoned: a valid run still creates the store.
    let mut output = Vec::new();
    extract_map(
        "a,other=b",
        "id=ab_id",
        &map_file,
        DuplicatePolicy::default(),
        INPUT.as_bytes(),
        &mut output,
    )
    .unwrap();
    assert_eq!(
        std::fs::read_to_string(&map_file).unwrap(),
        "id,a,other\n1,a1,b1\n2,a2,b2\n"
    );
}

#[test]
fn extract_map_repairs_store_without_final_newline() {
    let dir = temp_dir("no-newline");
    let map_file = dir.join("ab.csv");
    std::fs::write(&map_file, "id,a,other\n1,a1,b1").unwrap();

    let mut output = Vec::new();
    extract_map(
        "a,other=b",
        "id=ab_id",
        &map_file,
        DuplicatePolicy::default(),
        "b,a\nb1,a1\nb2,a2\n".as_bytes(),
        &mut output,
    )
    .unwrap();

    // The appended mapping lands on its own line, not spliced onto the
    // store's last record.
    assert_eq!(
        std::fs::read_to_string(&map_file).unwrap(),
        "id,a,other\n1,a1,b1\n2,a2,b2\n"
    );
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "b,a,ab_id\nb1,a1,1\nb2,a2,2\n"
    );
}

#[test]
fn extract_map_rejects_foreign_store_without_touching_it() {
    let dir = temp_dir("foreign");
    let map_file = dir.join("ab.csv");
    std::fs::write(&map_file, "id,a,unrelated\n1,a1,x\n").unwrap();

    let mut output = Vec::new();
    let result = extract_map(
        "a,other=b",
        "id=ab_id",
        &map_file,
        DuplicatePolicy::default(),
        INPUT.as_bytes(),
        &mut output,
    );

    assert!(result.is_err());
    assert!(output.is_empty());
    assert_eq!(
        std::fs::read_to_string(&map_file).unwrap(),
        "id,a,unrelated\n1,a1,x\n"
    );
}

#[test]
fn unzip_then_zip_reconstructs_the_columns() {
    let mut spec = Vec::new();
    let mut rest = Vec::new();
    unzip_streams(INPUT.as_bytes(), "b", "row_id", &mut spec, &mut rest).unwrap();

    assert_eq!(
        String::from_utf8(spec.clone()).unwrap(),
        "row_id,b\n0,b1\n1,b2\n2,b1\n"
    );
    assert_eq!(
        String::from_utf8(rest.clone()).unwrap(),
        "row_id,a,c\n0,a1,c1\n1,a2,c2\n2,a1,c3\n"
    );

    let mut zipped = Vec::new();
    zip_streams(spec.as_slice(), rest.as_slice(), false, &mut zipped).unwrap();
    assert_eq!(
        String::from_utf8(zipped).unwrap(),
        "b,a,c\nb1,a1,c1\nb2,a2,c2\nb1,a1,c3\n"
    );
}

#[test]
fn select_renames_and_reorders() {
    let mut output = Vec::new();
    select_streams(INPUT.as_bytes(), "c,first=a", &mut output).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "c,first\nc1,a1\nc2,a2\nc3,a1\n"
    );
}

#[test]
fn rmfields_drops_columns() {
    let mut output = Vec::new();
    rmfields_streams(INPUT.as_bytes(), "b", &mut output).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "a,c\na1,c1\na2,c2\na1,c3\n"
    );
}
