//! End-to-end load pass: schema + policy + data files from disk.

use std::fs;

use facts_content::{DataFactory, DataLoader, ObjectStore};
use facts_core::{FactValue, LoadContext, ObjectKind};

const FACTS_RON: &str = r#"[
    (name: "SIZE", kind: "CREATURE", format: Enumerated(["FINE", "SMALL", "MEDIUM", "LARGE"])),
    (name: "LEGS", kind: "CREATURE", format: Integer),
    (name: "PATRON", kind: "CREATURE", format: Reference("DEITY")),
    (name: "HOLY", kind: "DEITY", format: Boolean),
]"#;

const CREATURES_LST: &str = "\
# test creatures\n\
Ogre\tFACT:LEGS|2\tFACT:SIZE|LARGE\tFACT:PATRON|Grummsh\n\
Wisp\tFACT:SIZE|.CLEAR\tFACT:SIZE|SMALL\n\
Blob\tFACT:SIZE|COLOSSAL\n";

const DEITIES_LST: &str = "Grummsh\tFACT:HOLY|NO\n";

fn creature() -> ObjectKind {
    ObjectKind::new("CREATURE")
}

fn deity() -> ObjectKind {
    ObjectKind::new("DEITY")
}

#[test]
fn full_pass_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("facts.ron"), FACTS_RON).unwrap();
    fs::write(dir.path().join("policy.toml"), "duplicate-facts = \"last-wins\"\n").unwrap();
    fs::write(dir.path().join("creatures.lst"), CREATURES_LST).unwrap();
    fs::write(dir.path().join("deities.lst"), DEITIES_LST).unwrap();

    let factory = DataFactory::new(dir.path());
    let schema = factory.load_schema().unwrap();
    let policy = factory.load_policy().unwrap();
    let mut store = ObjectStore::new();

    // Creatures load first: PATRON references a deity that does not exist yet.
    let report = factory
        .load_data_file(&schema, policy, "creatures.lst", &creature(), &mut store)
        .unwrap();
    // Blob's SIZE is not a declared category; everything else applies.
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].code, "PARSE_CONVERSION");
    assert_eq!(report.issues[0].line, 4);
    assert_eq!(report.applied, 5);

    let report = factory
        .load_data_file(&schema, policy, "deities.lst", &deity(), &mut store)
        .unwrap();
    assert!(report.is_clean());

    // The deferred PATRON reference now resolves against the loaded deity.
    let ogre = store.lookup(&creature(), "Ogre").unwrap();
    let grummsh = store.lookup(&deity(), "Grummsh").unwrap();
    let patron_key = schema
        .registry
        .lookup(&creature(), "PATRON")
        .unwrap()
        .fact_key();
    let patron = store.get(ogre, patron_key).unwrap();
    assert_eq!(patron.unconverted(), "Grummsh");
    assert_eq!(patron.resolve(&store).unwrap(), FactValue::Object(grummsh));

    // Serialization reproduces the surviving state, clear markers included.
    let loader = DataLoader::new(&schema.tokens, policy);
    let emitted = loader.unparse_str(&store, &creature());
    assert_eq!(
        emitted,
        "Ogre\tFACT:LEGS|2\tFACT:PATRON|Grummsh\tFACT:SIZE|LARGE\n\
         Wisp\tFACT:SIZE|.CLEAR\tFACT:SIZE|SMALL\n\
         Blob\n"
    );

    // Loading the emitted text yields the same bytes again.
    let mut store2 = ObjectStore::new();
    let report = loader.load_str("emitted", &creature(), &emitted, &mut store2);
    assert!(report.is_clean());
    assert_eq!(loader.unparse_str(&store2, &creature()), emitted);
}

#[test]
fn missing_policy_file_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("facts.ron"), FACTS_RON).unwrap();

    let factory = DataFactory::new(dir.path());
    let policy = factory.load_policy().unwrap();
    assert_eq!(policy, facts_content::LoadPolicy::default());
}

#[test]
fn missing_schema_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let factory = DataFactory::new(dir.path());
    let err = factory.load_schema().unwrap_err();
    assert!(err.to_string().contains("facts.ron"));
}
