#![allow(non_snake_case)]

use super::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ORDER_SOURCE: &str = r#"package shop

// Order is a customer purchase.
// gen:topb
type Order struct {
	ID    int
	Total float64
}
"#;

fn driver() -> Driver {
    Driver::new(GenerateConfig {
        wire_import: Some("example.com/shop/pb".to_string()),
        ..GenerateConfig::default()
    })
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn process___eligible_struct___writes_output_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "order.go", ORDER_SOURCE);

    let report = driver().process(&SourceInput::new(&input));

    let expected_output = dir.path().join("autogen_topb_order.go");
    match &report.outcome {
        Outcome::Written { output, types } => {
            assert_eq!(*output, expected_output);
            assert_eq!(*types, 1);
        }
        other => panic!("expected Written, got {other:?}"),
    }
    assert_eq!(
        read(&expected_output),
        "package shop\n\
         \n\
         import \"example.com/shop/pb\"\n\
         \n\
         func (m *Order) ToPb() *pb.Order {\n\
         \treturn &pb.Order{\n\
         \t\tID:    m.ID,\n\
         \t\tTotal: m.Total,\n\
         \t}\n\
         }\n"
    );
}

#[test]
fn process___no_marker___writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "plain.go", "package shop\n\ntype Plain struct{ ID int }\n");

    let report = driver().process(&SourceInput::new(&input));

    assert!(matches!(report.outcome, Outcome::NoEligibleTypes));
    assert!(!dir.path().join("autogen_topb_plain.go").exists());
}

#[test]
fn process___no_marker___keeps_stale_output_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "plain.go", "package shop\n\ntype Plain struct{ ID int }\n");
    let stale = write(&dir, "autogen_topb_plain.go", "package shop\n");

    let report = driver().process(&SourceInput::new(&input));

    assert!(matches!(report.outcome, Outcome::NoEligibleTypes));
    assert!(stale.exists());
}

#[test]
fn process___prune_stale___removes_orphaned_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "plain.go", "package shop\n\ntype Plain struct{ ID int }\n");
    let stale = write(&dir, "autogen_topb_plain.go", "package shop\n");
    let driver = Driver::new(GenerateConfig {
        prune_stale: true,
        ..GenerateConfig::default()
    });

    let report = driver.process(&SourceInput::new(&input));

    assert!(matches!(report.outcome, Outcome::Pruned { ref output } if *output == stale));
    assert!(!stale.exists());
}

#[test]
fn process___missing_wire_import___fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "order.go", ORDER_SOURCE);

    let report = Driver::new(GenerateConfig::default()).process(&SourceInput::new(&input));

    assert!(matches!(
        report.outcome,
        Outcome::Failed(TopbError::MissingWireImport { .. })
    ));
    assert!(!dir.path().join("autogen_topb_order.go").exists());
}

#[test]
fn process___directive_import___overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "order.go", ORDER_SOURCE);

    driver().process(&SourceInput {
        path: input,
        wire_import: Some("example.com/other/pb".to_string()),
    });

    let text = read(&dir.path().join("autogen_topb_order.go"));
    assert!(text.contains("import \"example.com/other/pb\"\n"));
}

#[test]
fn process___embedded_field___fails_whole_unit() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        &dir,
        "order.go",
        "package shop\n\n// gen:topb\ntype Order struct {\n\tBase\n\tID int\n}\n\n// gen:topb\ntype Item struct{ SKU string }\n",
    );

    let report = driver().process(&SourceInput::new(&input));

    assert!(matches!(
        report.outcome,
        Outcome::Failed(TopbError::EmbeddedField { .. })
    ));
    assert!(!dir.path().join("autogen_topb_order.go").exists());
}

#[test]
fn process___parse_error___is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "broken.go", "package shop\n\ntype Order struct {\n");

    let report = driver().process(&SourceInput::new(&input));

    assert!(matches!(report.outcome, Outcome::Failed(ref e) if e.is_load_error()));
    assert!(report.to_string().starts_with("failed "));
}

#[test]
fn run___malformed_file___does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(&dir, "a_order.go", ORDER_SOURCE);
    let bad = write(&dir, "b_broken.go", "package shop\n\ntype Broken struct {\n");
    let other = write(
        &dir,
        "c_item.go",
        "package shop\n\n// gen:topb\ntype Item struct{ SKU string }\n",
    );

    let report = driver()
        .run(&Discovery::Explicit(vec![good, bad.clone(), other]))
        .unwrap();

    assert_eq!(report.files.len(), 3);
    assert_eq!(report.written(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.files[1].input, bad);
    assert!(dir.path().join("autogen_topb_a_order.go").exists());
    assert!(dir.path().join("autogen_topb_c_item.go").exists());
}

// FileReport display

#[test]
fn FileReport___display___written_uses_singular() {
    let report = FileReport {
        input: PathBuf::from("order.go"),
        outcome: Outcome::Written {
            output: PathBuf::from("autogen_topb_order.go"),
            types: 1,
        },
    };

    assert_eq!(report.to_string(), "generated autogen_topb_order.go (1 type)");
}

#[test]
fn FileReport___display___skipped_names_input() {
    let report = FileReport {
        input: PathBuf::from("plain.go"),
        outcome: Outcome::NoEligibleTypes,
    };

    assert_eq!(report.to_string(), "skipped plain.go: no eligible types");
}
