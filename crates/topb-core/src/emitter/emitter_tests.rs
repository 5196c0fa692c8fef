#![allow(non_snake_case)]

use super::*;

fn named(name: &str, ty: &str) -> Field {
    Field {
        name: Some(name.to_string()),
        ty: ty.to_string(),
    }
}

fn struct_decl(name: &str, fields: Vec<Field>) -> TypeDeclaration {
    TypeDeclaration {
        name: name.to_string(),
        body: TypeBody::Struct(fields),
        has_type_params: false,
        doc: Some("// gen:topb".to_string()),
        group_doc: None,
        line: 1,
    }
}

fn order() -> TypeDeclaration {
    struct_decl(
        "Order",
        vec![named("ID", "int"), named("Total", "float64")],
    )
}

// emit_method tests

#[test]
fn emit_method___order___copies_fields_by_name() {
    let method = emit_method(&order(), &GenerateConfig::default()).unwrap();

    assert_eq!(
        method,
        "func (m *Order) ToPb() *pb.Order {\n\
         \treturn &pb.Order{\n\
         \t\tID:    m.ID,\n\
         \t\tTotal: m.Total,\n\
         \t}\n\
         }\n"
    );
}

#[test]
fn emit_method___field_order___follows_declaration() {
    let decl = struct_decl(
        "Line",
        vec![named("Zeta", "int"), named("Alpha", "int"), named("Mid", "int")],
    );

    let method = emit_method(&decl, &GenerateConfig::default()).unwrap();

    let zeta = method.find("Zeta:").unwrap();
    let alpha = method.find("Alpha:").unwrap();
    let mid = method.find("Mid:").unwrap();
    assert!(zeta < alpha && alpha < mid);
}

#[test]
fn emit_method___empty_struct___returns_empty_literal() {
    let decl = struct_decl("Ping", vec![]);

    let method = emit_method(&decl, &GenerateConfig::default()).unwrap();

    assert_eq!(
        method,
        "func (m *Ping) ToPb() *pb.Ping {\n\treturn &pb.Ping{}\n}\n"
    );
}

#[test]
fn emit_method___custom_names___uses_config() {
    let config = GenerateConfig {
        receiver: "o".to_string(),
        method_name: "ToProto".to_string(),
        wire_alias: "shoppb".to_string(),
        ..GenerateConfig::default()
    };

    let method = emit_method(&order(), &config).unwrap();

    assert!(method.starts_with("func (o *Order) ToProto() *shoppb.Order {\n"));
    assert!(method.contains("\t\tID:    o.ID,\n"));
}

#[test]
fn emit_method___blank_field___is_skipped() {
    let decl = struct_decl("Padded", vec![named("_", "[4]byte"), named("N", "int")]);

    let method = emit_method(&decl, &GenerateConfig::default()).unwrap();

    assert!(!method.contains("_:"));
    assert!(method.contains("\t\tN: m.N,\n"));
}

#[test]
fn emit_method___embedded_field___is_rejected() {
    let decl = struct_decl(
        "Order",
        vec![
            Field {
                name: None,
                ty: "*Base".to_string(),
            },
            named("ID", "int"),
        ],
    );

    let err = emit_method(&decl, &GenerateConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        TopbError::EmbeddedField { ref type_name, ref field_type }
            if type_name == "Order" && field_type == "*Base"
    ));
}

#[test]
fn emit_method___generic_struct___is_rejected() {
    let mut decl = struct_decl("Page", vec![named("Items", "[]T")]);
    decl.has_type_params = true;

    let err = emit_method(&decl, &GenerateConfig::default()).unwrap_err();

    assert!(matches!(err, TopbError::GenericType { .. }));
}

#[test]
fn emit_method___non_struct___is_rejected() {
    let mut decl = order();
    decl.body = TypeBody::Alias;

    let err = emit_method(&decl, &GenerateConfig::default()).unwrap_err();

    assert!(matches!(err, TopbError::NotAStruct { .. }));
}

// GeneratedArtifact tests

#[test]
fn GeneratedArtifact___render___two_types_share_one_import() {
    let first = order();
    let second = struct_decl("Item", vec![named("SKU", "string")]);
    let config = GenerateConfig::default();

    let artifact =
        GeneratedArtifact::build("shop", &[&first, &second], "example.com/shop/pb", &config)
            .unwrap();
    let text = artifact.render();

    assert!(text.starts_with("package shop\n\nimport \"example.com/shop/pb\"\n\n"));
    assert_eq!(text.matches("import").count(), 1);
    assert_eq!(text.matches("package ").count(), 1);
    assert!(text.contains("func (m *Order) ToPb() *pb.Order {"));
    assert!(text.contains("func (m *Item) ToPb() *pb.Item {"));
    assert!(text.find("*Order)").unwrap() < text.find("*Item)").unwrap());
}

#[test]
fn GeneratedArtifact___render___header_precedes_package() {
    let decl = order();
    let config = GenerateConfig {
        header: true,
        ..GenerateConfig::default()
    };

    let text = GeneratedArtifact::build("shop", &[&decl], "example.com/pb", &config)
        .unwrap()
        .render();

    assert!(text.starts_with("// Code generated by topb. DO NOT EDIT.\n\npackage shop\n"));
}

#[test]
fn GeneratedArtifact___render___aliases_mismatched_import() {
    let decl = order();
    let config = GenerateConfig::default();

    let text = GeneratedArtifact::build("shop", &[&decl], "example.com/shop/gen/v1", &config)
        .unwrap()
        .render();

    assert!(text.contains("import pb \"example.com/shop/gen/v1\"\n"));
}

#[test]
fn GeneratedArtifact___render___is_deterministic() {
    let decl = order();
    let config = GenerateConfig::default();

    let first = GeneratedArtifact::build("shop", &[&decl], "example.com/pb", &config)
        .unwrap()
        .render();
    let second = GeneratedArtifact::build("shop", &[&decl], "example.com/pb", &config)
        .unwrap()
        .render();

    assert_eq!(first, second);
}

#[test]
fn GeneratedArtifact___build___one_bad_type_fails_artifact() {
    let good = order();
    let mut generic = struct_decl("Page", vec![]);
    generic.has_type_params = true;

    let result = GeneratedArtifact::build(
        "shop",
        &[&good, &generic],
        "example.com/pb",
        &GenerateConfig::default(),
    );

    assert!(result.is_err());
}
