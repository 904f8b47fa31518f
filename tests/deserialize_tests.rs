#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use tagbind::{node_kind, test_utils::*};

#[derive(Debug, Clone, Default)]
struct Section {
    title: String,
}

#[derive(Debug, Clone, Default)]
struct Known {
    id: String,
    position: Vector3<f64>,
    enabled: bool,
}

#[derive(Debug, Clone, Default)]
struct Leaf;

impl NodeType for Section {
    const NAME: &'static str = "Section";
    const FIELDS: &'static [Field<Self>] = &[Field {
        name: "Title",
        bind: |section, value| assign(&mut section.title, value),
    }];
}

impl NodeType for Known {
    const NAME: &'static str = "Known";
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "Id",
            bind: |known, value| assign(&mut known.id, value),
        },
        Field {
            name: "Position",
            bind: |known, value| assign(&mut known.position, value),
        },
        Field {
            name: "Enabled",
            bind: |known, value| assign(&mut known.enabled, value),
        },
    ];

    fn key(&self) -> String {
        self.id.clone()
    }
}

impl NodeType for Leaf {
    const NAME: &'static str = "Leaf";
    const FIELDS: &'static [Field<Self>] = &[];
}

node_kind! {
    enum Scene {
        Section(Section),
        Known(Known),
        Leaf(Leaf),
    }
}

fn deserializer() -> Deserializer<Scene> {
    let deserializer = Deserializer::new();
    deserializer
        .register::<Section>("Root")
        .register::<Section>("Section")
        .register::<Known>("Known")
        .register::<Leaf>("Leaf");
    deserializer
}

#[test]
fn test_unregistered_subtree_skipped() {
    let tree = deserializer()
        .deserialize(UNKNOWN_SUBTREE)
        .unwrap()
        .expect("root is registered");

    let root = tree.root();
    assert_eq!(tree.children(root).len(), 1);
    assert_eq!(tree.find::<Known>(root).len(), 1);
    assert_eq!(tree.count(), 2);
}

#[test]
fn test_deep_find() {
    let tree = deserializer()
        .deserialize("<Root><Section><Leaf/></Section></Root>")
        .unwrap()
        .unwrap();

    let found = tree.find::<Leaf>(tree.root());
    assert_eq!(found.len(), 1);
    let leaf = *found.first().unwrap();
    let section = tree.parent(leaf).unwrap();
    assert_eq!(tree.parent(section), Some(tree.root()));
}

#[test]
fn test_find_order_and_keys() {
    let xml = r#"<Root>
        <Section><Known Id="nested"/></Section>
        <Known Id="first"/>
        <Known Id="second"/>
    </Root>"#;
    let tree = deserializer().deserialize(xml).unwrap().unwrap();
    let root = tree.root();

    let ids: Vec<_> = tree
        .find::<Known>(root)
        .into_iter()
        .map(|id| tree.payload::<Known>(id).unwrap().id.as_str())
        .collect();
    assert_eq!(ids, vec!["first", "second", "nested"]);

    let nested = tree.find_by_key::<Known>(root, "nested");
    assert_eq!(nested.len(), 1);
    assert!(tree.find_by_key::<Known>(root, "NESTED").is_empty());
}

#[test]
fn test_field_binding() {
    let tree = deserializer()
        .deserialize(
            r#"<Root title="Scene"><Known id="k" POSITION="1,2" enabled="TRUE" Extra="ignored">  body  </Known></Root>"#,
        )
        .unwrap()
        .unwrap();

    assert_eq!(tree.payload::<Section>(tree.root()).unwrap().title, "Scene");
    let known_id = *tree.find::<Known>(tree.root()).first().unwrap();
    let known = tree.payload::<Known>(known_id).unwrap();
    assert_eq!(known.id, "k");
    assert_eq!(known.position, Vector3::new(1.0, 2.0, 0.0));
    assert!(known.enabled);
    assert_eq!(tree.value(known_id), Some("  body  "));
}

#[test]
fn test_bad_values_fall_back_to_defaults() {
    let tree = deserializer()
        .deserialize(r#"<Root><Known Id="k" Position="1,2,3,4" Enabled="maybe"/></Root>"#)
        .unwrap()
        .unwrap();

    let known = tree.find_first::<Known>(tree.root()).unwrap();
    assert_eq!(known.id, "k");
    assert_eq!(known.position, Vector3::default());
    assert!(!known.enabled);
}

#[test]
fn test_tag_names_are_case_sensitive() {
    let tree = deserializer()
        .deserialize("<Root><known/><KNOWN/><Known/></Root>")
        .unwrap()
        .unwrap();
    assert_eq!(tree.children(tree.root()).len(), 1);
}

#[test]
fn test_typed_entry_point() {
    let deserializer = deserializer();
    assert!(deserializer
        .deserialize_as::<Section>("<Root/>")
        .unwrap()
        .is_some());
    assert!(deserializer
        .deserialize_as::<Known>("<Root/>")
        .unwrap()
        .is_none());
    assert!(deserializer
        .deserialize_as::<Known>("<Known/>")
        .unwrap()
        .is_some());
}

#[test]
fn test_register_named() {
    let deserializer = Deserializer::<Scene>::new();
    deserializer
        .register_named("Section", "Root")
        .register_named("NotANode", "Other");
    assert_eq!(deserializer.tags(), vec!["Root".to_string()]);
}

#[test]
fn test_document_reuse() {
    let doc = Document::parse_str(UNKNOWN_SUBTREE).unwrap();
    let deserializer = deserializer();
    let first = deserializer.deserialize_document(&doc).unwrap();
    let mut second = deserializer.deserialize_document(&doc).unwrap();

    let root = second.root();
    second.remove_type::<Known>(root);
    assert_eq!(first.children(first.root()).len(), 1);
    assert!(second.children(root).is_empty());
}

#[test]
fn test_structural_errors_propagate() {
    let result = deserializer().deserialize(r#"<Root><Known Id="a" ID="b"/></Root>"#);
    assert!(matches!(
        result.map_err(|e| e.kind().clone()),
        Err(ParseErrorKind::Structure(StructureError::DuplicateAttribute(_)))
    ));
}
