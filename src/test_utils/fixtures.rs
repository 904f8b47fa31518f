pub const TEST_FILES: [&str; 2] = ["tests/input/small.xml", "tests/input/uploads.xml"];

/// Root `A`, child `B`, grandchild `C`
pub const NESTED: &str = "<A><B><C/></B></A>";

/// `Known` appears once directly under the root and once under `Unknown`
pub const UNKNOWN_SUBTREE: &str = "<Root><Known/><Unknown><Known/></Unknown></Root>";

pub const DUPLICATE_ATTRIBUTE_SAMPLES: [(&str, &str); 3] = [
    (r#"<Root Id="1" id="2"/>"#, "Case differs"),
    (r#"<Root><Video File="a" FILE="b"/></Root>"#, "Nested tag"),
    (r#"<Root Title="x" Title="y"/>"#, "Exact repeat"),
];

pub const MALFORMED_SAMPLES: [(&str, &str); 3] = [
    (r#"<Root File="a></Root>"#, "Unterminated attribute value"),
    ("<Root a=1/>", "Unquoted attribute value"),
    ("<Root>&bogus;</Root>", "Unknown entity"),
];

/// Markup the builder absorbs without failing
pub const UNBALANCED_SAMPLES: [(&str, &str); 3] = [
    ("<Root></Root></Root>", "Extra end tag"),
    ("<Root><Open>", "Missing end tags"),
    ("</Stray><Root/>", "End tag before root"),
];
