#![no_main]
use libfuzzer_sys::fuzz_target;
use tagbind::Document;

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = Document::parse_bytes(data) {
        let copy = doc.root().deep_clone();
        assert!(copy.root() == doc.root());
        assert_eq!(copy.root().count(), doc.root().count());
    }
});
