#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use std::fs;

use tagbind::{test_utils::*, uploads::deserializer};

#[test]
fn test_plan_from_document() {
    let data = TestData::load().unwrap();
    let plan = UploadPlan::parse(&data.uploads).unwrap().expect("Uploads root");

    assert_eq!(plan.settings.application, "Channel Uploader");
    assert_eq!(plan.settings.secret, "secret.json");

    // The video under <Notes> is never reached
    let files: Vec<_> = plan.videos.iter().map(|v| v.file.as_str()).collect();
    assert_eq!(
        files,
        vec!["videos/episode1.mp4", "videos/episode2.mp4", "videos/episode3.mp4"]
    );
}

#[test]
fn test_video_fields() {
    let plan = UploadPlan::parse(include_str!("input/uploads.xml"))
        .unwrap()
        .unwrap();
    let [first, second, third] = plan.videos.as_slice() else {
        panic!("expected three videos");
    };

    assert_eq!(first.description, "First episode & trailer");
    assert_eq!(first.tags, vec!["series", "episode", "one"]);
    assert_eq!(first.category, Category::Entertainment);
    assert_eq!(first.category.id(), 24);
    assert_eq!(first.privacy, Privacy::Unlisted);
    assert!(first.has_thumbnail());
    assert_eq!(first.channel(), "user");

    assert_eq!(second.privacy, Privacy::Private);
    assert_eq!(second.channel(), "UC-second");
    assert!(!second.has_thumbnail());

    // Enum names are case-sensitive on plain fields
    assert_eq!(third.category, Category::PeopleAndBlogs);
    assert_eq!(third.privacy, Privacy::Public);
}

#[test]
fn test_keyed_lookup() {
    let tree = deserializer()
        .deserialize(include_str!("input/uploads.xml"))
        .unwrap()
        .unwrap();
    let found = tree.find_by_key::<Video>(tree.root(), "videos/episode2.mp4");
    assert_eq!(found.len(), 1);

    let id = *found.first().unwrap();
    assert_eq!(tree.value(id).map(str::trim), Some("Second part of the series"));
    assert!(matches!(tree.kind(id), Some(UploadNode::Video(_))));
}

#[test]
fn test_non_upload_root() {
    assert!(UploadPlan::parse("<Playlist/>").unwrap().is_none());
    assert!(UploadPlan::parse(r#"<Video File="a.mp4"/>"#)
        .unwrap()
        .is_none());
}

#[test]
fn test_validate_against_files() {
    let base = tmp_file_path("validate_plan");
    fs::create_dir_all(base.join("videos")).unwrap();
    fs::write(base.join("secret.json"), "{}").unwrap();
    fs::write(base.join("videos/ready.mp4"), "").unwrap();
    fs::write(base.join("videos/with_thumb.mp4"), "").unwrap();

    let xml = r#"<Uploads Application="App" Secret="secret.json">
        <Video File="videos/ready.mp4"/>
        <Video File="videos/with_thumb.mp4" Thumbnail="missing.png"/>
        <Video File="videos/absent.mp4"/>
    </Uploads>"#;
    let plan = UploadPlan::parse(xml).unwrap().unwrap();
    let issues = plan.validate(&base);

    assert_eq!(
        issues,
        vec![
            PlanIssue::ThumbnailNotFound {
                video: base.join("videos/with_thumb.mp4"),
                thumbnail: base.join("missing.png"),
            },
            PlanIssue::VideoNotFound(base.join("videos/absent.mp4")),
        ]
    );
    assert!(issues.iter().all(|issue| !issue.is_fatal()));
    assert_eq!(plan.uploadable(&base).count(), 2);

    let _ = fs::remove_dir_all(base);
}

#[test]
fn test_missing_secret_file_is_fatal() {
    let plan = UploadPlan::parse(r#"<Uploads Application="App" Secret="nowhere.json"/>"#)
        .unwrap()
        .unwrap();
    let issues = plan.validate(&tmp_file_path("no_secret"));
    assert_eq!(issues.len(), 1);
    assert!(issues.first().is_some_and(PlanIssue::is_fatal));
}

#[test]
fn test_shared_deserializer_is_sealed() {
    UploadPlan::parse("<Uploads/>").unwrap();
    let deserializer = deserializer();
    assert!(deserializer.is_sealed());

    deserializer.register::<Video>("Clip");
    assert_eq!(
        deserializer.tags(),
        vec!["Uploads".to_string(), "Video".to_string()]
    );
}

#[test]
fn test_category_by_number() {
    let plan = UploadPlan::parse(
        r#"<Uploads Application="App" Secret="s.json">
            <Video File="a.mp4" Category="10" Privacy="2"/>
            <Video File="b.mp4" Category="99"/>
        </Uploads>"#,
    )
    .unwrap()
    .unwrap();

    let [first, second] = plan.videos.as_slice() else {
        panic!("expected two videos");
    };
    assert_eq!(first.category, Category::Music);
    assert_eq!(first.privacy, Privacy::Private);
    assert_eq!(second.category, Category::PeopleAndBlogs);
}
