use std::{env, fs, path::PathBuf};

pub fn tmp_file_path(name: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    dir.push("tagbind_tests");
    let _ = fs::create_dir_all(&dir);
    dir.push(name);
    dir
}

/// Upload configuration with `videos` entries
pub fn generate_uploads(videos: usize) -> String {
    let mut xml = String::from(r#"<Uploads Application="Bench" Secret="secret.json">"#);
    for i in 0..videos {
        xml.push_str(&format!(
            r#"<Video File="v{i}.mp4" Title="Video {i}" Tags="a,b,c" Category="Music" Privacy="Unlisted">Text {i}</Video>"#
        ));
    }
    xml.push_str("</Uploads>");
    xml
}

/// A chain of `depth` nested tags
pub fn generate_nested(depth: usize) -> String {
    let mut xml = String::new();
    for i in 0..depth {
        xml.push_str(&format!("<n{i}>"));
    }
    for i in (0..depth).rev() {
        xml.push_str(&format!("</n{i}>"));
    }
    xml
}
