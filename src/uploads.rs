//! Upload configuration documents.
//!
//! ```xml
//! <Uploads Application="Channel Uploader" Secret="secret.json">
//!     <Video File="intro.mp4" Title="Intro" Tags="a,b" Category="Music" Privacy="Unlisted"/>
//! </Uploads>
//! ```
//!
//! [`UploadPlan`] gathers what an uploader needs from such a document and
//! runs the pre-flight checks on it. Nothing here talks to the network.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use tracing::{debug, instrument, warn};

use crate::{
    coerce::assign,
    enumeration,
    error::Result,
    node::{Deserializer, Field, NodeTree, NodeType},
    node_kind,
};

/// Channel used when a video names none
pub const DEFAULT_CHANNEL: &str = "user";

/// Video visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Privacy {
    #[default]
    Public,
    Unlisted,
    Private,
}

enumeration!(Privacy { Public, Unlisted, Private });

/// Video category with its numeric id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    FilmAndAnimation = 1,
    AutoAndVehicles = 2,
    Music = 10,
    PetsAndAnimals = 15,
    Sports = 17,
    ShortMovies = 18,
    TravelAndEvents = 19,
    Gaming = 20,
    VideoBlogging = 21,
    #[default]
    PeopleAndBlogs = 22,
    Comedy = 23,
    Entertainment = 24,
    NewsAndPolitics = 25,
    HowtoAndStyle = 26,
    Education = 27,
    ScienceAndTechnology = 28,
    NonprofitsAndActivism = 29,
    Movies = 30,
    Anime = 31,
    ActionAndAdventure = 32,
    Classics = 33,
    Documentary = 35,
    Drama = 36,
    Family = 37,
    Foreign = 38,
    Horror = 39,
    SciFiAndFantasy = 40,
    Thriller = 41,
    Shorts = 42,
    Shows = 43,
    Trailers = 44,
}

enumeration!(Category {
    FilmAndAnimation,
    AutoAndVehicles,
    Music,
    PetsAndAnimals,
    Sports,
    ShortMovies,
    TravelAndEvents,
    Gaming,
    VideoBlogging,
    PeopleAndBlogs,
    Comedy,
    Entertainment,
    NewsAndPolitics,
    HowtoAndStyle,
    Education,
    ScienceAndTechnology,
    NonprofitsAndActivism,
    Movies,
    Anime,
    ActionAndAdventure,
    Classics,
    Documentary,
    Drama,
    Family,
    Foreign,
    Horror,
    SciFiAndFantasy,
    Thriller,
    Shorts,
    Shows,
    Trailers,
});

impl Category {
    #[allow(clippy::as_conversions)]
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Root of an upload configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uploads {
    /// Application name presented when authorizing
    pub application: String,
    /// Path to the client secret JSON file
    pub secret: String,
}

impl NodeType for Uploads {
    const NAME: &'static str = "Uploads";
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "Application",
            bind: |uploads, value| assign(&mut uploads.application, value),
        },
        Field {
            name: "Secret",
            bind: |uploads, value| assign(&mut uploads.secret, value),
        },
    ];
}

/// One video to upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Video {
    pub file: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: Category,
    pub privacy: Privacy,
    pub channel_id: String,
    pub thumbnail: String,
}

impl Video {
    pub fn has_thumbnail(&self) -> bool {
        !self.thumbnail.is_empty()
    }

    /// Channel to upload to; [`DEFAULT_CHANNEL`] when none is set
    pub fn channel(&self) -> &str {
        if self.channel_id.is_empty() {
            DEFAULT_CHANNEL
        } else {
            &self.channel_id
        }
    }
}

impl NodeType for Video {
    const NAME: &'static str = "Video";
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "File",
            bind: |video, value| assign(&mut video.file, value),
        },
        Field {
            name: "Title",
            bind: |video, value| assign(&mut video.title, value),
        },
        Field {
            name: "Description",
            bind: |video, value| assign(&mut video.description, value),
        },
        Field {
            name: "Tags",
            bind: |video, value| assign(&mut video.tags, value),
        },
        Field {
            name: "Category",
            bind: |video, value| assign(&mut video.category, value),
        },
        Field {
            name: "Privacy",
            bind: |video, value| assign(&mut video.privacy, value),
        },
        Field {
            name: "ChannelId",
            bind: |video, value| assign(&mut video.channel_id, value),
        },
        Field {
            name: "Thumbnail",
            bind: |video, value| assign(&mut video.thumbnail, value),
        },
    ];

    fn key(&self) -> String {
        self.file.clone()
    }
}

node_kind! {
    /// Node variants of an upload configuration
    pub enum UploadNode {
        Uploads(Uploads),
        Video(Video),
    }
}

static DESERIALIZER: LazyLock<Deserializer<UploadNode>> = LazyLock::new(|| {
    let deserializer = Deserializer::new();
    deserializer
        .register::<Uploads>(Uploads::NAME)
        .register::<Video>(Video::NAME);
    deserializer
});

/// Process-wide deserializer with [`Uploads`] and [`Video`] registered
pub fn deserializer() -> &'static Deserializer<UploadNode> {
    &DESERIALIZER
}

/// A problem found before any upload starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanIssue {
    MissingApplication,
    MissingSecret,
    SecretNotFound(PathBuf),
    /// The video is skipped
    VideoNotFound(PathBuf),
    /// The video is uploaded without its thumbnail
    ThumbnailNotFound { video: PathBuf, thumbnail: PathBuf },
}

impl PlanIssue {
    /// Whether the issue stops every upload rather than a single video
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingApplication | Self::MissingSecret | Self::SecretNotFound(_)
        )
    }
}

impl fmt::Display for PlanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApplication => write!(f, "Application name is not specified"),
            Self::MissingSecret => write!(f, "Secret JSON file is not specified"),
            Self::SecretNotFound(path) => {
                write!(f, "Secret JSON file '{}' does not exist", path.display())
            }
            Self::VideoNotFound(path) => {
                write!(f, "Video file '{}' does not exist, skipping", path.display())
            }
            Self::ThumbnailNotFound { video, thumbnail } => write!(
                f,
                "Thumbnail '{}' does not exist, '{}' will be uploaded without it",
                thumbnail.display(),
                video.display()
            ),
        }
    }
}

/// Settings and videos gathered from an upload configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPlan {
    pub settings: Uploads,
    pub videos: Vec<Video>,
}

impl UploadPlan {
    /// Collects the plan from a deserialized tree. Returns `None` when the
    /// root is not an [`Uploads`] node.
    pub fn from_tree(tree: &NodeTree<UploadNode>) -> Option<Self> {
        let settings = tree.payload::<Uploads>(tree.root())?.clone();
        let videos = tree
            .find::<Video>(tree.root())
            .into_iter()
            .filter_map(|id| tree.payload::<Video>(id))
            .cloned()
            .collect();
        Some(Self { settings, videos })
    }

    /// Parses XML text into a plan; `Ok(None)` when the root is not
    /// `Uploads`.
    pub fn parse(text: &str) -> Result<Option<Self>> {
        let tree = deserializer().deserialize_as::<Uploads>(text)?;
        Ok(tree.as_ref().and_then(Self::from_tree))
    }

    #[instrument]
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let doc = crate::Document::load_file(path)?;
        let tree = deserializer().deserialize_document(&doc);
        let plan = tree.as_ref().and_then(Self::from_tree);
        debug!(videos = plan.as_ref().map_or(0, |plan| plan.videos.len()), "Plan loaded");
        Ok(plan)
    }

    /// Relative paths are resolved against `base`
    pub fn validate(&self, base: &Path) -> Vec<PlanIssue> {
        let mut issues = Vec::new();
        if self.settings.application.is_empty() {
            issues.push(PlanIssue::MissingApplication);
        }
        if self.settings.secret.is_empty() {
            issues.push(PlanIssue::MissingSecret);
        } else {
            let secret = base.join(&self.settings.secret);
            if !secret.is_file() {
                issues.push(PlanIssue::SecretNotFound(secret));
            }
        }

        for video in &self.videos {
            let file = base.join(&video.file);
            if !file.is_file() {
                issues.push(PlanIssue::VideoNotFound(file));
                continue;
            }
            if video.has_thumbnail() {
                let thumbnail = base.join(&video.thumbnail);
                if !thumbnail.is_file() {
                    issues.push(PlanIssue::ThumbnailNotFound {
                        video: file,
                        thumbnail,
                    });
                }
            }
        }

        for issue in &issues {
            warn!("{}", issue);
        }
        issues
    }

    /// Videos that pass the pre-flight checks
    pub fn uploadable<'a>(&'a self, base: &'a Path) -> impl Iterator<Item = &'a Video> + 'a {
        self.videos
            .iter()
            .filter(move |video| base.join(&video.file).is_file())
    }
}
