//! The fixed, ordered set of scenes that make up the card.

use serde::{Deserialize, Serialize};

/// One stage of the card. Variants are declared in playback order, so the derived
/// `Ord` matches the order in which scenes are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scene {
    Intro,
    Quiz,
    Question,
    Bouquet,
    LoveNote,
}

impl Scene {
    /// All scenes in playback order
    pub const ALL: [Scene; 5] = [
        Scene::Intro,
        Scene::Quiz,
        Scene::Question,
        Scene::Bouquet,
        Scene::LoveNote,
    ];

    /// The scene every session starts in
    pub const fn initial() -> Self {
        Scene::Intro
    }

    /// The scene that follows this one, or `None` for the closing note
    pub fn successor(self) -> Option<Scene> {
        match self {
            Scene::Intro => Some(Scene::Quiz),
            Scene::Quiz => Some(Scene::Question),
            Scene::Question => Some(Scene::Bouquet),
            Scene::Bouquet => Some(Scene::LoveNote),
            Scene::LoveNote => None,
        }
    }

    /// Whether no further transition is issued from this scene
    pub fn is_terminal(self) -> bool {
        self.successor().is_none()
    }

    /// Position of this scene in playback order (0-based)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label used in logs and the footer
    pub fn label(self) -> &'static str {
        match self {
            Scene::Intro => "intro",
            Scene::Quiz => "quiz",
            Scene::Question => "question",
            Scene::Bouquet => "bouquet",
            Scene::LoveNote => "love note",
        }
    }
}

impl std::fmt::Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
