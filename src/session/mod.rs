pub mod answer;
pub mod result;
pub mod training;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Which side of a word pair is shown and which one is typed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    EnglishToNative,
    NativeToEnglish,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::EnglishToNative => "english-to-native",
            Direction::NativeToEnglish => "native-to-english",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::EnglishToNative => Direction::NativeToEnglish,
            Direction::NativeToEnglish => Direction::EnglishToNative,
        }
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    /// Nothing left to drill: every word in the selection is learned.
    #[error("no unlearned words in {lesson}")]
    EmptySet { lesson: String },

    #[error("the session is finished")]
    Finished,

    #[error(transparent)]
    Store(#[from] StoreError),
}
