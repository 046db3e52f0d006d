use serde_derive::{Deserialize, Serialize};

use crate::{
    color::{BaseColor, ColorPsychology},
    models::ColorSample,
    screensaver::PlaybackState,
};

/// Incoming JSON command
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", tag = "command")]
pub enum JsonRequest {
    /// Current playback state
    State,
    /// Color history, most recent first
    History,
    /// Toggle automatic advancement
    TogglePlay,
    /// Re-display a history entry
    Select { index: usize },
    /// Apply a user-supplied hex color
    CustomColor { hex: String },
    /// History as CSV
    ExportCsv,
    /// Psychology metadata for the current color
    Psychology,
}

/// Outgoing JSON response
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum JsonResponse {
    Error {
        success: bool,
        error: String,
    },
    State {
        success: bool,
        state: PlaybackState,
    },
    History {
        success: bool,
        history: Vec<ColorSample>,
    },
    Playing {
        success: bool,
        playing: bool,
    },
    Color {
        success: bool,
        color: ColorSample,
    },
    Csv {
        success: bool,
        csv: String,
    },
    Psychology {
        success: bool,
        base: BaseColor,
        psychology: &'static ColorPsychology,
    },
}

impl JsonResponse {
    pub fn error(error: &impl std::fmt::Display) -> Self {
        Self::Error {
            success: false,
            error: error.to_string(),
        }
    }

    pub fn state(state: PlaybackState) -> Self {
        Self::State {
            success: true,
            state,
        }
    }

    pub fn history(history: Vec<ColorSample>) -> Self {
        Self::History {
            success: true,
            history,
        }
    }

    pub fn playing(playing: bool) -> Self {
        Self::Playing {
            success: true,
            playing,
        }
    }

    pub fn color(color: ColorSample) -> Self {
        Self::Color {
            success: true,
            color,
        }
    }

    pub fn csv(csv: String) -> Self {
        Self::Csv { success: true, csv }
    }

    pub fn psychology(base: BaseColor, psychology: &'static ColorPsychology) -> Self {
        Self::Psychology {
            success: true,
            base,
            psychology,
        }
    }
}
