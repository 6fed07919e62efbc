use strum::{Display, EnumIter, EnumString};

/// Prefix for format-choice callback buttons, e.g. `fmt:video`.
pub const FORMAT_CALLBACK_PREFIX: &str = "fmt:";

/// Check that a message looks like a downloadable link.
///
/// Deliberately strict: only an explicit http(s) scheme is accepted, anything
/// else gets a usage reply instead of being handed to the downloader.
pub fn is_supported_link(text: &str) -> bool {
    let text = text.trim();
    text.starts_with("https://") || text.starts_with("http://")
}

#[derive(EnumIter, Display, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum MediaFormat {
    Video,
    Audio,
}

impl MediaFormat {
    /// Button label shown to the user
    pub fn label(self) -> &'static str {
        match self {
            MediaFormat::Video => "🎬 Video",
            MediaFormat::Audio => "🎵 Audio",
        }
    }

    /// File extension the downloader is asked to produce for this format
    pub fn extension(self) -> &'static str {
        match self {
            MediaFormat::Video => "mp4",
            MediaFormat::Audio => "mp3",
        }
    }

    /// Callback data carried by this format's button
    pub fn callback_data(self) -> String {
        format!("{}{}", FORMAT_CALLBACK_PREFIX, self)
    }
}
