//! Turns a media record into a Telegram-ready announcement.

use std::borrow::Cow;
use std::sync::Arc;

use jiff::civil::Date;

use crate::config::AnnouncementConfig;
use crate::models::{GenreCatalog, MediaKind, MediaRecord, UNKNOWN_GENRE};

/// Telegram refuses photo captions longer than this (in characters).
pub const CAPTION_LIMIT: usize = 1024;

/// Rendered when the release date is missing or unparseable.
pub const UNKNOWN_DATE: &str = "Inconnue";

const ELLIPSIS: &str = "...";

/// Poster reference plus caption, ready for a notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub image_url: Option<String>,
    pub caption: String,
}

/// Escape the characters Telegram's legacy Markdown treats as entities.
pub fn escape_markdown(text: &str) -> Cow<'_, str> {
    if !text.contains(['_', '*', '[', '`']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if matches!(c, '_' | '*' | '[' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Keep at most `limit` characters, marking a cut with `...`.
///
/// Text at or under the limit is returned unchanged.
pub fn truncate(text: &str, limit: usize) -> Cow<'_, str> {
    match text.char_indices().nth(limit) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}{}", text[..cut].trim_end(), ELLIPSIS)),
    }
}

/// Cut already-escaped text to at most `limit` characters, `...` included.
///
/// Never ends on a lone escape backslash. Below the ellipsis width nothing
/// is kept.
pub fn truncate_escaped(text: &str, limit: usize) -> Cow<'_, str> {
    if text.chars().count() <= limit {
        return Cow::Borrowed(text);
    }
    let Some(keep) = limit.checked_sub(ELLIPSIS.len()) else {
        return Cow::Borrowed("");
    };

    let cut = text.char_indices().nth(keep).map_or(text.len(), |(i, _)| i);
    let mut kept = &text[..cut];
    if kept.ends_with('\\') {
        kept = &kept[..kept.len() - 1];
    }
    Cow::Owned(format!("{}{}", kept, ELLIPSIS))
}

/// Render a TMDB `YYYY-MM-DD` date with a strftime pattern.
fn format_date(raw: Option<&str>, pattern: &str) -> String {
    raw.and_then(|raw| raw.trim().parse::<Date>().ok())
        .and_then(|date| jiff::fmt::strtime::format(pattern, date).ok())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

pub struct AnnouncementFormatter {
    catalog: Arc<GenreCatalog>,
    image_base_url: String,
    config: AnnouncementConfig,
}

impl AnnouncementFormatter {
    pub fn new(
        catalog: Arc<GenreCatalog>,
        image_base_url: impl Into<String>,
        config: AnnouncementConfig,
    ) -> Self {
        Self {
            catalog,
            image_base_url: image_base_url.into(),
            config,
        }
    }

    /// `{image_base_url}{poster_path}`, or nothing when TMDB has no poster.
    pub fn poster_url(&self, record: &MediaRecord) -> Option<String> {
        record.poster_path.as_deref().map(|path| {
            format!(
                "{}/{}",
                self.image_base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        })
    }

    fn genre_line(&self, record: &MediaRecord, kind: MediaKind) -> String {
        if record.genres.is_empty() {
            return UNKNOWN_GENRE.to_string();
        }
        record
            .genres
            .iter()
            .map(|genre| self.catalog.resolve(kind, genre))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `overview` is inserted as given, already escaped.
    fn render(&self, record: &MediaRecord, kind: MediaKind, overview: &str) -> String {
        format!(
            "🎬 *{headline}* 🎬\n\
             \n\
             🎥 *Titre:* {title}\n\
             🎥 *Type:* {kind}\n\
             ⭐ *Note:* {vote:.1}/10\n\
             📅 *Date de sortie:* {date}\n\
             🎞 *Genre:* {genres}\n\
             \n\
             🎭 *Synopsis:*\n\
             \n\
             {overview}\n\
             \n\
             👀 *{tagline}* {hashtag}",
            headline = self.config.headline,
            title = escape_markdown(&record.title),
            kind = kind.label(),
            vote = record.vote_average,
            date = format_date(record.release_date.as_deref(), &self.config.date_format),
            genres = escape_markdown(&self.genre_line(record, kind)),
            overview = overview,
            tagline = self.config.tagline,
            hashtag = self.config.hashtag,
        )
    }

    /// Build the announcement for `record`, shown as a `kind`.
    ///
    /// The overview is cut to `overview_limit` characters, then further if
    /// the caption would exceed [`CAPTION_LIMIT`]. A template that is too
    /// long on its own is cut as a whole.
    pub fn format(&self, record: &MediaRecord, kind: MediaKind) -> Announcement {
        let overview = truncate(&record.overview, self.config.overview_limit);
        let overview = escape_markdown(&overview);
        let mut caption = self.render(record, kind, &overview);

        let length = caption.chars().count();
        if length > CAPTION_LIMIT {
            let template = length - overview.chars().count();
            let room = CAPTION_LIMIT.saturating_sub(template);
            caption = self.render(record, kind, &truncate_escaped(&overview, room));

            if caption.chars().count() > CAPTION_LIMIT {
                caption = truncate_escaped(&caption, CAPTION_LIMIT).into_owned();
            }
        }

        Announcement {
            image_url: self.poster_url(record),
            caption,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenreRef;
    use proptest::prelude::*;

    fn formatter() -> AnnouncementFormatter {
        AnnouncementFormatter::new(
            Arc::new(GenreCatalog::new()),
            "https://image.tmdb.org/t/p/w500",
            AnnouncementConfig::default(),
        )
    }

    fn inception() -> MediaRecord {
        MediaRecord {
            kind: MediaKind::Movie,
            title: "Inception".to_string(),
            poster_path: Some("/inception.jpg".to_string()),
            vote_average: 8.8,
            release_date: Some("2010-07-16".to_string()),
            overview: "A thief...".to_string(),
            genres: vec![GenreRef::Code(28), GenreRef::Code(878)],
        }
    }

    #[test]
    fn test_caption_contents() {
        let announcement = formatter().format(&inception(), MediaKind::Movie);
        let caption = &announcement.caption;

        assert!(caption.contains("🎥 *Titre:* Inception"));
        assert!(caption.contains("🎥 *Type:* Film"));
        assert!(caption.contains("⭐ *Note:* 8.8/10"));
        assert!(caption.contains("📅 *Date de sortie:* 16/07/2010"));
        assert!(caption.contains("🎞 *Genre:* Action, Science-Fiction"));
        assert!(caption.contains("A thief..."));
        assert!(caption.starts_with("🎬 *"));
        assert_eq!(
            announcement.image_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/inception.jpg")
        );
    }

    #[test]
    fn test_series_label_and_table() {
        let mut record = inception();
        record.kind = MediaKind::Series;
        record.genres = vec![GenreRef::Code(10765), GenreRef::Code(1)];

        let caption = formatter().format(&record, MediaKind::Series).caption;
        assert!(caption.contains("*Type:* Série"));
        assert!(caption.contains("Science-Fiction & Fantastique, Inconnu"));
    }

    #[test]
    fn test_vote_is_rounded_to_one_decimal() {
        let mut record = inception();
        record.vote_average = 7.26;
        assert!(formatter().format(&record, MediaKind::Movie).caption.contains("7.3/10"));
        record.vote_average = 0.0;
        assert!(formatter().format(&record, MediaKind::Movie).caption.contains("0.0/10"));
    }

    #[test]
    fn test_unknown_date() {
        let mut record = inception();
        record.release_date = None;
        assert!(
            formatter()
                .format(&record, MediaKind::Movie)
                .caption
                .contains("*Date de sortie:* Inconnue")
        );

        record.release_date = Some("soon".to_string());
        assert!(
            formatter()
                .format(&record, MediaKind::Movie)
                .caption
                .contains("*Date de sortie:* Inconnue")
        );
    }

    #[test]
    fn test_missing_poster_and_genres() {
        let mut record = inception();
        record.poster_path = None;
        record.genres.clear();

        let announcement = formatter().format(&record, MediaKind::Movie);
        assert_eq!(announcement.image_url, None);
        assert!(announcement.caption.contains("*Genre:* Inconnu"));
    }

    #[test]
    fn test_markdown_is_escaped() {
        assert_eq!(escape_markdown("plain"), "plain");
        assert_eq!(
            escape_markdown("snake_case *bold* [x] `y`"),
            "snake\\_case \\*bold\\* \\[x] \\`y\\`"
        );

        let mut record = inception();
        record.title = "Le *Grand* Bleu".to_string();
        let caption = formatter().format(&record, MediaKind::Movie).caption;
        assert!(caption.contains("*Titre:* Le \\*Grand\\* Bleu"));
    }

    #[test]
    fn test_truncate_at_limit_is_unchanged() {
        assert_eq!(truncate("abcde", 5), "abcde");
        assert_eq!(truncate("abcdef", 5), "abcde...");
        assert_eq!(truncate("", 3), "");
        // multi-byte characters count once
        assert_eq!(truncate("éééé", 2), "éé...");
    }

    #[test]
    fn test_long_overview_is_cut() {
        let mut record = inception();
        record.overview = "x".repeat(600);
        let caption = formatter().format(&record, MediaKind::Movie).caption;
        assert!(caption.contains(&format!("{}...", "x".repeat(500))));
        assert!(!caption.contains(&"x".repeat(501)));
    }

    #[test]
    fn test_caption_stays_within_telegram_limit() {
        let config = AnnouncementConfig {
            overview_limit: 5000,
            ..Default::default()
        };
        let formatter =
            AnnouncementFormatter::new(Arc::new(GenreCatalog::new()), "https://img", config);

        let mut record = inception();
        record.overview = "y".repeat(3000);
        let caption = formatter.format(&record, MediaKind::Movie).caption;
        assert!(caption.chars().count() <= CAPTION_LIMIT);
        assert!(caption.contains("y..."));
    }

    #[test]
    fn test_escaped_overview_stays_within_telegram_limit() {
        let mut record = inception();
        record.overview = "_".repeat(600);

        let caption = formatter().format(&record, MediaKind::Movie).caption;
        assert!(caption.chars().count() <= CAPTION_LIMIT);
        assert!(caption.contains("\\_\\_..."));
        assert!(!caption.contains("\\..."));
    }

    #[test]
    fn test_long_headline_stays_within_telegram_limit() {
        let config = AnnouncementConfig {
            headline: "H".repeat(1100),
            ..Default::default()
        };
        let formatter =
            AnnouncementFormatter::new(Arc::new(GenreCatalog::new()), "https://img", config);

        let caption = formatter.format(&inception(), MediaKind::Movie).caption;
        assert!(caption.chars().count() <= CAPTION_LIMIT);
        assert!(caption.ends_with("..."));
    }

    #[test]
    fn test_truncate_escaped_keeps_pairs() {
        assert_eq!(truncate_escaped("a\\_b", 10), "a\\_b");
        // a cut right after the backslash drops it
        assert_eq!(truncate_escaped("ab\\_cdef", 6), "ab...");
        assert_eq!(truncate_escaped("ab\\_cdef", 7), "ab\\_...");
        assert_eq!(truncate_escaped("abcdef", 2), "");
    }

    proptest! {
        #[test]
        fn prop_caption_never_exceeds_limit(
            overview in "[_*`\\[a-z ]{0,1500}",
            title in "[_*a-z ]{1,200}",
        ) {
            let config = AnnouncementConfig {
                overview_limit: 2000,
                ..Default::default()
            };
            let formatter =
                AnnouncementFormatter::new(Arc::new(GenreCatalog::new()), "https://img", config);

            let mut record = inception();
            record.title = title;
            record.overview = overview;
            let caption = formatter.format(&record, MediaKind::Movie).caption;
            prop_assert!(caption.chars().count() <= CAPTION_LIMIT);
        }

        #[test]
        fn prop_truncate_respects_limit(text in "\\PC{0,300}", limit in 1usize..200) {
            let out = truncate(&text, limit);
            if text.chars().count() <= limit {
                prop_assert_eq!(out.as_ref(), text.as_str());
            } else {
                prop_assert!(out.ends_with(ELLIPSIS));
                prop_assert!(out.chars().count() <= limit + ELLIPSIS.len());
                let kept = &out[..out.len() - ELLIPSIS.len()];
                prop_assert!(text.starts_with(kept));
            }
        }
    }
}
