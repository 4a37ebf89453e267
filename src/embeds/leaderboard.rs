use twilight_model::channel::embed::{Embed, EmbedField};
use twilight_validate::embed::{embed as validate_embed, EmbedValidationError};

use crate::{
    leaderboard::Entry,
    util::{
        builder::{EmbedBuilder, FooterBuilder},
        constants::{EMBED_FIELDS_SIZE, KART_BLUE, LEADERBOARD_DESCRIPTION, LEADERBOARD_TITLE},
    },
};

/// Renders the entries into pages of at most [`EMBED_FIELDS_SIZE`] tracks.
///
/// There is always at least one page.
pub fn leaderboard_pages<'e>(entries: impl IntoIterator<Item = Entry<'e>>) -> Vec<Embed> {
    let fields: Vec<_> = entries.into_iter().map(entry_field).collect();

    let mut chunks: Vec<_> = fields
        .chunks(EMBED_FIELDS_SIZE)
        .map(<[EmbedField]>::to_vec)
        .collect();

    if chunks.is_empty() {
        chunks.push(Vec::new());
    }

    let pages = chunks.len();

    chunks
        .into_iter()
        .zip(1..)
        .map(|(fields, page)| {
            let mut builder = EmbedBuilder::new().color(KART_BLUE).fields(fields);

            if page == 1 {
                builder = builder
                    .title(LEADERBOARD_TITLE)
                    .description(LEADERBOARD_DESCRIPTION);
            }

            if pages > 1 {
                builder = builder.footer(FooterBuilder::new(format!("Page {page}/{pages}")));
            }

            builder.build()
        })
        .collect()
}

/// Checks every page against Discord's embed limits
pub fn validate_pages(pages: &[Embed]) -> Result<(), EmbedValidationError> {
    pages.iter().try_for_each(validate_embed)
}

fn entry_field(entry: Entry<'_>) -> EmbedField {
    EmbedField {
        inline: true,
        name: format!("{} {}", entry.icon, entry.name),
        value: format!(
            "**Time:** {}\n**Holder:** {}",
            entry.time(),
            entry.holder()
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::leaderboard::{track_list, Leaderboard, Snapshot, Track};

    use super::*;

    #[test]
    fn full_track_list_takes_two_pages() {
        let tracks = track_list();
        let leaderboard = Leaderboard::new(tracks.clone());

        let pages = leaderboard_pages(leaderboard.entries());

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].fields.len(), EMBED_FIELDS_SIZE);
        assert_eq!(pages[1].fields.len(), tracks.len() - EMBED_FIELDS_SIZE);

        assert_eq!(pages[0].title.as_deref(), Some(LEADERBOARD_TITLE));
        assert_eq!(pages[1].title, None);

        let footers: Vec<_> = pages
            .iter()
            .map(|page| page.footer.as_ref().map(|footer| footer.text.as_str()))
            .collect();

        assert_eq!(footers, [Some("Page 1/2"), Some("Page 2/2")]);
        assert!(pages.iter().all(|page| page.color == Some(KART_BLUE)));
    }

    #[test]
    fn fields_show_record() {
        let tracks = vec![Track::new("Rainbow Road"), Track::new("Ghost Valley")];
        let mut leaderboard = Leaderboard::new(tracks);
        leaderboard.submit("rainbowroad", "2:5.3", "<@5>");

        let pages = leaderboard_pages(leaderboard.entries());

        assert_eq!(pages.len(), 1);
        assert!(pages[0].footer.is_none());

        let fields = &pages[0].fields;
        assert_eq!(fields[0].name, "🌈 Rainbow Road");
        assert_eq!(fields[0].value, "**Time:** 2:05.3\n**Holder:** <@5>");
        assert_eq!(fields[1].name, "🏁 Ghost Valley");
        assert_eq!(fields[1].value, "**Time:** —\n**Holder:** —");
        assert!(fields.iter().all(|field| field.inline));
    }

    #[test]
    fn empty_leaderboard_still_has_a_page() {
        let leaderboard = Leaderboard::new(Vec::new());
        let pages = leaderboard_pages(leaderboard.entries());

        assert_eq!(pages.len(), 1);
        assert!(pages[0].fields.is_empty());
    }

    #[test]
    fn full_leaderboard_fits_discord_limits() {
        let tracks = track_list();
        let mut leaderboard = Leaderboard::new(tracks.clone());

        for track in tracks.iter() {
            let res = leaderboard.submit(&track.key, "999999999:59.999", "<@123456789012345678>");
            assert!(matches!(res, crate::leaderboard::SubmitResult::Accepted(_)));
        }

        let pages = leaderboard_pages(leaderboard.entries());

        assert!(validate_pages(&pages).is_ok());
    }

    #[test]
    fn oversized_restored_time_fails_validation() {
        let minutes = "1".repeat(1100);

        let json = format!(
            r#"{{
                "leaderboard": {{
                    "babypark": {{ "track": "Baby Park", "time": "{minutes}:00.0", "holder": "<@1>" }}
                }},
                "leaderboardMessageId": null
            }}"#
        );

        let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
        let leaderboard = Leaderboard::restore(vec![Track::new("Baby Park")], snapshot);
        let pages = leaderboard_pages(leaderboard.entries());

        assert!(validate_pages(&pages).is_err());
    }
}
