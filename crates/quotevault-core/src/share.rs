//! Shareable quote cards.
//!
//! The mobile surface renders these as images and hands them to the OS
//! share sheet; image rasterization stays with that surface. The card
//! itself is laid out here as plain text with the same three elements
//! (quoted content, attribution, brand line) so any host can write or
//! pipe it.

use serde::{Deserialize, Serialize};

use crate::quote::Quote;

/// Visual style of the exported card. Hosts that render images map the
/// style to a color scheme; the text layout varies only in framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareStyle {
    #[default]
    Minimal,
    Vibrant,
    Classic,
}

const BRAND_LINE: &str = "QuoteVault";

/// Card text for a quote: content in quotation marks, attribution,
/// brand line.
pub fn share_card(quote: &Quote, style: ShareStyle) -> String {
    let body = format!(
        "\"{}\"\n\n— {}\n\n{}",
        quote.content, quote.author, BRAND_LINE
    );
    match style {
        ShareStyle::Minimal => body,
        ShareStyle::Vibrant => frame(&body, '*'),
        ShareStyle::Classic => frame(&body, '-'),
    }
}

/// Default file name for an exported card.
pub fn default_file_name(quote: &Quote) -> String {
    format!("quote_{}.txt", quote.id)
}

fn frame(body: &str, rule: char) -> String {
    let width = body.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let rule: String = std::iter::repeat(rule).take(width).collect();
    format!("{rule}\n{body}\n{rule}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_quote() -> Quote {
        Quote {
            id: "q-42".into(),
            content: "The secret of getting ahead is getting started.".into(),
            author: "Mark Twain".into(),
            category_id: None,
            category_name: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn minimal_card_has_content_attribution_and_brand() {
        let card = share_card(&sample_quote(), ShareStyle::Minimal);
        assert!(card.starts_with("\"The secret of getting ahead is getting started.\""));
        assert!(card.contains("— Mark Twain"));
        assert!(card.ends_with("QuoteVault"));
    }

    #[test]
    fn framed_styles_open_and_close_with_a_rule() {
        let card = share_card(&sample_quote(), ShareStyle::Classic);
        let first = card.lines().next().unwrap();
        let last = card.lines().last().unwrap();
        assert!(first.chars().all(|c| c == '-') && !first.is_empty());
        assert_eq!(first, last);
        assert!(card.contains("— Mark Twain"));

        let vibrant = share_card(&sample_quote(), ShareStyle::Vibrant);
        assert!(vibrant.lines().next().unwrap().starts_with('*'));
    }

    #[test]
    fn rule_spans_the_longest_line() {
        let card = share_card(&sample_quote(), ShareStyle::Classic);
        let rule_len = card.lines().next().unwrap().chars().count();
        let widest = card.lines().map(|l| l.chars().count()).max().unwrap();
        assert_eq!(rule_len, widest);
    }

    #[test]
    fn default_file_name_embeds_the_quote_id() {
        assert_eq!(default_file_name(&sample_quote()), "quote_q-42.txt");
    }
}
