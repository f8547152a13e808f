//! Presentation of ranked offers
//!
//! The engine hands over plain `Offer` values; markup and user-facing wording
//! live here.

use anyhow::Result;
use offers_core::{Offer, OfferQuery};

use crate::cli::OutputFormat;

/// Shown for any fetch or decode failure. Carries no internal detail.
pub const FETCH_FAILED: &str = "Failed to fetch server availability. Please try again later.";

pub fn empty_message(datacenter: &str) -> String {
    format!("No available servers found in {datacenter} datacenter.")
}

pub fn offers(format: OutputFormat, offers: &[Offer], query: &OfferQuery) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => text(offers, query),
        OutputFormat::Json => serde_json::to_string_pretty(offers)?,
        OutputFormat::Telegram => telegram(offers, query),
    })
}

pub fn failure(format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => FETCH_FAILED.to_string(),
        OutputFormat::Json => serde_json::json!({ "error": FETCH_FAILED }).to_string(),
        OutputFormat::Telegram => format!("❌ {}", escape_markdown_v2(FETCH_FAILED)),
    }
}

fn text(offers: &[Offer], query: &OfferQuery) -> String {
    if offers.is_empty() {
        return empty_message(&query.datacenter);
    }

    let mut out = format!(
        "Top {} cheapest in {} ({}):\n",
        offers.len(),
        query.datacenter,
        query.subsidiary
    );

    for (i, offer) in offers.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {:.2} {}/mo - {}\n   FQN: {}\n",
            i + 1,
            offer.total_price,
            offer.currency,
            offer.display_name,
            offer.identifier
        ));
        if !offer.addons.is_empty() {
            let addons: Vec<String> = offer
                .addons
                .iter()
                .map(|(family, code)| format!("{family}={code}"))
                .collect();
            out.push_str(&format!("   Addons: {}\n", addons.join(", ")));
        }
    }

    out.trim_end().to_string()
}

fn telegram(offers: &[Offer], query: &OfferQuery) -> String {
    if offers.is_empty() {
        return escape_markdown_v2(&empty_message(&query.datacenter));
    }

    let mut out = String::from("🖥️ *Available Servers*\n");
    out.push_str(&format!(
        "_Top {} cheapest in {} \\({}\\)_\n\n",
        offers.len(),
        escape_markdown_v2(&query.datacenter),
        escape_markdown_v2(&query.subsidiary)
    ));

    let entries: Vec<String> = offers
        .iter()
        .enumerate()
        .map(|(i, offer)| offer_markdown_v2(offer, i + 1))
        .collect();
    out.push_str(&entries.join("\n"));
    out
}

/// One numbered offer entry: price line, then the unit identifier
fn offer_markdown_v2(offer: &Offer, index: usize) -> String {
    format!(
        "{}\\. *{} {}/mo* \\- {}\n   _FQN: {}_",
        index,
        escape_markdown_v2(&format!("{:.2}", offer.total_price)),
        escape_markdown_v2(&offer.currency),
        escape_markdown_v2(&offer.display_name),
        escape_markdown_v2(&offer.identifier)
    )
}

/// Escape special characters for Telegram MarkdownV2
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        match ch {
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '='
            | '|' | '{' | '}' | '.' | '!' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
