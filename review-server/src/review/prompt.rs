//! Prompt construction
//!
//! Maps the tags a customer picked into a system/user message pair for the
//! chat completion endpoint. Pure: no I/O, no clock.

use shared::models::ReviewTag;
use std::fmt;

/// Fallback when no `server_name` tag was sent
pub const DEFAULT_SERVER_PHRASE: &str = "our server";
/// Fallback when no `reason_for_visit` tag was sent
pub const DEFAULT_OCCASION: &str = "a simple visit";

/// Known tag categories, with a fallback for anything the UI adds later
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagCategory {
    ServerName,
    ReasonForVisit,
    ServiceQualities,
    BirthdayDetails,
    LikedDishes,
    Atmosphere,
    Other(String),
}

impl TagCategory {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "server_name" => Self::ServerName,
            "reason_for_visit" => Self::ReasonForVisit,
            "service_qualities" => Self::ServiceQualities,
            "birthday_details" => Self::BirthdayDetails,
            "liked_dishes" => Self::LikedDishes,
            "atmosphere" => Self::Atmosphere,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ServerName => "server_name",
            Self::ReasonForVisit => "reason_for_visit",
            Self::ServiceQualities => "service_qualities",
            Self::BirthdayDetails => "birthday_details",
            Self::LikedDishes => "liked_dishes",
            Self::Atmosphere => "atmosphere",
            Self::Other(name) => name,
        }
    }

    /// Identity tags say who served and why the guest came; they are not
    /// review content on their own.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::ServerName | Self::ReasonForVisit)
    }

    /// Whether occurrences of this category go to the qualitative log.
    ///
    /// Dishes have their own log and birthday details name a guest.
    pub fn is_qualitative(&self) -> bool {
        !self.is_identity() && !matches!(self, Self::LikedDishes | Self::BirthdayDetails)
    }
}

impl From<&str> for TagCategory {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chat messages sent to the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPrompt {
    pub system: String,
    pub user: String,
}

/// Tags partitioned into buckets, blank values dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitSummary {
    pub server_name: Option<String>,
    pub occasion: Option<String>,
    pub birthday_for: Option<String>,
    pub service: Vec<String>,
    pub dishes: Vec<String>,
    pub atmosphere: Vec<String>,
    /// Unknown categories in first-seen order
    pub other: Vec<(String, Vec<String>)>,
}

impl VisitSummary {
    pub fn from_tags(tags: &[ReviewTag]) -> Self {
        let mut summary = Self::default();

        for tag in tags {
            let value = tag.value.trim();
            if value.is_empty() {
                continue;
            }
            let value = value.to_string();

            match TagCategory::parse(&tag.category) {
                TagCategory::ServerName => summary.server_name = Some(value),
                TagCategory::ReasonForVisit => summary.occasion = Some(value),
                TagCategory::BirthdayDetails => summary.birthday_for = Some(value),
                TagCategory::ServiceQualities => summary.service.push(value),
                TagCategory::LikedDishes => summary.dishes.push(value),
                TagCategory::Atmosphere => summary.atmosphere.push(value),
                TagCategory::Other(name) => {
                    if name.is_empty() {
                        continue;
                    }
                    match summary.other.iter_mut().find(|(n, _)| *n == name) {
                        Some((_, values)) => values.push(value),
                        None => summary.other.push((name, vec![value])),
                    }
                }
            }
        }

        summary
    }

    /// At least one non-identity tag survived
    pub fn has_tag_content(&self) -> bool {
        self.birthday_for.is_some()
            || !self.service.is_empty()
            || !self.dishes.is_empty()
            || !self.atmosphere.is_empty()
            || !self.other.is_empty()
    }

    pub fn server_phrase(&self) -> &str {
        self.server_name.as_deref().unwrap_or(DEFAULT_SERVER_PHRASE)
    }

    /// Occasion with the birthday detail appended
    pub fn visit_context(&self) -> String {
        let occasion = self.occasion.as_deref().unwrap_or(DEFAULT_OCCASION);
        match &self.birthday_for {
            Some(name) => format!("{occasion} (for {name}'s birthday)"),
            None => occasion.to_string(),
        }
    }
}

/// A request is worth processing when it carries review material or a
/// non-blank private note.
pub fn has_content(summary: &VisitSummary, note: Option<&str>) -> bool {
    summary.has_tag_content() || note.is_some_and(|n| !n.trim().is_empty())
}

/// Build the chat prompt for one visit.
pub fn build_prompt(restaurant: &str, lang: &str, summary: &VisitSummary) -> ReviewPrompt {
    let server = summary.server_phrase();

    let system = format!(
        "You are a delighted guest of the restaurant {restaurant} writing a Google review.\n\
         Write a short review (2-4 sentences) that sounds warm and genuine.\n\
         IMPORTANT: you must answer in the following language: {lang}.\n\
         You must mention the excellent service of \"{server}\".\n\
         Weave the points the guest liked into the text naturally.\n\
         If a special occasion is mentioned, work it into the review naturally.\n\
         Vary the wording so that every review is unique."
    );

    let mut bullets = Vec::new();
    if !summary.service.is_empty() {
        bullets.push(format!(
            "- The service from {server} was: {}",
            summary.service.join(", ")
        ));
    }
    if !summary.dishes.is_empty() {
        bullets.push(format!("- Favourite dishes: {}", summary.dishes.join(", ")));
    }
    if !summary.atmosphere.is_empty() {
        bullets.push(format!("- Atmosphere: {}", summary.atmosphere.join(", ")));
    }
    for (category, values) in &summary.other {
        bullets.push(format!("- {category}: {}", values.join(", ")));
    }

    let mut user = format!("Visit context: {}.", summary.visit_context());
    if !bullets.is_empty() {
        user.push_str("\nWhat the guest liked:\n");
        user.push_str(&bullets.join("\n"));
    }

    ReviewPrompt { system, user }
}
