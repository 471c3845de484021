//! Child profile data: the parameters the wizard collects and the fixed
//! catalogs they are drawn from.

use std::fmt;

/// Youngest age the wizard accepts.
pub const AGE_MIN: u8 = 2;
/// Oldest age the wizard accepts.
pub const AGE_MAX: u8 = 12;
/// Age the wizard starts from.
pub const DEFAULT_AGE: u8 = 5;

/// Interest used when none were selected. Step validation prevents an empty
/// selection from reaching generation, so this is defensive only.
pub const FALLBACK_INTEREST: &str = "friend";

/// The child description a story is generated from.
///
/// Mutable while the wizard is active; submission moves it out of the wizard,
/// freezing it for the lifetime of the story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub age: u8,
    pub gender: Option<Gender>,
    /// Selection order is preserved; the first entry is the story's main interest.
    pub interests: Vec<Interest>,
    pub style: Option<StoryStyle>,
    pub lesson: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            gender: None,
            interests: Vec::new(),
            style: None,
            lesson: String::new(),
        }
    }
}

impl Profile {
    /// The interest that headlines the story title.
    pub fn main_interest(&self) -> &str {
        self.interests
            .first()
            .map(|i| i.name())
            .unwrap_or(FALLBACK_INTEREST)
    }

    /// All selected interests joined for display ("Space, Dinosaurs").
    pub fn interests_joined(&self) -> String {
        self.interests
            .iter()
            .map(|i| i.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Pronoun set for the selected gender; they/them when unset.
    pub fn pronouns(&self) -> Pronouns {
        self.gender.map(|g| g.pronouns()).unwrap_or_default()
    }
}

// ============================================================================
// Gender
// ============================================================================

/// Gender options offered by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Boy,
    Girl,
    Other,
    PreferNotToSay,
}

impl Gender {
    pub fn name(&self) -> &'static str {
        match self {
            Gender::Boy => "boy",
            Gender::Girl => "girl",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer-not-to-say",
        }
    }

    /// Human-facing label for lists and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Boy => "Boy",
            Gender::Girl => "Girl",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }

    pub fn pronouns(&self) -> Pronouns {
        match self {
            Gender::Boy => Pronouns::HeHim,
            Gender::Girl => Pronouns::SheHer,
            Gender::Other | Gender::PreferNotToSay => Pronouns::TheyThem,
        }
    }

    pub fn all() -> &'static [Gender] {
        &[
            Gender::Boy,
            Gender::Girl,
            Gender::Other,
            Gender::PreferNotToSay,
        ]
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parse a gender from a command-line flag value.
pub fn parse_gender(s: &str) -> Option<Gender> {
    match s.to_lowercase().as_str() {
        "boy" => Some(Gender::Boy),
        "girl" => Some(Gender::Girl),
        "other" => Some(Gender::Other),
        "prefer-not-to-say" | "prefernottosay" | "unspecified" => Some(Gender::PreferNotToSay),
        _ => None,
    }
}

// ============================================================================
// Pronouns
// ============================================================================

/// Pronoun triple woven through the story body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pronouns {
    HeHim,
    SheHer,
    #[default]
    TheyThem,
}

impl Pronouns {
    pub fn subject(&self) -> &'static str {
        match self {
            Pronouns::HeHim => "he",
            Pronouns::SheHer => "she",
            Pronouns::TheyThem => "they",
        }
    }

    pub fn object(&self) -> &'static str {
        match self {
            Pronouns::HeHim => "him",
            Pronouns::SheHer => "her",
            Pronouns::TheyThem => "them",
        }
    }

    pub fn possessive(&self) -> &'static str {
        match self {
            Pronouns::HeHim => "his",
            Pronouns::SheHer => "her",
            Pronouns::TheyThem => "their",
        }
    }
}

// ============================================================================
// Interests
// ============================================================================

/// The fixed interest catalog the wizard's checklist offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interest {
    Animals,
    Space,
    Dinosaurs,
    PrincessPrince,
    Pirates,
    Superheroes,
    Nature,
    Sports,
    Music,
    Art,
    Science,
    Adventure,
    Fantasy,
    Friendship,
}

impl Interest {
    pub fn name(&self) -> &'static str {
        match self {
            Interest::Animals => "Animals",
            Interest::Space => "Space",
            Interest::Dinosaurs => "Dinosaurs",
            Interest::PrincessPrince => "Princess/Prince",
            Interest::Pirates => "Pirates",
            Interest::Superheroes => "Superheroes",
            Interest::Nature => "Nature",
            Interest::Sports => "Sports",
            Interest::Music => "Music",
            Interest::Art => "Art",
            Interest::Science => "Science",
            Interest::Adventure => "Adventure",
            Interest::Fantasy => "Fantasy",
            Interest::Friendship => "Friendship",
        }
    }

    pub fn all() -> &'static [Interest] {
        &[
            Interest::Animals,
            Interest::Space,
            Interest::Dinosaurs,
            Interest::PrincessPrince,
            Interest::Pirates,
            Interest::Superheroes,
            Interest::Nature,
            Interest::Sports,
            Interest::Music,
            Interest::Art,
            Interest::Science,
            Interest::Adventure,
            Interest::Fantasy,
            Interest::Friendship,
        ]
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parse an interest from a command-line flag value.
pub fn parse_interest(s: &str) -> Option<Interest> {
    match s.to_lowercase().as_str() {
        "animals" => Some(Interest::Animals),
        "space" => Some(Interest::Space),
        "dinosaurs" => Some(Interest::Dinosaurs),
        "princess/prince" | "princess" | "prince" | "royalty" => Some(Interest::PrincessPrince),
        "pirates" => Some(Interest::Pirates),
        "superheroes" => Some(Interest::Superheroes),
        "nature" => Some(Interest::Nature),
        "sports" => Some(Interest::Sports),
        "music" => Some(Interest::Music),
        "art" => Some(Interest::Art),
        "science" => Some(Interest::Science),
        "adventure" => Some(Interest::Adventure),
        "fantasy" => Some(Interest::Fantasy),
        "friendship" => Some(Interest::Friendship),
        _ => None,
    }
}

// ============================================================================
// Story styles
// ============================================================================

/// Narrative styles the catalog keeps templates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryStyle {
    Funny,
    Adventurous,
    Magical,
    Gentle,
    Educational,
    Mysterious,
}

impl StoryStyle {
    pub fn name(&self) -> &'static str {
        match self {
            StoryStyle::Funny => "funny",
            StoryStyle::Adventurous => "adventurous",
            StoryStyle::Magical => "magical",
            StoryStyle::Gentle => "gentle",
            StoryStyle::Educational => "educational",
            StoryStyle::Mysterious => "mysterious",
        }
    }

    /// Human-facing label for lists and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            StoryStyle::Funny => "Funny & Silly",
            StoryStyle::Adventurous => "Adventurous & Exciting",
            StoryStyle::Magical => "Magical & Whimsical",
            StoryStyle::Gentle => "Gentle & Calming",
            StoryStyle::Educational => "Educational & Fun",
            StoryStyle::Mysterious => "Mysterious & Intriguing",
        }
    }

    pub fn all() -> &'static [StoryStyle] {
        &[
            StoryStyle::Funny,
            StoryStyle::Adventurous,
            StoryStyle::Magical,
            StoryStyle::Gentle,
            StoryStyle::Educational,
            StoryStyle::Mysterious,
        ]
    }
}

impl fmt::Display for StoryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parse a story style from a command-line flag value.
pub fn parse_style(s: &str) -> Option<StoryStyle> {
    match s.to_lowercase().as_str() {
        "funny" => Some(StoryStyle::Funny),
        "adventurous" => Some(StoryStyle::Adventurous),
        "magical" => Some(StoryStyle::Magical),
        "gentle" => Some(StoryStyle::Gentle),
        "educational" => Some(StoryStyle::Educational),
        "mysterious" => Some(StoryStyle::Mysterious),
        _ => None,
    }
}

// ============================================================================
// Story
// ============================================================================

/// A finished story: one title, one body of newline-separated paragraphs.
/// Produced from exactly one profile and read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub title: String,
    pub body: String,
}

impl Story {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Body paragraphs, one per non-empty line.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body.lines().filter(|line| !line.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pronoun_mapping() {
        assert_eq!(Gender::Boy.pronouns().subject(), "he");
        assert_eq!(Gender::Boy.pronouns().object(), "him");
        assert_eq!(Gender::Boy.pronouns().possessive(), "his");

        assert_eq!(Gender::Girl.pronouns().subject(), "she");
        assert_eq!(Gender::Girl.pronouns().object(), "her");
        assert_eq!(Gender::Girl.pronouns().possessive(), "her");

        assert_eq!(Gender::Other.pronouns(), Pronouns::TheyThem);
        assert_eq!(Gender::PreferNotToSay.pronouns(), Pronouns::TheyThem);
    }

    #[test]
    fn test_unset_gender_defaults_to_they() {
        let profile = Profile::default();
        assert_eq!(profile.pronouns().subject(), "they");
        assert_eq!(profile.pronouns().possessive(), "their");
    }

    #[test]
    fn test_main_interest_fallback() {
        let mut profile = Profile::default();
        assert_eq!(profile.main_interest(), FALLBACK_INTEREST);

        profile.interests.push(Interest::Dinosaurs);
        profile.interests.push(Interest::Space);
        assert_eq!(profile.main_interest(), "Dinosaurs");
    }

    #[test]
    fn test_interests_joined() {
        let profile = Profile {
            interests: vec![Interest::Space, Interest::Music, Interest::Animals],
            ..Profile::default()
        };
        assert_eq!(profile.interests_joined(), "Space, Music, Animals");

        let single = Profile {
            interests: vec![Interest::Pirates],
            ..Profile::default()
        };
        assert_eq!(single.interests_joined(), "Pirates");
    }

    #[test]
    fn test_parse_flag_values() {
        assert_eq!(parse_gender("Girl"), Some(Gender::Girl));
        assert_eq!(parse_gender("prefer-not-to-say"), Some(Gender::PreferNotToSay));
        assert_eq!(parse_gender("dragon"), None);

        assert_eq!(parse_interest("dinosaurs"), Some(Interest::Dinosaurs));
        assert_eq!(parse_interest("princess"), Some(Interest::PrincessPrince));
        assert_eq!(parse_interest("lasers"), None);

        assert_eq!(parse_style("MAGICAL"), Some(StoryStyle::Magical));
        assert_eq!(parse_style("dreamy"), None);
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(Gender::all().len(), 4);
        assert_eq!(Interest::all().len(), 14);
        assert_eq!(StoryStyle::all().len(), 6);
    }

    #[test]
    fn test_story_paragraphs() {
        let story = Story::new("A Title", "first\nsecond\n\nthird");
        let paragraphs: Vec<&str> = story.paragraphs().collect();
        assert_eq!(paragraphs, vec!["first", "second", "third"]);
    }
}
