//! Static template catalog: per-style title templates and opening fragments.
//!
//! Pure data. The only behavior is lookup with a gentle fallback for an
//! unset style.

use crate::profile::StoryStyle;

/// Placeholder token replaced by the profile's main interest.
pub const INTEREST_TOKEN: &str = "{interest}";

/// Title and opening templates for one narrative style.
#[derive(Debug)]
pub struct StyleTemplates {
    pub titles: [&'static str; 3],
    pub openings: [&'static str; 3],
}

static FUNNY: StyleTemplates = StyleTemplates {
    titles: [
        "The Giggling {interest} Adventure",
        "{interest} and the Silly Day",
        "The Laughing {interest} Mystery",
    ],
    openings: [
        "Once upon a time, in a land where everything was wonderfully silly,",
        "In a magical place where laughter echoed through the trees,",
        "There once lived a very funny little",
    ],
};

static ADVENTUROUS: StyleTemplates = StyleTemplates {
    titles: [
        "The Great {interest} Quest",
        "{interest}'s Amazing Journey",
        "The Secret of the {interest}",
    ],
    openings: [
        "In a land of endless possibilities and brave hearts,",
        "Where mountains touched the clouds and rivers sang songs,",
        "On a bright morning filled with excitement,",
    ],
};

static MAGICAL: StyleTemplates = StyleTemplates {
    titles: [
        "The Enchanted {interest}",
        "{interest} and the Magic Spell",
        "The Wonderful World of {interest}",
    ],
    openings: [
        "In a realm where magic sparkled in every dewdrop,",
        "Where unicorns danced and stars whispered secrets,",
        "In an enchanted forest filled with wonder,",
    ],
};

static GENTLE: StyleTemplates = StyleTemplates {
    titles: [
        "The Peaceful {interest} Story",
        "{interest}'s Quiet Adventure",
        "The Gentle {interest} Tale",
    ],
    openings: [
        "In a quiet meadow where flowers swayed gently,",
        "Where soft winds carried the sweetest dreams,",
        "In a cozy little place filled with warmth,",
    ],
};

static EDUCATIONAL: StyleTemplates = StyleTemplates {
    titles: [
        "Learning with {interest}",
        "The Wise {interest}'s Lesson",
        "{interest} Discovers Something Amazing",
    ],
    openings: [
        "In a world full of curious minds and wonderful discoveries,",
        "Where every question led to an amazing answer,",
        "In a place where learning was the greatest adventure,",
    ],
};

static MYSTERIOUS: StyleTemplates = StyleTemplates {
    titles: [
        "The Mystery of the {interest}",
        "{interest} and the Hidden Secret",
        "The Puzzling {interest} Adventure",
    ],
    openings: [
        "When the moon cast long shadows and mysteries unfolded,",
        "In a place where secrets waited to be discovered,",
        "Where curious minds solved the most interesting puzzles,",
    ],
};

/// Resolve the template set for a style; an unset style gets the gentle one.
pub fn templates_for(style: Option<StoryStyle>) -> &'static StyleTemplates {
    match style {
        Some(StoryStyle::Funny) => &FUNNY,
        Some(StoryStyle::Adventurous) => &ADVENTUROUS,
        Some(StoryStyle::Magical) => &MAGICAL,
        Some(StoryStyle::Gentle) | None => &GENTLE,
        Some(StoryStyle::Educational) => &EDUCATIONAL,
        Some(StoryStyle::Mysterious) => &MYSTERIOUS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_has_templates() {
        for style in StoryStyle::all() {
            let templates = templates_for(Some(*style));
            assert_eq!(templates.titles.len(), 3, "{style} titles");
            assert_eq!(templates.openings.len(), 3, "{style} openings");
        }
    }

    #[test]
    fn test_every_title_template_carries_the_token() {
        for style in StoryStyle::all() {
            for title in templates_for(Some(*style)).titles {
                assert!(
                    title.contains(INTEREST_TOKEN),
                    "{style} title {title:?} is missing the interest token"
                );
            }
        }
    }

    #[test]
    fn test_unset_style_falls_back_to_gentle() {
        let fallback = templates_for(None);
        let gentle = templates_for(Some(StoryStyle::Gentle));
        assert_eq!(fallback.titles, gentle.titles);
        assert_eq!(fallback.openings, gentle.openings);
    }
}
