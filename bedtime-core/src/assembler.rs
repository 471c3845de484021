//! Local story assembly from the template catalog.
//!
//! The shape of the output is fixed prose; only the randomly chosen title
//! and opening plus the interpolated profile values vary. The random source
//! is injectable so tests can pin the choice.

use rand::Rng;

use crate::catalog::{templates_for, INTEREST_TOKEN};
use crate::profile::{Profile, Story};

/// Assemble a story with a caller-provided random source.
pub fn assemble_with(profile: &Profile, rng: &mut impl Rng) -> Story {
    let templates = templates_for(profile.style);

    let title_template = templates.titles[rng.gen_range(0..templates.titles.len())];
    let title = title_template.replace(INTEREST_TOKEN, profile.main_interest());

    let opening = templates.openings[rng.gen_range(0..templates.openings.len())];
    let age = profile.age;
    let interests = profile.interests_joined();
    let lesson = profile.lesson.as_str();
    let pronouns = profile.pronouns();
    let subject = pronouns.subject();
    let object = pronouns.object();
    let possessive = pronouns.possessive();

    let body = [
        format!("{opening} there lived a wonderful {age}-year-old who loved {interests}."),
        format!(
            "Every day, {subject} would dream of amazing adventures involving {possessive} \
             favorite things. One special evening, something magical happened that would \
             teach {object} an important lesson about {lesson}."
        ),
        format!(
            "As {subject} discovered the true meaning of {lesson}, {possessive} heart filled \
             with joy and understanding. The adventure showed {object} that being kind, \
             brave, and curious can lead to the most wonderful discoveries."
        ),
        format!(
            "From that day forward, whenever {subject} faced a challenge, {subject} \
             remembered this magical adventure and the important lesson about {lesson}. And \
             every night, as {subject} drifted off to sleep, {subject} knew that tomorrow \
             would bring new opportunities to be the amazing person {subject} was meant to \
             be, someone who truly understood {lesson}."
        ),
        "The end. Sweet dreams! 🌙✨".to_string(),
    ]
    .join("\n");

    Story { title, body }
}

/// Assemble a story with thread-local randomness.
pub fn assemble(profile: &Profile) -> Story {
    assemble_with(profile, &mut rand::thread_rng())
}
