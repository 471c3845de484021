//! The five-step form state machine.
//!
//! Steps advance only while their validation predicate holds, middle steps
//! auto-advance on a debounced timer, and submission freezes the profile for
//! generation. Time is injected (`Instant` parameters) so every rule here is
//! testable without sleeping.

use std::time::{Duration, Instant};

use crate::profile::{Gender, Interest, Profile, StoryStyle, AGE_MAX, AGE_MIN};

/// How long a middle step waits after the last valid change before moving on.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(800);

/// One step of the wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Age,
    Gender,
    Interests,
    Style,
    Lesson,
}

impl Step {
    /// Heading shown for this step.
    pub fn title(&self) -> &'static str {
        match self {
            Step::Age => "Let's start with age",
            Step::Gender => "Tell us about them",
            Step::Interests => "What sparks their imagination?",
            Step::Style => "What's their style?",
            Step::Lesson => "What should they learn?",
        }
    }

    /// Supporting line shown under the heading.
    pub fn subtitle(&self) -> &'static str {
        match self {
            Step::Age => "How old is the little listener?",
            Step::Gender => "This helps us create a more personal story",
            Step::Interests => "Choose their favorite interests (select multiple)",
            Step::Style => "Choose the tone that fits their personality",
            Step::Lesson => "Every great story has a valuable lesson",
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Age => Some(Step::Gender),
            Step::Gender => Some(Step::Interests),
            Step::Interests => Some(Step::Style),
            Step::Style => Some(Step::Lesson),
            Step::Lesson => None,
        }
    }

    pub fn prev(&self) -> Option<Step> {
        match self {
            Step::Age => None,
            Step::Gender => Some(Step::Age),
            Step::Interests => Some(Step::Gender),
            Step::Style => Some(Step::Interests),
            Step::Lesson => Some(Step::Style),
        }
    }

    /// One-based position for "Step N of 5" displays.
    pub fn number(&self) -> usize {
        match self {
            Step::Age => 1,
            Step::Gender => 2,
            Step::Interests => 3,
            Step::Style => 4,
            Step::Lesson => 5,
        }
    }

    /// Whether this step moves on by itself once valid. The first step does
    /// not (its default age is already valid, so it waits for confirmation)
    /// and the last requires an explicit submit.
    pub fn auto_advances(&self) -> bool {
        matches!(self, Step::Gender | Step::Interests | Step::Style)
    }

    /// This step's validation predicate against a profile.
    pub fn valid_for(&self, profile: &Profile) -> bool {
        match self {
            Step::Age => (AGE_MIN..=AGE_MAX).contains(&profile.age),
            Step::Gender => profile.gender.is_some(),
            Step::Interests => !profile.interests.is_empty(),
            Step::Style => profile.style.is_some(),
            Step::Lesson => !profile.lesson.trim().is_empty(),
        }
    }

    pub fn all() -> &'static [Step] {
        &[
            Step::Age,
            Step::Gender,
            Step::Interests,
            Step::Style,
            Step::Lesson,
        ]
    }
}

/// First step whose predicate fails, if any.
pub fn first_unmet_step(profile: &Profile) -> Option<Step> {
    Step::all().iter().copied().find(|s| !s.valid_for(profile))
}

/// The wizard: current step, the profile under construction, and the
/// debounced auto-advance deadline.
#[derive(Debug)]
pub struct Wizard {
    step: Step,
    profile: Profile,
    pending_advance: Option<Instant>,
    generating: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: Step::Age,
            profile: Profile::default(),
            pending_advance: None,
            generating: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Whether a submitted profile is out for generation. The wizard refuses
    /// all input until `generation_finished` is called.
    pub fn generating(&self) -> bool {
        self.generating
    }

    pub fn current_valid(&self) -> bool {
        self.step.valid_for(&self.profile)
    }

    pub fn form_valid(&self) -> bool {
        first_unmet_step(&self.profile).is_none()
    }

    /// Move to the next step if the current one validates. Silently does
    /// nothing otherwise.
    pub fn advance(&mut self) {
        if self.generating {
            return;
        }
        if !self.current_valid() {
            return;
        }
        if let Some(next) = self.step.next() {
            log::debug!("wizard: {:?} -> {:?}", self.step, next);
            self.step = next;
            // A deadline scheduled on the old step must never fire here.
            self.pending_advance = None;
        }
    }

    /// Move to the previous step. No-op on the first.
    pub fn retreat(&mut self) {
        if self.generating {
            return;
        }
        if let Some(prev) = self.step.prev() {
            log::debug!("wizard: {:?} -> {:?}", self.step, prev);
            self.step = prev;
            self.pending_advance = None;
        }
    }

    pub fn set_age(&mut self, age: u8, now: Instant) {
        if self.generating {
            return;
        }
        self.profile.age = age;
        self.reschedule_auto_advance(now);
    }

    /// Pick a gender; re-selection replaces the previous pick.
    pub fn set_gender(&mut self, gender: Gender, now: Instant) {
        if self.generating {
            return;
        }
        self.profile.gender = Some(gender);
        self.reschedule_auto_advance(now);
    }

    /// Toggle an interest: selected entries are removed, new ones appended.
    /// The relative order of the other selections is untouched.
    pub fn toggle_interest(&mut self, interest: Interest, now: Instant) {
        if self.generating {
            return;
        }
        if self.profile.interests.contains(&interest) {
            self.profile.interests.retain(|i| *i != interest);
        } else {
            self.profile.interests.push(interest);
        }
        self.reschedule_auto_advance(now);
    }

    /// Pick a style; re-selection replaces the previous pick.
    pub fn set_style(&mut self, style: StoryStyle, now: Instant) {
        if self.generating {
            return;
        }
        self.profile.style = Some(style);
        self.reschedule_auto_advance(now);
    }

    pub fn set_lesson(&mut self, lesson: impl Into<String>, now: Instant) {
        if self.generating {
            return;
        }
        self.profile.lesson = lesson.into();
        self.reschedule_auto_advance(now);
    }

    /// Every mutation lands here: the outstanding deadline is dropped, and a
    /// new one is armed only if the current step auto-advances and currently
    /// validates. Replacing the deadline wholesale is what makes the
    /// debounce safe: a stale timer cannot fire because it no longer exists.
    fn reschedule_auto_advance(&mut self, now: Instant) {
        self.pending_advance = if self.step.auto_advances() && self.current_valid() {
            Some(now + AUTO_ADVANCE_DELAY)
        } else {
            None
        };
    }

    /// Fire the auto-advance if its deadline has passed. Returns true when a
    /// step transition happened. The event loop calls this every tick.
    pub fn poll_auto_advance(&mut self, now: Instant) -> bool {
        if self.generating {
            return false;
        }
        match self.pending_advance {
            Some(deadline) if now >= deadline => {
                self.pending_advance = None;
                let before = self.step;
                self.advance();
                self.step != before
            }
            _ => false,
        }
    }

    /// Freeze the profile for generation. Returns it only when every step's
    /// predicate holds; the wizard then ignores input until
    /// `generation_finished`.
    pub fn submit(&mut self) -> Option<Profile> {
        if self.generating || !self.form_valid() {
            return None;
        }
        log::debug!("wizard: submitting profile");
        self.generating = true;
        self.pending_advance = None;
        Some(self.profile.clone())
    }

    /// Return the wizard to an interactive state after generation ends. On
    /// failure the profile is kept so the user can retry without retyping.
    pub fn generation_finished(&mut self) {
        self.generating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    fn filled_wizard(now: Instant) -> Wizard {
        let mut wizard = Wizard::new();
        wizard.set_age(6, now);
        wizard.advance();
        wizard.set_gender(Gender::Girl, now);
        wizard.advance();
        wizard.toggle_interest(Interest::Space, now);
        wizard.advance();
        wizard.set_style(StoryStyle::Magical, now);
        wizard.advance();
        wizard.set_lesson("sharing is caring", now);
        wizard
    }

    #[test]
    fn test_step_order_round_trip() {
        let mut step = Step::Age;
        let mut seen = vec![step];
        while let Some(next) = step.next() {
            step = next;
            seen.push(step);
        }
        assert_eq!(seen, Step::all());
        assert_eq!(step, Step::Lesson);

        while let Some(prev) = step.prev() {
            step = prev;
        }
        assert_eq!(step, Step::Age);
        assert_eq!(Step::Age.number(), 1);
        assert_eq!(Step::Lesson.number(), 5);
    }

    #[test]
    fn test_each_predicate_tracks_only_its_field() {
        let mut profile = Profile {
            age: 6,
            gender: Some(Gender::Boy),
            interests: vec![Interest::Animals],
            style: Some(StoryStyle::Funny),
            lesson: "bravery".to_string(),
        };
        assert_eq!(first_unmet_step(&profile), None);

        profile.age = 1;
        assert!(!Step::Age.valid_for(&profile));
        assert!(Step::Gender.valid_for(&profile));
        profile.age = 13;
        assert!(!Step::Age.valid_for(&profile));
        profile.age = 6;

        profile.gender = None;
        assert!(!Step::Gender.valid_for(&profile));
        assert!(Step::Interests.valid_for(&profile));
        profile.gender = Some(Gender::Boy);

        profile.interests.clear();
        assert!(!Step::Interests.valid_for(&profile));
        assert!(Step::Style.valid_for(&profile));
        profile.interests.push(Interest::Animals);

        profile.style = None;
        assert!(!Step::Style.valid_for(&profile));
        profile.style = Some(StoryStyle::Funny);

        profile.lesson = "   ".to_string();
        assert!(!Step::Lesson.valid_for(&profile));
        assert!(Step::Age.valid_for(&profile));
    }

    #[test]
    fn test_advance_rejected_silently_when_invalid() {
        let now = Instant::now();
        let mut wizard = Wizard::new();
        wizard.set_age(13, now);
        wizard.advance();
        assert_eq!(wizard.step(), Step::Age);

        wizard.set_age(5, now);
        wizard.advance();
        assert_eq!(wizard.step(), Step::Gender);

        // Gender unset, advance refuses.
        wizard.advance();
        assert_eq!(wizard.step(), Step::Gender);
    }

    #[test]
    fn test_retreat_stops_at_first_step() {
        let mut wizard = Wizard::new();
        wizard.retreat();
        assert_eq!(wizard.step(), Step::Age);

        wizard.advance();
        assert_eq!(wizard.step(), Step::Gender);
        wizard.retreat();
        assert_eq!(wizard.step(), Step::Age);
    }

    #[test]
    fn test_first_step_never_auto_advances() {
        let base = Instant::now();
        let mut wizard = Wizard::new();
        // Default age is already valid, but step 1 waits for confirmation.
        wizard.set_age(7, base);
        assert!(!wizard.poll_auto_advance(at(base, 10_000)));
        assert_eq!(wizard.step(), Step::Age);
    }

    #[test]
    fn test_last_step_never_auto_advances_or_submits_itself() {
        let base = Instant::now();
        let mut wizard = filled_wizard(base);
        assert_eq!(wizard.step(), Step::Lesson);
        wizard.set_lesson("patience", at(base, 100));
        assert!(!wizard.poll_auto_advance(at(base, 10_000)));
        assert_eq!(wizard.step(), Step::Lesson);
        assert!(!wizard.generating());
    }

    #[test]
    fn test_auto_advance_fires_once_after_delay() {
        let base = Instant::now();
        let mut wizard = Wizard::new();
        wizard.advance();
        assert_eq!(wizard.step(), Step::Gender);

        wizard.set_gender(Gender::Other, base);
        // Just before the deadline nothing happens.
        assert!(!wizard.poll_auto_advance(at(base, 799)));
        assert_eq!(wizard.step(), Step::Gender);
        // At the deadline the step moves exactly once.
        assert!(wizard.poll_auto_advance(at(base, 800)));
        assert_eq!(wizard.step(), Step::Interests);
        assert!(!wizard.poll_auto_advance(at(base, 10_000)));
        assert_eq!(wizard.step(), Step::Interests);
    }

    #[test]
    fn test_debounce_only_last_mutation_counts() {
        let base = Instant::now();
        let mut wizard = Wizard::new();
        wizard.advance();
        wizard.set_gender(Gender::Boy, base);
        wizard.set_gender(Gender::Girl, at(base, 300));
        wizard.set_gender(Gender::Other, at(base, 600));

        // 800ms after the first mutation, but only 200ms after the last.
        assert!(!wizard.poll_auto_advance(at(base, 800)));
        assert!(!wizard.poll_auto_advance(at(base, 1_399)));
        assert!(wizard.poll_auto_advance(at(base, 1_400)));
        assert_eq!(wizard.step(), Step::Interests);
        assert_eq!(wizard.profile().gender, Some(Gender::Other));
    }

    /// Walk a wizard sitting on the gender step to the interests step.
    fn advance_to_interests(wizard: &mut Wizard, now: Instant) {
        wizard.set_gender(Gender::Other, now);
        wizard.advance();
        assert_eq!(wizard.step(), Step::Interests);
    }

    #[test]
    fn test_mutation_that_invalidates_cancels_pending_advance() {
        let base = Instant::now();
        let mut wizard = Wizard::new();
        wizard.advance();
        advance_to_interests(&mut wizard, base);

        wizard.toggle_interest(Interest::Music, at(base, 100));
        // Removing the only interest makes the step invalid again.
        wizard.toggle_interest(Interest::Music, at(base, 200));
        assert!(!wizard.poll_auto_advance(at(base, 10_000)));
        assert_eq!(wizard.step(), Step::Interests);
    }

    #[test]
    fn test_explicit_navigation_drops_stale_deadline() {
        let base = Instant::now();
        let mut wizard = Wizard::new();
        wizard.advance();
        wizard.set_gender(Gender::Girl, base);
        // User outruns the debounce with an explicit advance.
        wizard.advance();
        assert_eq!(wizard.step(), Step::Interests);
        // The old gender-step deadline must not fire on the interests step.
        assert!(!wizard.poll_auto_advance(at(base, 800)));
        assert_eq!(wizard.step(), Step::Interests);

        wizard.toggle_interest(Interest::Art, at(base, 900));
        wizard.retreat();
        assert!(!wizard.poll_auto_advance(at(base, 2_000)));
        assert_eq!(wizard.step(), Step::Gender);
    }

    #[test]
    fn test_interest_toggle_is_an_involution() {
        let base = Instant::now();
        let mut wizard = Wizard::new();
        wizard.toggle_interest(Interest::Animals, base);
        wizard.toggle_interest(Interest::Space, base);
        wizard.toggle_interest(Interest::Music, base);

        // Toggling the last entry twice restores the exact order.
        wizard.toggle_interest(Interest::Music, base);
        wizard.toggle_interest(Interest::Music, base);
        assert_eq!(
            wizard.profile().interests,
            vec![Interest::Animals, Interest::Space, Interest::Music]
        );

        // Toggling a middle entry twice keeps the set and the relative
        // order of the untouched entries; the re-added one joins the end.
        wizard.toggle_interest(Interest::Space, base);
        assert_eq!(
            wizard.profile().interests,
            vec![Interest::Animals, Interest::Music]
        );
        wizard.toggle_interest(Interest::Space, base);
        assert_eq!(
            wizard.profile().interests,
            vec![Interest::Animals, Interest::Music, Interest::Space]
        );
    }

    #[test]
    fn test_submit_requires_every_predicate() {
        let base = Instant::now();
        let mut wizard = Wizard::new();
        assert!(wizard.submit().is_none());

        let mut wizard = filled_wizard(base);
        assert!(wizard.form_valid());
        let profile = wizard.submit().expect("complete form should submit");
        assert_eq!(profile.age, 6);
        assert_eq!(profile.interests, vec![Interest::Space]);
        assert!(wizard.generating());
    }

    #[test]
    fn test_wizard_ignores_input_while_generating() {
        let base = Instant::now();
        let mut wizard = filled_wizard(base);
        wizard.submit().expect("complete form should submit");

        wizard.set_lesson("something else", at(base, 100));
        wizard.retreat();
        assert!(wizard.submit().is_none());
        assert_eq!(wizard.profile().lesson, "sharing is caring");
        assert_eq!(wizard.step(), Step::Lesson);

        // Failure path: the form unlocks with the profile intact.
        wizard.generation_finished();
        assert!(!wizard.generating());
        assert_eq!(wizard.profile().lesson, "sharing is caring");
        assert!(wizard.submit().is_some());
    }
}
