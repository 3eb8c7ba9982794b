// ABOUTME: Canned-response coach used until a real LLM provider is wired in
// ABOUTME: Keyword-steered guidance pools with a random pick inside each pool

use super::{ChatMessage, CoachProvider, CoachReply, MessageRole};
use crate::errors::AppResult;
use crate::models::{FitnessGoal, UserProfile};
use rand::seq::SliceRandom;

/// Placeholder coach with keyword-steered canned guidance
///
/// Picks the response pool by scanning the latest user message for topic
/// keywords, then a random entry inside the pool so repeated questions don't
/// read identically. No state is kept between calls.
pub struct ScriptedCoach;

const WORKOUT_POOL: &[&str] = &[
    "For a solid start, try three full-body sessions a week: squats, push-ups, rows, and a \
     10-minute walk to finish. Keep the weights light until the form feels easy.",
    "A beginner plan that works: alternate a strength day (squat, hinge, push, pull) with a \
     30-minute brisk walk or easy cycle. Rest at least one full day between strength sessions.",
    "Start with two strength days and one cardio day this week. Pick loads you could lift \
     about 12 times, stop two reps short of failure, and add a little weight each week.",
];

const NUTRITION_POOL: &[&str] = &[
    "Build each meal around a palm of protein, a fist of vegetables, and a cupped hand of \
     carbs. Logging everything for a week tells you more than any diet rule.",
    "Simple meal ideas: eggs with oatmeal in the morning, a chicken-and-rice bowl midday, \
     salmon with roast vegetables at night, and Greek yogurt when you need a snack.",
    "Aim for protein at every meal and a glass of water before each one. Small consistent \
     habits beat a perfect plan you can't keep.",
];

const MOTIVATION_POOL: &[&str] = &[
    "Motivation follows action, not the other way round. Commit to just ten minutes today; \
     once you start, finishing is the easy part.",
    "You don't need a perfect week, you need a started one. Shrink today's session until it \
     feels almost too easy, then do it.",
    "Progress hides in the boring middle weeks. Show up today, log it, and let the streak do \
     the motivating.",
];

const PROGRESS_POOL: &[&str] = &[
    "Check your dashboard for the week's workouts and streak. Trend beats snapshot: compare \
     this week to last week, not to your best day ever.",
    "Your logged workouts and meals are the real progress report. Two or three data points a \
     week is enough to see the line move.",
];

const GENERAL_POOL: &[&str] = &[
    "Happy to help with workouts, nutrition, motivation, or reading your progress. What's on \
     your mind today?",
    "Tell me a bit more about what you're working toward and I'll point you in the right \
     direction.",
];

impl ScriptedCoach {
    /// Create the scripted coach
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn pool_for(message: &str) -> &'static [&'static str] {
        let lower = message.to_lowercase();
        if ["workout", "exercise", "train", "gym", "plan"]
            .iter()
            .any(|kw| lower.contains(kw))
        {
            WORKOUT_POOL
        } else if ["eat", "meal", "food", "diet", "nutrition", "weight"]
            .iter()
            .any(|kw| lower.contains(kw))
        {
            NUTRITION_POOL
        } else if ["motivat", "lazy", "tired", "stuck", "give up"]
            .iter()
            .any(|kw| lower.contains(kw))
        {
            MOTIVATION_POOL
        } else if ["progress", "track", "streak", "stats"]
            .iter()
            .any(|kw| lower.contains(kw))
        {
            PROGRESS_POOL
        } else {
            GENERAL_POOL
        }
    }

    fn personal_touch(profile: Option<&UserProfile>) -> Option<String> {
        let profile = profile?;
        let name = profile
            .nickname
            .clone()
            .unwrap_or_else(|| profile.full_name.clone());
        let goal = match profile.fitness_goal? {
            FitnessGoal::LoseWeight => "losing weight",
            FitnessGoal::BuildMuscle => "building muscle",
            FitnessGoal::StayFit => "staying fit",
            FitnessGoal::JustExploring => return Some(format!("{name}, ")),
        };
        Some(format!("{name}, since you're focused on {goal}: "))
    }
}

impl Default for ScriptedCoach {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CoachProvider for ScriptedCoach {
    async fn reply(
        &self,
        profile: Option<&UserProfile>,
        history: &[ChatMessage],
    ) -> AppResult<CoachReply> {
        let latest = history
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map_or("", |m| m.content.as_str());

        let pool = Self::pool_for(latest);
        let base = pool
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(GENERAL_POOL[0]);

        let content = match Self::personal_touch(profile) {
            Some(prefix) => format!("{prefix}{base}"),
            None => base.to_owned(),
        };

        Ok(CoachReply { content })
    }

    fn suggested_prompts(&self) -> Vec<String> {
        [
            "Create a beginner workout plan",
            "Help me lose weight",
            "Suggest healthy meal ideas",
            "Motivate me to exercise",
            "Track my progress",
        ]
        .iter()
        .map(|s| (*s).to_owned())
        .collect()
    }
}
