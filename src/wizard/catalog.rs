//! The production onboarding question catalog.
//!
//! Seven steps covering what a member can teach, wants to learn, and when
//! and how they want to meet. Option lists are shared with the matching and
//! browse surfaces of the platform.

use crate::error::CatalogError;

use super::step::{StepDefinition, StepKind, StepRegistry};

/// Skills members can offer or request, shown in the searchable pickers.
pub const PREDEFINED_SKILLS: &[&str] = &[
    "JavaScript",
    "Python",
    "React",
    "Node.js",
    "Web Design",
    "UI/UX Design",
    "Graphic Design",
    "Photography",
    "Video Editing",
    "Content Writing",
    "Digital Marketing",
    "SEO",
    "Social Media Marketing",
    "Data Analysis",
    "Machine Learning",
    "Mobile Development",
    "Guitar",
    "Piano",
    "Singing",
    "Dancing",
    "Yoga",
    "Fitness Training",
    "Cooking",
    "Baking",
    "Drawing",
    "Painting",
    "Public Speaking",
    "Language Teaching",
    "Math Tutoring",
    "HTML/CSS",
    "TypeScript",
    "Vue.js",
    "Angular",
    "Express.js",
    "MongoDB",
    "SQL",
    "Java",
    "C++",
    "C#",
    "Swift",
    "Kotlin",
    "Flutter",
    "Dart",
    "PHP",
    "Ruby",
    "Go",
    "Rust",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "Git",
    "Linux",
    "DevOps",
    "Cybersecurity",
    "Blockchain",
    "Web3",
    "Game Development",
    "3D Modeling",
    "Animation",
    "Illustration",
    "Music Production",
    "Sound Design",
    "Podcasting",
    "Creative Writing",
    "Business Strategy",
    "Project Management",
    "Agile",
    "Scrum",
    "Financial Planning",
    "Investing",
    "Trading",
    "Accounting",
    "Spanish",
    "French",
    "German",
    "Mandarin",
    "Japanese",
    "Korean",
    "Meditation",
    "Mindfulness",
    "Life Coaching",
    "Career Counseling",
];

/// Timezone choices for the dropdown step.
pub const TIMEZONES: &[&str] = &[
    "GMT-12:00",
    "GMT-11:00",
    "GMT-10:00",
    "GMT-09:00",
    "GMT-08:00 (PST)",
    "GMT-07:00 (MST)",
    "GMT-06:00 (CST)",
    "GMT-05:00 (EST)",
    "GMT-04:00",
    "GMT+05:30 (IST)",
    "GMT+08:00",
    "GMT+10:00",
];

/// Daily time-slot ranges for the availability step.
pub const TIME_SLOTS: &[&str] = &[
    "Early Morning (6AM-9AM)",
    "Morning (9AM-12PM)",
    "Afternoon (12PM-3PM)",
    "Evening (3PM-6PM)",
    "Night (6PM-9PM)",
    "Late Night (9PM-12AM)",
];

/// Message the bot sends once the last answer is committed.
pub const COMPLETION_MESSAGE: &str = "🎉 Fantastic! Your profile is complete.";

/// Build the production step registry.
pub fn default_registry() -> Result<StepRegistry, CatalogError> {
    let mut availability: Vec<&str> = TIME_SLOTS.to_vec();
    availability.push("Flexible");

    StepRegistry::new(vec![
        StepDefinition::new(
            "First, what skills can you teach others?",
            "skills_to_teach",
            StepKind::SearchableMultiChoice,
            PREDEFINED_SKILLS.to_vec(),
        ),
        StepDefinition::new(
            "Awesome! Now, what skills would you like to learn?",
            "skills_to_learn",
            StepKind::SearchableMultiChoice,
            PREDEFINED_SKILLS.to_vec(),
        ),
        StepDefinition::new(
            "Perfect! How many teaching/learning sessions would you like per week?",
            "sessions_wanted",
            StepKind::SingleChoice,
            vec!["1-2 sessions", "3-4 sessions", "5+ sessions", "Flexible"],
        ),
        StepDefinition::new(
            "Do you prefer weekdays, weekends, or both for your sessions?",
            "preferred_days",
            StepKind::SingleChoice,
            vec![
                "Weekdays only",
                "Weekends only",
                "Both weekdays and weekends",
                "Flexible",
            ],
        ),
        StepDefinition::new(
            "What's your timezone? Select from the list:",
            "timezone",
            StepKind::Dropdown,
            TIMEZONES.to_vec(),
        ),
        StepDefinition::new(
            "What time slots work best for you? You can select multiple:",
            "availability",
            StepKind::MultiChoice,
            availability,
        ),
        StepDefinition::new(
            "How would you prefer to connect with others? Select all that apply:",
            "preferred_format",
            StepKind::MultiChoice,
            vec![
                "Video Call",
                "In-Person",
                "Chat-Based",
                "Phone Call",
                "Flexible",
            ],
        ),
    ])
}
