//! Sample competitions shared by the test suites of every crate.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{Competition, Difficulty};

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A minimal record with the fields the filters look at
pub fn competition(title: &str, category: &str, prize_value: &str, deadline: &str) -> Competition {
    Competition {
        id: Uuid::new_v4(),
        title: title.to_string(),
        image_url: "https://images.unsplash.com/photo-1452587925148-ce544e77e70d?w=800&q=80"
            .to_string(),
        category: category.to_string(),
        deadline: deadline.to_string(),
        prize_value: prize_value.to_string(),
        difficulty: Difficulty::Medium,
        requirements: "Submit one original piece of work.".to_string(),
        rules: "Entries must be original and unpublished.".to_string(),
        external_url: None,
        is_archived: false,
        is_custom_game: false,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

struct Sample {
    title: &'static str,
    image: &'static str,
    category: &'static str,
    deadline: &'static str,
    prize_value: &'static str,
    difficulty: Difficulty,
    requirements: &'static str,
    rules: &'static str,
}

const SAMPLES: [Sample; 8] = [
    Sample {
        title: "Summer Photography Contest",
        image: "photo-1452587925148-ce544e77e70d",
        category: "Photography",
        deadline: "Jul 15, 2024",
        prize_value: "$2,500",
        difficulty: Difficulty::Easy,
        requirements: "Submit up to 3 original summer-themed photographs taken within the last 6 months.",
        rules: "All entries must be original work. No watermarks or signatures on images.",
    },
    Sample {
        title: "Mobile App Innovation Challenge",
        image: "photo-1551650975-87deedd944c3",
        category: "Technology",
        deadline: "Aug 30, 2024",
        prize_value: "$10,000",
        difficulty: Difficulty::Hard,
        requirements: "Develop a working prototype of a mobile app that addresses a social or environmental issue.",
        rules: "Apps must be original and not previously published on any app store.",
    },
    Sample {
        title: "Sustainable Fashion Design",
        image: "photo-1558769132-cb1aea458c5e",
        category: "Fashion",
        deadline: "Sep 10, 2024",
        prize_value: "$5,000",
        difficulty: Difficulty::Medium,
        requirements: "Create a fashion design using sustainable or recycled materials.",
        rules: "Designs must be original and include a written explanation of sustainability features.",
    },
    Sample {
        title: "Short Story Competition",
        image: "photo-1457369804613-52c61a468e7d",
        category: "Writing",
        deadline: "Jul 20, 2024",
        prize_value: "$1,500",
        difficulty: Difficulty::Medium,
        requirements: "Write a short story (max 3,000 words) on the theme of 'New Beginnings'.",
        rules: "Stories must be original and not previously published elsewhere.",
    },
    Sample {
        title: "Culinary Innovation Award",
        image: "photo-1556910103-1c02745aae4d",
        category: "Food",
        deadline: "Aug 5, 2024",
        prize_value: "$3,000",
        difficulty: Difficulty::Easy,
        requirements: "Create an original recipe using a specific seasonal ingredient (to be announced).",
        rules: "Recipe must be original and include high-quality photos of the finished dish.",
    },
    Sample {
        title: "Game Development Hackathon",
        image: "photo-1511512578047-dfb367046420",
        category: "Technology",
        deadline: "Oct 15, 2024",
        prize_value: "$7,500",
        difficulty: Difficulty::Hard,
        requirements: "Develop a playable game prototype in 48 hours based on a provided theme.",
        rules: "All code and assets must be created during the hackathon period.",
    },
    Sample {
        title: "Urban Mural Design Contest",
        image: "photo-1551913902-c92207136625",
        category: "Art",
        deadline: "Sep 30, 2024",
        prize_value: "$4,000",
        difficulty: Difficulty::Medium,
        requirements: "Design a mural concept for a specific urban location (details provided upon registration).",
        rules: "Design must be original and consider the cultural context of the location.",
    },
    Sample {
        title: "Fitness Challenge",
        image: "photo-1517836357463-d25dfeac3438",
        category: "Health",
        deadline: "Ongoing",
        prize_value: "$1,000 Monthly",
        difficulty: Difficulty::Easy,
        requirements: "Complete a series of fitness challenges and document your progress.",
        rules: "Participants must submit weekly updates with photo or video evidence.",
    },
];

/// The eight catalog samples, ids `1..=8`, created one hour apart
pub fn sample_competitions() -> Vec<Competition> {
    SAMPLES
        .iter()
        .zip(1u128..)
        .map(|(sample, n)| {
            let created_at = epoch() + Duration::hours(n as i64);
            Competition {
                id: Uuid::from_u128(n),
                title: sample.title.to_string(),
                image_url: format!("https://images.unsplash.com/{}?w=800&q=80", sample.image),
                category: sample.category.to_string(),
                deadline: sample.deadline.to_string(),
                prize_value: sample.prize_value.to_string(),
                difficulty: sample.difficulty,
                requirements: sample.requirements.to_string(),
                rules: sample.rules.to_string(),
                external_url: None,
                is_archived: false,
                is_custom_game: false,
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}
