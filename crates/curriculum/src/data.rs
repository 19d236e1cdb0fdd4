//! Static lesson tables, one per tier.
//!
//! Authored in pedagogical order; the store indexes them at startup.

use sparkle_core::lesson::Lesson;

fn lesson(
    id: &str,
    title: &str,
    concepts: &[&str],
    story: &str,
    activities: &[&str],
    prerequisite: Option<&str>,
    mastery: &str,
) -> Lesson {
    Lesson {
        id: id.into(),
        title: title.into(),
        concepts: concepts.iter().map(|s| s.to_string()).collect(),
        story: story.into(),
        activities: activities.iter().map(|s| s.to_string()).collect(),
        prerequisite: prerequisite.map(Into::into),
        mastery: mastery.into(),
    }
}

/// Magic Workshop (ages 3–7): visual block coding with magical themes.
pub fn early_lessons() -> Vec<Lesson> {
    vec![
        lesson(
            "mw_001",
            "Making the Wizard Move",
            &["sequence", "movement", "basic commands", "cause and effect"],
            "Help the wizard find the magical crystal by moving through the enchanted forest",
            &["drag wizard blocks", "create movement patterns", "magic animations"],
            None,
            "Child can successfully move the wizard character using sequence blocks",
        ),
        lesson(
            "mw_002",
            "Casting Spell Patterns",
            &["repetition", "loops", "patterns", "efficiency"],
            "Learn to cast repeating spells to create magical patterns and save energy",
            &["create spell sequences", "pattern recognition", "magical effects"],
            Some("mw_001"),
            "Child can create repeating patterns using loop blocks",
        ),
        lesson(
            "mw_003",
            "Magical Decisions",
            &["conditionals", "if-then", "decision making", "logic"],
            "Help the wizard make smart choices on the magical adventure",
            &["conditional spells", "branching stories", "interactive magic"],
            Some("mw_002"),
            "Child can use if-then blocks to make decisions",
        ),
        lesson(
            "mw_004",
            "Treasure Hunt Adventure",
            &["variables", "counting", "data storage"],
            "Collect magical treasures and keep track of your discoveries",
            &["treasure finding loops", "counting treasures", "data organization"],
            Some("mw_003"),
            "Child can track collected treasures with a counter",
        ),
        lesson(
            "mw_005",
            "Magic Spell Functions",
            &["functions", "reusability", "organization"],
            "Create powerful spell books that can be used over and over",
            &["create custom spells", "function blocks", "spell library"],
            Some("mw_004"),
            "Child can define and reuse a custom spell block",
        ),
    ]
}

/// Innovation Lab (ages 8–12): advanced blocks and app building.
pub fn intermediate_lessons() -> Vec<Lesson> {
    vec![
        lesson(
            "il_001",
            "Building Your First App",
            &["functions", "variables", "user interface", "event handling"],
            "Create an app that helps solve real-world problems in your community",
            &["build simple app", "button interactions", "screen navigation"],
            None,
            "Child can build a simple functional app",
        ),
        lesson(
            "il_002",
            "Data Detective",
            &["data structures", "arrays", "sorting", "searching"],
            "Become a data detective and solve mysteries using information",
            &["store user data", "calculations", "data manipulation"],
            Some("il_001"),
            "Child can store, sort, and search a small data set",
        ),
        lesson(
            "il_003",
            "Game Creator Studio",
            &["game mechanics", "sprites", "collision detection", "scoring"],
            "Design and build your own interactive games",
            &["create simple games", "score tracking", "game mechanics"],
            Some("il_002"),
            "Child can build a playable game with scoring",
        ),
        lesson(
            "il_004",
            "Robot Commander",
            &["algorithms", "sensors", "automation", "robotics"],
            "Program robots to complete missions and help humans",
            &["robot navigation", "pathfinding", "efficient solutions"],
            Some("il_003"),
            "Child can program a robot to navigate a course",
        ),
        lesson(
            "il_005",
            "Web Designer",
            &["HTML", "CSS", "web design", "responsive design"],
            "Create beautiful websites that work on all devices",
            &["create web pages", "styling", "interactive elements"],
            Some("il_004"),
            "Child can build and style a simple web page",
        ),
    ]
}

/// Professional Studio (ages 13+): real programming languages and careers.
pub fn advanced_lessons() -> Vec<Lesson> {
    vec![
        lesson(
            "ps_001",
            "Python Fundamentals",
            &["syntax", "variables", "functions", "data types"],
            "Start your journey as a professional programmer with Python",
            &["write Python programs", "solve problems", "debug code"],
            None,
            "Student can write basic Python syntax correctly",
        ),
        lesson(
            "ps_002",
            "Object-Oriented Programming",
            &["classes", "objects", "inheritance", "encapsulation"],
            "Master the principles that power modern software development",
            &["design classes", "create objects", "build systems"],
            Some("ps_001"),
            "Student can model a small system with classes and inheritance",
        ),
        lesson(
            "ps_003",
            "Web Development Mastery",
            &["JavaScript", "React", "APIs", "databases"],
            "Build full-stack web applications like a professional developer",
            &["build web apps", "API integration", "full-stack development"],
            Some("ps_002"),
            "Student can build a full-stack app with an API and a database",
        ),
        lesson(
            "ps_004",
            "Mobile App Development",
            &["mobile platforms", "mobile UI", "app store", "deployment"],
            "Create mobile apps that millions of people can use",
            &["create mobile apps", "user experience", "app store publishing"],
            Some("ps_003"),
            "Student can build and package a working mobile app",
        ),
        lesson(
            "ps_005",
            "AI and Machine Learning",
            &["algorithms", "neural networks", "data science", "ethics"],
            "Explore the cutting edge of artificial intelligence and its applications",
            &["build AI models", "data analysis", "intelligent systems"],
            Some("ps_004"),
            "Student can train and evaluate a simple model",
        ),
        lesson(
            "ps_006",
            "Software Engineering Career Prep",
            &["version control", "testing", "deployment", "teamwork"],
            "Prepare for a successful career in the tech industry",
            &["build portfolio", "practice interviews", "professional development"],
            Some("ps_005"),
            "Student has a portfolio and industry-ready workflow",
        ),
    ]
}
