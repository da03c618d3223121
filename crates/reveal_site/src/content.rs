//! Static page content
//!
//! Inert records rendered by the views. Nothing here knows about animation.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub headline: &'static str,
    pub greeting: &'static str,
    pub tagline: &'static str,
    pub about: &'static str,
    pub objective: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SocialLink {
    pub network: &'static str,
    pub url: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Experience {
    pub title: &'static str,
    pub position: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub summary: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Education {
    pub institution: &'static str,
    pub university: &'static str,
    pub degree: &'static str,
    pub location: &'static str,
    pub summary: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SkillGroup {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub role: &'static str,
    pub summary: &'static str,
    pub image: &'static str,
}

pub const PROFILE: Profile = Profile {
    name: "Sam Rivera",
    headline: "Full Stack Developer",
    greeting: "Hello",
    tagline: "Here's who I am & what I do",
    about: "Information technology student who enjoys building tidy, dependable software.",
    objective: "To put my skills to work meeting the needs of a team and its customers.",
};

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        network: "facebook",
        url: "#",
    },
    SocialLink {
        network: "github",
        url: "https://github.com/",
    },
    SocialLink {
        network: "linkedin",
        url: "https://www.linkedin.com/",
    },
    SocialLink {
        network: "instagram",
        url: "https://www.instagram.com/",
    },
];

pub const EXPERIENCE: &[Experience] = &[
    Experience {
        title: "Web Development Intern",
        position: "Intern",
        company: "Northwind Studio",
        period: "Jan 2024 - Jun 2024",
        summary: "Built responsive landing pages and small REST services.",
    },
    Experience {
        title: "Freelance Developer",
        position: "Contractor",
        company: "Self-employed",
        period: "Jul 2024 - Present",
        summary: "Delivered portfolio and storefront sites for local clients.",
    },
];

pub const EDUCATION: &[Education] = &[
    Education {
        institution: "City Institute of Technology",
        university: "State Technological University",
        degree: "B.Sc. Information Technology",
        location: "Springfield",
        summary: "Coursework in data structures, databases and web engineering.",
    },
    Education {
        institution: "Springfield Higher Secondary School",
        university: "State Board",
        degree: "Higher Secondary Certificate",
        location: "Springfield",
        summary: "Science stream with computer science electives.",
    },
];

pub const SKILLS: &[SkillGroup] = &[
    SkillGroup {
        title: "Skills",
        items: &[
            "HTML",
            "CSS",
            "JavaScript",
            "Bootstrap",
            "TailwindCSS",
            "React",
            "Express",
            "Node",
            "MongoDB",
        ],
    },
    SkillGroup {
        title: "Soft Skills",
        items: &[
            "Communication",
            "Teamwork",
            "Quick Learning",
            "Time Management",
        ],
    },
    SkillGroup {
        title: "Languages",
        items: &["Gujarati", "Hindi", "English"],
    },
];

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Recipe Finder",
        role: "Frontend",
        summary: "Search-as-you-type recipe browser backed by a public API.",
        image: "img/recipe-finder.png",
    },
    Project {
        title: "Task Board",
        role: "Full stack",
        summary: "Kanban board with drag and drop and a Node backend.",
        image: "img/task-board.png",
    },
    Project {
        title: "Weather Now",
        role: "Frontend",
        summary: "Current conditions and a five day forecast for any city.",
        image: "img/weather-now.png",
    },
];

pub const FOOTER_BLOCKS: &[&str] = &["About", "Quick Links", "Get in Touch"];

/// Every skill item across all groups, in display order
pub fn skill_items() -> impl Iterator<Item = &'static str> {
    SKILLS.iter().flat_map(|g| g.items.iter().copied())
}
