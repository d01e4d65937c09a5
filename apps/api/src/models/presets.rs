//! Quick-start role presets. Loading one swaps the career content and keeps
//! the person's identity and contact details.

use crate::models::resume::{Experience, Project, ResumeData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Developer,
    Designer,
    Marketing,
}

impl Preset {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "developer" => Some(Preset::Developer),
            "designer" => Some(Preset::Designer),
            "marketing" => Some(Preset::Marketing),
            _ => None,
        }
    }
}

struct PresetContent {
    title: &'static str,
    skills: &'static str,
    about: &'static str,
    experience: [&'static str; 4], // role, company, duration, description
    project: [&'static str; 3],    // name, description, technologies
}

fn content(preset: Preset) -> PresetContent {
    match preset {
        Preset::Developer => PresetContent {
            title: "Full Stack Developer",
            skills: "React, Node.js, TypeScript, PostgreSQL, Docker, AWS",
            about: "Dedicated developer who loves solving complex backend problems. I may not be \
                    the loudest person in the room, but I ensure my code speaks for itself. \
                    Always eager to learn new technologies.",
            experience: [
                "Junior Developer",
                "Software House Co.",
                "2022 - Present",
                "Assisted in developing web applications using React. Fixed bugs and improved API performance.",
            ],
            project: [
                "Task Manager API",
                "Built a RESTful API for task management with authentication.",
                "Express, MongoDB",
            ],
        },
        Preset::Designer => PresetContent {
            title: "UI/UX Designer",
            skills: "Figma, Adobe XD, Photoshop, User Research, Prototyping",
            about: "Creative thinker focused on user-centered design. I believe good design \
                    should be invisible and intuitive. Diligent in research and testing to \
                    ensure the best user experience.",
            experience: [
                "Graphic Designer",
                "Creative Agency",
                "2021 - 2023",
                "Designed marketing materials and website mockups for various clients. Collaborated with developers to ensure design fidelity.",
            ],
            project: [
                "Mobile Banking App Redesign",
                "Redesigned the user flow for a banking app to reduce friction in transfers.",
                "Figma",
            ],
        },
        Preset::Marketing => PresetContent {
            title: "Digital Marketer",
            skills: "SEO, Google Ads, Content Strategy, Social Media Management, Analytics",
            about: "Result-oriented marketer with a knack for data analysis. I enjoy finding \
                    patterns in consumer behavior and optimizing campaigns for better ROI. \
                    Hardworking and adaptable.",
            experience: [
                "Content Writer",
                "Media Corp",
                "2020 - 2022",
                "Wrote SEO-friendly articles and managed social media pages. Increased organic traffic by 30% in 6 months.",
            ],
            project: [
                "Brand Awareness Campaign",
                "Launched a viral social media campaign reaching 100k+ users.",
                "Facebook Ads, Instagram",
            ],
        },
    }
}

impl ResumeData {
    /// Replaces title, skills, about, experiences and projects with the preset's.
    pub fn with_preset(&self, preset: Preset) -> Self {
        let c = content(preset);
        let [role, company, duration, description] = c.experience;
        let [name, proj_description, technologies] = c.project;
        Self {
            title: c.title.to_string(),
            skills: c.skills.to_string(),
            about: c.about.to_string(),
            experiences: vec![Experience {
                id: "p1".to_string(),
                role: role.to_string(),
                company: company.to_string(),
                duration: duration.to_string(),
                description: description.to_string(),
            }],
            projects: vec![Project {
                id: "proj1".to_string(),
                name: name.to_string(),
                description: proj_description.to_string(),
                technologies: technologies.to_string(),
            }],
            ..self.clone()
        }
    }
}
