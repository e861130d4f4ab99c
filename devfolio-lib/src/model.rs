use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Owner biography shown in the hero section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bio {
    pub name: String,
    pub role: String,
    pub description: String,
    /// Free-form avatar reference: either a URL or an embedded data URI
    pub avatar_url: String,
}

/// A single technical skill with self-assessed proficiency (0-100)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub years: u32,
    pub proficiency: u8,
}

/// Technical skills grouped into the three lists the skills section renders
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammingSkills {
    pub languages: Vec<Skill>,
    pub frameworks: Vec<Skill>,
    pub tools: Vec<Skill>,
}

/// One education entry; `year` is a free-form range string like "2018 - 2022"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub school: String,
    pub course: String,
    pub year: String,
    pub cgpa: Option<f64>,
    pub class: Option<String>,
}

/// A professional course / certification entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub certification: String,
    pub institution: String,
    pub year: String,
    pub skills: Vec<String>,
}

/// Start/end year of a work experience - either numeric or the literal "present"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum YearMark {
    Year(i32),
    Text(String),
}

impl YearMark {
    /// The literal used by ongoing positions
    pub fn present() -> Self {
        YearMark::Text("present".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub place: String,
    pub position: String,
    pub start_year: YearMark,
    pub end_year: YearMark,
    pub duties: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub website: String,
    pub tech_stack: Vec<String>,
    pub description: String,
    pub duties: Vec<String>,
    pub roles: Vec<String>,
    pub start_date: String,
    /// None while the project is ongoing
    pub end_date: Option<String>,
}

/// Social and contact handles; empty strings are allowed and mean "not set"
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub facebook: String,
    pub linkedin: String,
    pub github: String,
    pub phone_number: String,
    pub email: String,
    pub website: String,
}

/// The three built-in visual themes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    Minimal,
    Cyberpunk,
    Elegant,
}

impl Default for ThemeType {
    fn default() -> Self {
        ThemeType::Minimal
    }
}

/// One page section toggle; `order` drives ascending render order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfig {
    pub id: String,
    /// Display name shown in the section manager
    pub name: String,
    pub visible: bool,
    pub order: u32,
}

/// Custom headings per section; None falls back to the section's default title
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionTitles {
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub projects: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

/// Per-mode color overrides; None or empty string means "inherit theme default"
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColorOverrides {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub bg_main: Option<String>,
    #[serde(default)]
    pub text_main: Option<String>,
    #[serde(default)]
    pub card_bg: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
}

impl ColorOverrides {
    /// All-empty override set, as written by the settings editor before any
    /// slot is customized
    pub fn empty() -> Self {
        Self {
            primary: Some(String::new()),
            bg_main: Some(String::new()),
            text_main: Some(String::new()),
            card_bg: Some(String::new()),
            border: Some(String::new()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomColors {
    #[serde(default)]
    pub light: Option<ColorOverrides>,
    #[serde(default)]
    pub dark: Option<ColorOverrides>,
}

/// Application settings persisted inside the aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub theme: ThemeType,
    pub dark_mode: bool,
    /// None signals first-run state; set permanently by the first registration
    pub admin_password: Option<String>,
    pub resume_url: Option<String>,
    /// Daily visit tally keyed by calendar date in YYYY-MM-DD form
    #[serde(default)]
    pub visit_count: BTreeMap<String, u64>,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub section_titles: Option<SectionTitles>,
    #[serde(default)]
    pub custom_colors: Option<CustomColors>,
}

impl AppSettings {
    /// Sections that should render, ascending by `order`. Hidden sections are
    /// excluded here but stay in storage.
    pub fn visible_sections(&self) -> Vec<&SectionConfig> {
        let mut visible: Vec<&SectionConfig> =
            self.sections.iter().filter(|s| s.visible).collect();
        visible.sort_by_key(|s| s.order);
        visible
    }

    /// Backfill fields that documents written by older versions may lack.
    /// Returns true if anything was filled in, so the caller knows the
    /// settings drifted from what is persisted.
    pub fn normalize(&mut self) -> bool {
        let mut updated = false;
        if self.sections.is_empty() {
            self.sections = default_sections();
            updated = true;
        }
        if self.section_titles.is_none() {
            self.section_titles = Some(default_section_titles());
            updated = true;
        }
        if self.custom_colors.is_none() {
            self.custom_colors = Some(CustomColors {
                light: Some(ColorOverrides::empty()),
                dark: Some(ColorOverrides::empty()),
            });
            updated = true;
        }
        updated
    }

    pub fn total_visits(&self) -> u64 {
        self.visit_count.values().sum()
    }
}

/// The root aggregate: all portfolio content and settings, persisted as one
/// document and replaced wholesale on save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub bio: Bio,
    pub programming_skills: ProgrammingSkills,
    pub education: Vec<Education>,
    pub professional_courses: Vec<Certification>,
    pub soft_skills: Vec<String>,
    pub work_experiences: Vec<WorkExperience>,
    pub projects: Vec<Project>,
    pub contact_info: ContactInfo,
    pub settings: AppSettings,
}

impl PortfolioData {
    /// Built-in default content, written on first access and by factory reset
    pub fn initial() -> Self {
        Self {
            bio: Bio {
                name: "John Doe".to_string(),
                role: "Full-Stack Software Engineer".to_string(),
                description: "I build robust, scalable web applications with a focus on \
                    high-performance backends and intuitive user interfaces. Passionate \
                    about AI integration and automation."
                    .to_string(),
                avatar_url: "https://picsum.photos/400/400".to_string(),
            },
            programming_skills: ProgrammingSkills {
                languages: vec![
                    skill("HTML", 6, 100),
                    skill("CSS", 6, 90),
                    skill("JavaScript", 6, 90),
                    skill("PHP", 5, 80),
                    skill("Python", 3, 70),
                    skill("TypeScript", 2, 65),
                ],
                frameworks: vec![
                    skill("Laravel", 5, 85),
                    skill("React", 4, 85),
                    skill("Express.js", 4, 80),
                    skill("Next.js", 2, 70),
                    skill("CodeIgniter", 2, 60),
                ],
                tools: vec![
                    skill("Bootstrap", 5, 95),
                    skill("Tailwind", 4, 90),
                    skill("Firebase", 3, 75),
                    skill("Supabase", 1, 50),
                ],
            },
            education: vec![Education {
                school: "University of Technology".to_string(),
                course: "B.Sc. Computer Science".to_string(),
                year: "2018 - 2022".to_string(),
                cgpa: Some(3.85),
                class: Some("First Class".to_string()),
            }],
            professional_courses: vec![Certification {
                certification: "Full Stack Web Development".to_string(),
                institution: "Tech Academy".to_string(),
                year: "2023".to_string(),
                skills: vec![
                    "React".to_string(),
                    "Node.js".to_string(),
                    "PostgreSQL".to_string(),
                    "Tailwind CSS".to_string(),
                ],
            }],
            soft_skills: vec![
                "Office management and secretariat duties.".to_string(),
                "Ability to organize meetings and events.".to_string(),
                "Multi-tasking efficiency.".to_string(),
                "Independent problem solving.".to_string(),
                "Graphics Design proficiency.".to_string(),
                "Project management and entrepreneurship.".to_string(),
                "Negotiation techniques.".to_string(),
            ],
            work_experiences: vec![
                WorkExperience {
                    place: "Global Solutions Inc.".to_string(),
                    position: "Senior Full Stack Developer".to_string(),
                    start_year: YearMark::Year(2022),
                    end_year: YearMark::present(),
                    duties: vec![
                        "Architected scalable microservices using Node.js and AWS.".to_string(),
                        "Led a team of 5 developers in delivering a high-traffic fintech platform."
                            .to_string(),
                        "Optimized database queries reducing latency by 40%.".to_string(),
                    ],
                },
                WorkExperience {
                    place: "Innovate AI".to_string(),
                    position: "Junior Developer".to_string(),
                    start_year: YearMark::Year(2020),
                    end_year: YearMark::Year(2022),
                    duties: vec![
                        "Developed and maintained responsive React components.".to_string(),
                        "Integrated third-party APIs for real-time data processing.".to_string(),
                        "Collaborated with UX designers to improve accessibility.".to_string(),
                    ],
                },
            ],
            projects: vec![Project {
                name: "Alpha-Ed - ScriptMarka".to_string(),
                website: "scriptmarka.com".to_string(),
                tech_stack: vec![
                    "ReactJs".to_string(),
                    "NodeJs".to_string(),
                    "Firebase".to_string(),
                    "OCR".to_string(),
                    "NLP".to_string(),
                ],
                description: "AI-driven EdTech tool for automated grading of handwritten \
                    descriptive exam scripts."
                    .to_string(),
                duties: vec![
                    "Engineered a Semantic Grading Model using NLP.".to_string(),
                    "Built end-to-end OCR pipelines for handwritten digitizing.".to_string(),
                    "Architected secure backend infrastructure on Firebase.".to_string(),
                ],
                roles: vec!["Founder".to_string(), "CTO".to_string()],
                start_date: "Jan 2024".to_string(),
                end_date: None,
            }],
            contact_info: ContactInfo {
                facebook: "https://facebook.com/johndoe".to_string(),
                linkedin: "https://linkedin.com/in/johndoe".to_string(),
                github: "https://github.com/johndoe".to_string(),
                phone_number: "+1 234 567 890".to_string(),
                email: "john.doe@example.com".to_string(),
                website: "johndoe.dev".to_string(),
            },
            settings: AppSettings {
                theme: ThemeType::Minimal,
                dark_mode: true,
                admin_password: None,
                resume_url: None,
                visit_count: BTreeMap::new(),
                sections: default_sections(),
                section_titles: Some(default_section_titles()),
                custom_colors: Some(CustomColors {
                    light: Some(ColorOverrides::empty()),
                    dark: Some(ColorOverrides::empty()),
                }),
            },
        }
    }

    /// Empty all content fields while preserving `settings` and the avatar
    /// reference. Operates on the in-memory draft only; nothing is persisted
    /// until an explicit save.
    pub fn clear_content(&mut self) {
        self.bio = Bio {
            name: String::new(),
            role: String::new(),
            description: String::new(),
            avatar_url: self.bio.avatar_url.clone(),
        };
        self.programming_skills = ProgrammingSkills::default();
        self.education.clear();
        self.professional_courses.clear();
        self.soft_skills.clear();
        self.work_experiences.clear();
        self.projects.clear();
        self.contact_info = ContactInfo::default();
    }
}

impl Default for PortfolioData {
    fn default() -> Self {
        Self::initial()
    }
}

fn skill(name: &str, years: u32, proficiency: u8) -> Skill {
    Skill {
        name: name.to_string(),
        years,
        proficiency,
    }
}

fn default_sections() -> Vec<SectionConfig> {
    let section = |id: &str, name: &str, order: u32| SectionConfig {
        id: id.to_string(),
        name: name.to_string(),
        visible: true,
        order,
    };
    vec![
        section("hero", "Hero Section", 1),
        section("skills", "Skills & Tech", 2),
        section("experience", "Work Experience", 3),
        section("projects", "Projects", 4),
        section("contact", "Contact Info", 5),
    ]
}

fn default_section_titles() -> SectionTitles {
    SectionTitles {
        experience: Some("Timeline".to_string()),
        education: Some("Knowledge".to_string()),
        certifications: Some("Verified".to_string()),
        projects: Some("Showcase".to_string()),
        skills: Some("Explored Tech".to_string()),
        contact: Some("Let's Talk".to_string()),
    }
}
