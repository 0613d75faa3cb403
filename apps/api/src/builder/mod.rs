//! Resume builder: renders the structured builder form as a Markdown resume.

pub mod handlers;

use serde::Deserialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub graduation_date: String,
    pub gpa: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    pub name: String,
    pub technologies: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
    pub link: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillGroups {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub languages: Vec<String>,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeForm {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub projects: Vec<ProjectItem>,
    pub skills: SkillGroups,
    pub template: Option<String>,
}

impl ResumeForm {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.personal_info.full_name.trim().is_empty() {
            return Err(AppError::Validation("Full name is required".to_string()));
        }
        if self.personal_info.email.trim().is_empty() {
            return Err(AppError::Validation("Email is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Template {
    #[default]
    Modern,
    Professional,
    Minimal,
    Creative,
}

impl Template {
    /// Case-insensitive; anything unrecognized falls back to Modern.
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("professional") => Template::Professional,
            Some("minimal") => Template::Minimal,
            Some("creative") => Template::Creative,
            _ => Template::Modern,
        }
    }

    fn section_heading(self, title: &str) -> String {
        match self {
            Template::Modern => format!("## {}\n\n", title.to_uppercase()),
            Template::Professional => format!("## {title}\n---\n\n"),
            Template::Minimal => format!("### {title}\n\n"),
            Template::Creative => format!("## *{title}*\n\n"),
        }
    }
}

fn non_empty(values: &[&str]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn push_bullets(md: &mut String, items: &[String]) {
    for item in items.iter().map(|i| i.trim()).filter(|i| !i.is_empty()) {
        md.push_str(&format!("- {item}\n"));
    }
}

fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => format!("{s} - Present"),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} - {e}"),
    }
}

/// Renders the form as Markdown. Sections with no content are omitted.
pub fn render_markdown(form: &ResumeForm) -> String {
    let template = Template::parse(form.template.as_deref());
    let info = &form.personal_info;
    let mut md = format!("# {}\n\n", info.full_name.trim());

    let contact = non_empty(&[
        info.email.as_str(),
        info.phone.as_str(),
        info.location.as_str(),
        info.linkedin.as_str(),
        info.portfolio.as_str(),
    ]);
    if !contact.is_empty() {
        md.push_str(&contact.join(" | "));
        md.push_str("\n\n");
    }

    if !form.summary.trim().is_empty() {
        md.push_str(&template.section_heading("Summary"));
        md.push_str(form.summary.trim());
        md.push_str("\n\n");
    }

    let experience: Vec<_> = form
        .experience
        .iter()
        .filter(|e| !e.company.trim().is_empty() || !e.position.trim().is_empty())
        .collect();
    if !experience.is_empty() {
        md.push_str(&template.section_heading("Experience"));
        for item in experience {
            let title = non_empty(&[item.position.as_str(), item.company.as_str()]).join(" - ");
            md.push_str(&format!("**{title}**"));
            let dates = date_range(&item.start_date, &item.end_date);
            if !dates.is_empty() {
                md.push_str(&format!(" ({dates})"));
            }
            md.push('\n');
            if !item.description.trim().is_empty() {
                md.push_str(item.description.trim());
                md.push('\n');
            }
            push_bullets(&mut md, &item.responsibilities);
            push_bullets(&mut md, &item.achievements);
            md.push('\n');
        }
    }

    let education: Vec<_> = form
        .education
        .iter()
        .filter(|e| !e.school.trim().is_empty() || !e.degree.trim().is_empty())
        .collect();
    if !education.is_empty() {
        md.push_str(&template.section_heading("Education"));
        for item in education {
            let degree = non_empty(&[item.degree.as_str(), item.field.as_str()]).join(" in ");
            let title = non_empty(&[degree.as_str(), item.school.as_str()]).join(" - ");
            md.push_str(&format!("**{title}**"));
            if !item.graduation_date.trim().is_empty() {
                md.push_str(&format!(" ({})", item.graduation_date.trim()));
            }
            md.push('\n');
            if !item.gpa.trim().is_empty() {
                md.push_str(&format!("- GPA: {}\n", item.gpa.trim()));
            }
            push_bullets(&mut md, &item.achievements);
            md.push('\n');
        }
    }

    let projects: Vec<_> = form
        .projects
        .iter()
        .filter(|p| !p.name.trim().is_empty())
        .collect();
    if !projects.is_empty() {
        md.push_str(&template.section_heading("Projects"));
        for item in projects {
            md.push_str(&format!("**{}**", item.name.trim()));
            if !item.technologies.trim().is_empty() {
                md.push_str(&format!(" ({})", item.technologies.trim()));
            }
            md.push('\n');
            if !item.description.trim().is_empty() {
                md.push_str(item.description.trim());
                md.push('\n');
            }
            push_bullets(&mut md, &item.responsibilities);
            push_bullets(&mut md, &item.achievements);
            if !item.link.trim().is_empty() {
                md.push_str(&format!("- Link: {}\n", item.link.trim()));
            }
            md.push('\n');
        }
    }

    let groups = [
        ("Technical", &form.skills.technical),
        ("Soft Skills", &form.skills.soft),
        ("Languages", &form.skills.languages),
        ("Tools", &form.skills.tools),
    ];
    let skill_lines: Vec<String> = groups
        .iter()
        .filter_map(|(label, values)| {
            let values: Vec<&str> = values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect();
            (!values.is_empty()).then(|| format!("- **{label}:** {}\n", values.join(", ")))
        })
        .collect();
    if !skill_lines.is_empty() {
        md.push_str(&template.section_heading("Skills"));
        md.extend(skill_lines);
        md.push('\n');
    }

    md.truncate(md.trim_end().len());
    md.push('\n');
    md
}

/// `<Full_Name>_resume.md`, restricted to header-safe characters.
pub fn attachment_file_name(full_name: &str) -> String {
    let stem: String = full_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    if stem.is_empty() {
        "resume.md".to_string()
    } else {
        format!("{stem}_resume.md")
    }
}
