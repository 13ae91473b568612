use std::fmt;

use serde::{Deserialize, Serialize};

const ABOUT_PREVIEW_CHARS: usize = 150;

/// One parsed profile page. Built once per parse; re-parsing yields a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub url: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    /// Full about text. `about_preview` gives the display form.
    pub about: String,
    pub posts: Vec<Post>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub licenses_and_certifications: Vec<LicenseAndCertification>,
    pub projects: Vec<Project>,
}

impl Profile {
    pub fn about_preview(&self) -> String {
        truncate(&self.about, ABOUT_PREVIEW_CHARS)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Headline: {}", self.headline)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "About: {}", self.about_preview())?;
        writeln!(f, "Posts: {}", self.posts.len())?;
        writeln!(f, "Experiences: {}", self.experiences.len())?;
        writeln!(f, "Education: {}", self.education.len())?;
        writeln!(
            f,
            "Licenses and Certifications: {}",
            self.licenses_and_certifications.len()
        )?;
        write!(f, "Projects: {}", self.projects.len())
    }
}

/// Activity kinds that survive the posts filter. Reposts, reactions and
/// comments never become a `Post`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Posted,
}

impl PostKind {
    #[cfg(test)]
    pub fn as_str(self) -> &'static str {
        match self {
            PostKind::Posted => "posted",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub content: String,
    pub likes: Option<u32>,
    /// `None` when the feed layout has no comment counter.
    pub comments: Option<u32>,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseAndCertification {
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: String,
    pub expiration_date: String,
    pub credential_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: String,
    pub link: String,
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
