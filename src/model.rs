//! Data structures describing the content of a resume.
//!
//! The types in this module are plain data: they are produced by a form layer or deserialized from
//! JSON and are only ever read by the layout strategies.  Optional contact details are encoded as
//! [`Option`] values and the accessors on [`PersonalInfo`] treat empty values like absent ones, so
//! the strategies never need to re-check raw strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Largest number of work experiences accepted by the renderer.
pub const MAX_EXPERIENCES: usize = 5;

/// Largest number of education entries accepted by the renderer.
pub const MAX_EDUCATION: usize = 3;

/// Contact details and the optional portrait of the resume owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact e-mail address.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// City or region.
    #[serde(default)]
    pub location: String,
    /// LinkedIn profile URL.
    #[serde(default)]
    pub linkedin: Option<String>,
    /// Encoded portrait image (PNG, JPEG, ...).
    #[serde(skip)]
    pub picture: Option<Vec<u8>>,
}

impl PersonalInfo {
    /// Creates contact details with the given name and empty contact fields.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// Returns the full name as rendered in resume headers.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the LinkedIn URL unless it is absent or blank.
    pub fn linkedin(&self) -> Option<&str> {
        self.linkedin
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Returns the portrait bytes unless they are absent or empty.
    pub fn picture(&self) -> Option<&[u8]> {
        self.picture.as_deref().filter(|bytes| !bytes.is_empty())
    }

    /// Sets the e-mail address and returns the updated value.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the phone number and returns the updated value.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the location and returns the updated value.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the LinkedIn URL and returns the updated value.
    pub fn with_linkedin(mut self, linkedin: impl Into<Option<String>>) -> Self {
        self.linkedin = linkedin.into();
        self
    }

    /// Sets the portrait bytes and returns the updated value.
    pub fn with_picture(mut self, picture: impl Into<Option<Vec<u8>>>) -> Self {
        self.picture = picture.into();
        self
    }
}

/// A single position held by the resume owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl Experience {
    /// Creates an experience entry without a description.
    pub fn new(
        company: impl Into<String>,
        position: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            company: company.into(),
            position: position.into(),
            start_date,
            end_date,
            description: String::new(),
        }
    }

    /// Sets the description and returns the updated entry.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A completed degree or qualification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub graduation_date: NaiveDate,
}

impl Education {
    pub fn new(
        institution: impl Into<String>,
        degree: impl Into<String>,
        graduation_date: NaiveDate,
    ) -> Self {
        Self {
            institution: institution.into(),
            degree: degree.into(),
            graduation_date,
        }
    }
}

/// Everything a layout strategy needs to produce a resume.
///
/// Entries in `experiences`, `education` and `skills` are rendered in the order given; callers are
/// responsible for sorting them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl ResumeData {
    /// Creates resume data for the given contact details with every section empty.
    pub fn new(personal_info: PersonalInfo) -> Self {
        Self {
            personal_info,
            ..Self::default()
        }
    }

    /// Sets the professional summary and returns the updated value.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Appends a work experience and returns the updated value.
    pub fn with_experience(mut self, experience: Experience) -> Self {
        self.experiences.push(experience);
        self
    }

    /// Appends an education entry and returns the updated value.
    pub fn with_education(mut self, education: Education) -> Self {
        self.education.push(education);
        self
    }

    /// Extends the skill list and returns the updated value.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    /// Returns the skills joined the way they are printed.
    pub fn joined_skills(&self) -> String {
        self.skills.join(", ")
    }

    /// Checks the limits the renderer relies on.
    pub fn validate(&self) -> Result<()> {
        if self.experiences.len() > MAX_EXPERIENCES {
            return Err(RenderError::Validation(format!(
                "at most {} work experiences are supported, got {}",
                MAX_EXPERIENCES,
                self.experiences.len()
            )));
        }

        if self.education.len() > MAX_EDUCATION {
            return Err(RenderError::Validation(format!(
                "at most {} education entries are supported, got {}",
                MAX_EDUCATION,
                self.education.len()
            )));
        }

        if let Some(index) = self.skills.iter().position(|skill| skill.contains('\n')) {
            return Err(RenderError::Validation(format!(
                "skill {} spans multiple lines",
                index + 1
            )));
        }

        Ok(())
    }
}
