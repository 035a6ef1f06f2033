//! Raw resume form input and its conversion into validated render requests.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Education, Experience, PersonalInfo, ResumeData};
use crate::templates::Template;

/// Values exactly as submitted by the resume form.
///
/// Optional fields arrive as empty strings or empty uploads; [`ResumeForm::into_request`] turns
/// them into absent values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    #[serde(skip)]
    pub picture: Option<Vec<u8>>,
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    /// Skills, one per line.
    pub skills: String,
    /// Template name as selected in the form.
    pub template: String,
}

impl ResumeForm {
    /// Validates the form and returns the data to render together with the chosen template.
    pub fn into_request(self) -> Result<(ResumeData, Template)> {
        let template = if self.template.trim().is_empty() {
            Template::default()
        } else {
            self.template.parse::<Template>()?
        };

        let linkedin = Some(self.linkedin).filter(|value| !value.trim().is_empty());
        let picture = self.picture.filter(|bytes| !bytes.is_empty());

        let personal_info = PersonalInfo::new(self.first_name, self.last_name)
            .with_email(self.email)
            .with_phone(self.phone)
            .with_location(self.location)
            .with_linkedin(linkedin)
            .with_picture(picture);

        let data = ResumeData {
            personal_info,
            summary: self.summary,
            experiences: self.experiences,
            education: self.education,
            skills: parse_skills(&self.skills),
        };
        data.validate()?;

        Ok((data, template))
    }
}

/// Splits free-text skills on line breaks, trimming entries and dropping blank lines.
pub fn parse_skills(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::model::{MAX_EDUCATION, MAX_EXPERIENCES};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn form() -> ResumeForm {
        ResumeForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            template: "Modern".to_string(),
            ..ResumeForm::default()
        }
    }

    #[test]
    fn skills_are_split_trimmed_and_filtered() {
        assert_eq!(
            parse_skills("  Analysis \n\n\r\nMathematics\r\n   \nPoetry"),
            vec!["Analysis", "Mathematics", "Poetry"]
        );
    }

    #[test]
    fn empty_optional_fields_become_absent() {
        let (data, template) = ResumeForm {
            linkedin: "  ".to_string(),
            picture: Some(Vec::new()),
            ..form()
        }
        .into_request()
        .expect("valid form");

        assert_eq!(template, Template::Modern);
        assert_eq!(data.personal_info.linkedin, None);
        assert_eq!(data.personal_info.picture, None);
        assert_eq!(data.personal_info.email, "ada@example.com");
    }

    #[test]
    fn missing_template_selects_the_default() {
        let (_, template) = ResumeForm {
            template: String::new(),
            ..form()
        }
        .into_request()
        .expect("valid form");
        assert_eq!(template, Template::Professional);
    }

    #[test]
    fn unknown_template_is_rejected() {
        let err = ResumeForm {
            template: "Nonexistent".to_string(),
            ..form()
        }
        .into_request()
        .unwrap_err();
        assert!(matches!(err, RenderError::InvalidTemplate(_)));
    }

    #[test]
    fn entry_limits_are_enforced() {
        let experience = Experience::new("Engine", "Analyst", date(1842, 1, 1), date(1843, 1, 1));
        let err = ResumeForm {
            experiences: vec![experience; MAX_EXPERIENCES + 1],
            ..form()
        }
        .into_request()
        .unwrap_err();
        assert!(matches!(err, RenderError::Validation(_)));

        let education = Education::new("Home", "Tutoring", date(1835, 1, 1));
        let err = ResumeForm {
            education: vec![education; MAX_EDUCATION + 1],
            ..form()
        }
        .into_request()
        .unwrap_err();
        assert!(matches!(err, RenderError::Validation(_)));
    }
}
