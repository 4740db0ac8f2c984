//! The resume record.
//!
//! A [`ResumeDocument`] is created once per session (either from the store or from the
//! built-in empty template), mutated in place by commands and persisted after every
//! mutation. The renderer only ever reads it.
//!
//! Field names serialise in camelCase so the stored JSON stays compatible with records
//! written by the browser version of the builder.

mod dates;
pub use dates::*;

mod education;
pub use education::*;

mod experience;
pub use experience::*;

mod skill;
pub use skill::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generates a fresh identifier for a list entry.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Skill name must not be empty")]
    EmptySkillName,
    #[error("Category `{category}` is not a {kind} skill category")]
    UnknownCategory { category: String, kind: SkillType },
    #[error("Category name must not be empty")]
    EmptyCategoryName,
}

/// Contact and headline details shown in the document header.
///
/// Every field is optional; an empty string means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
    /// A `data:` URI, or empty
    pub profile_picture: String,
}

/// The whole resume. [`Default`] is the built-in empty template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub skill_categories: SkillCategories,
}

impl ResumeDocument {
    /// Appends a blank experience entry and returns it for editing.
    pub fn add_experience(&mut self) -> &mut Experience {
        self.experience.push(Experience::blank());
        self.experience.last_mut().expect("entry was just pushed")
    }

    pub fn experience_mut(&mut self, id: &str) -> Option<&mut Experience> {
        self.experience.iter_mut().find(|e| e.id == id)
    }

    pub fn remove_experience(&mut self, id: &str) -> bool {
        let before = self.experience.len();
        self.experience.retain(|e| e.id != id);
        self.experience.len() != before
    }

    /// Appends a blank education entry and returns it for editing.
    pub fn add_education(&mut self) -> &mut Education {
        self.education.push(Education::blank());
        self.education.last_mut().expect("entry was just pushed")
    }

    pub fn education_mut(&mut self, id: &str) -> Option<&mut Education> {
        self.education.iter_mut().find(|e| e.id == id)
    }

    pub fn remove_education(&mut self, id: &str) -> bool {
        let before = self.education.len();
        self.education.retain(|e| e.id != id);
        self.education.len() != before
    }

    /// Adds a skill, validating its name and category against the categories offered
    /// for its type. The level is clamped into `1..=5`.
    pub fn add_skill<N: ToString, C: ToString>(
        &mut self,
        name: N,
        level: u8,
        category: C,
        kind: SkillType,
    ) -> Result<&Skill, DocumentError> {
        let name = name.to_string();
        let category = category.to_string();
        if name.trim().is_empty() {
            return Err(DocumentError::EmptySkillName);
        }
        if !self
            .skill_categories
            .for_type(kind)
            .iter()
            .any(|c| c == &category)
        {
            return Err(DocumentError::UnknownCategory { category, kind });
        }

        self.skills.push(Skill {
            id: new_id(),
            name: name.trim().to_string(),
            level: skill::clamp_level(level),
            category,
            kind,
        });
        Ok(self.skills.last().expect("skill was just pushed"))
    }

    pub fn remove_skill(&mut self, id: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s.id != id);
        self.skills.len() != before
    }

    /// Adds a category to the list offered for `kind`.
    ///
    /// Returns `Ok(false)` if the category already exists.
    pub fn add_skill_category<S: AsRef<str>>(
        &mut self,
        kind: SkillType,
        name: S,
    ) -> Result<bool, DocumentError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(DocumentError::EmptyCategoryName);
        }
        let categories = self.skill_categories.for_type_mut(kind);
        if categories.iter().any(|c| c == name) {
            return Ok(false);
        }
        categories.push(name.to_string());
        Ok(true)
    }

    /// Removes a category from the list offered for `kind`.
    ///
    /// Skills filed under the category are kept; their category is blanked. Returns the
    /// number of skills that were affected.
    pub fn remove_skill_category<S: AsRef<str>>(&mut self, kind: SkillType, name: S) -> usize {
        let name = name.as_ref();
        self.skill_categories
            .for_type_mut(kind)
            .retain(|c| c != name);

        let mut affected = 0;
        for skill in self
            .skills
            .iter_mut()
            .filter(|s| s.kind == kind && s.category == name)
        {
            skill.category.clear();
            affected += 1;
        }
        affected
    }

    /// Brings a document from outside (an import, say) in line with what the editing
    /// operations guarantee: levels in `1..=5`, categories drawn from the offered
    /// lists, at least one bullet per experience and a non-empty id on every entry.
    ///
    /// Returns the number of fields that had to change.
    pub fn normalize(&mut self) -> usize {
        let mut fixed = 0;

        for skill in &mut self.skills {
            let level = skill::clamp_level(skill.level);
            if level != skill.level {
                tracing::warn!(skill = %skill.name, level = skill.level, "clamping skill level");
                skill.level = level;
                fixed += 1;
            }
            if !skill.category.is_empty()
                && !self
                    .skill_categories
                    .for_type(skill.kind)
                    .contains(&skill.category)
            {
                tracing::warn!(
                    skill = %skill.name,
                    category = %skill.category,
                    "dropping unknown {} category",
                    skill.kind
                );
                skill.category.clear();
                fixed += 1;
            }
            if skill.id.is_empty() {
                skill.id = new_id();
                fixed += 1;
            }
        }

        for exp in &mut self.experience {
            if exp.achievements.is_empty() {
                exp.add_achievement();
                fixed += 1;
            }
            if exp.id.is_empty() {
                exp.id = new_id();
                fixed += 1;
            }
        }

        for edu in self.education.iter_mut().filter(|e| e.id.is_empty()) {
            edu.id = new_id();
            fixed += 1;
        }

        fixed
    }
}
