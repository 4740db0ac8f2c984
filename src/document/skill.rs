use super::new_id;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    Technical,
    Soft,
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl SkillType {
    pub fn name(&self) -> &'static str {
        match self {
            SkillType::Technical => "technical",
            SkillType::Soft => "soft",
        }
    }

    pub fn all() -> &'static [SkillType] {
        &[SkillType::Technical, SkillType::Soft]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    /// Proficiency, 1 through 5
    #[serde(default = "default_level")]
    pub level: u8,
    /// May be empty if the category was deleted
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: SkillType,
}

fn default_level() -> u8 {
    3
}

pub(super) fn clamp_level(level: u8) -> u8 {
    level.clamp(1, 5)
}

/// The category names offered for each skill type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategories {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

impl Default for SkillCategories {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(ToString::to_string).collect();
        SkillCategories {
            technical: owned(&[
                "Programming Languages",
                "Frameworks & Libraries",
                "Tools & Technologies",
                "Databases",
                "Cloud & DevOps",
                "Design & UI/UX",
            ]),
            soft: owned(&[
                "Leadership",
                "Communication",
                "Problem Solving",
                "Teamwork",
                "Time Management",
                "Adaptability",
            ]),
        }
    }
}

impl SkillCategories {
    pub fn for_type(&self, kind: SkillType) -> &[String] {
        match kind {
            SkillType::Technical => &self.technical,
            SkillType::Soft => &self.soft,
        }
    }

    pub fn for_type_mut(&mut self, kind: SkillType) -> &mut Vec<String> {
        match kind {
            SkillType::Technical => &mut self.technical,
            SkillType::Soft => &mut self.soft,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn skill_type_serializes_lowercase() {
        let json = serde_json::to_string(&SkillType::Technical).expect("can serialize");
        assert_eq!(json, "\"technical\"");
        let kind: SkillType = serde_json::from_str("\"soft\"").expect("can deserialize");
        assert_eq!(kind, SkillType::Soft);
    }

    #[test]
    fn skill_without_id_gets_a_fresh_one() {
        let json = r#"{ "name": "Rust", "level": 4, "category": "", "type": "technical" }"#;
        let skill: Skill = serde_json::from_str(json).expect("can deserialize");
        assert!(!skill.id.is_empty());
        let other: Skill = serde_json::from_str(json).expect("can deserialize");
        assert_ne!(skill.id, other.id);
    }

    #[test]
    fn levels_are_clamped() {
        assert_eq!(clamp_level(0), 1);
        assert_eq!(clamp_level(3), 3);
        assert_eq!(clamp_level(200), 5);
    }
}
