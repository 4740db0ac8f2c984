use super::new_id;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// A single course of study. Shares the date semantics of [`super::Experience`].
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[builder(default = "new_id()")]
    #[serde(default = "new_id")]
    pub id: String,
    #[builder(default)]
    #[serde(default)]
    pub institution: String,
    #[builder(default)]
    #[serde(default)]
    pub degree: String,
    #[builder(default)]
    #[serde(default)]
    pub field: String,
    #[builder(default)]
    #[serde(default)]
    pub location: String,
    #[builder(default)]
    #[serde(default)]
    pub start_date: String,
    #[builder(default)]
    #[serde(default)]
    pub end_date: String,
    #[builder(default)]
    #[serde(default)]
    pub current: bool,
    #[builder(default)]
    #[serde(default)]
    pub gpa: String,
    #[builder(default)]
    #[serde(default)]
    pub highlights: String,
}

impl Education {
    pub fn blank() -> Education {
        Education {
            id: new_id(),
            institution: String::new(),
            degree: String::new(),
            field: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            gpa: String::new(),
            highlights: String::new(),
        }
    }

    pub fn set_current(&mut self, current: bool) {
        self.current = current;
        if current {
            self.end_date.clear();
        }
    }

    pub fn toggle_current(&mut self) {
        self.set_current(!self.current);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_create_education_with_builder_pattern() {
        let edu = EducationBuilder::default()
            .institution("MIT")
            .degree("BSc")
            .field("Physics")
            .build()
            .expect("can build education");
        assert_eq!(edu.degree, "BSc");
        assert!(edu.gpa.is_empty());
    }

    #[test]
    fn becoming_current_clears_end_date() {
        let mut edu = Education::blank();
        edu.end_date = "2019-06".to_string();
        edu.set_current(true);
        assert!(edu.end_date.is_empty());
    }
}
