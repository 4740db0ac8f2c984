use super::new_id;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// A single position held.
///
/// When `current` is set the `end_date` is meaningless; [`Experience::set_current`]
/// clears it and the renderer never shows it.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[builder(default = "new_id()")]
    #[serde(default = "new_id")]
    pub id: String,
    #[builder(default)]
    #[serde(default)]
    pub company: String,
    #[builder(default)]
    #[serde(default)]
    pub position: String,
    #[builder(default)]
    #[serde(default)]
    pub location: String,
    /// `YYYY-MM`
    #[builder(default)]
    #[serde(default)]
    pub start_date: String,
    /// `YYYY-MM`
    #[builder(default)]
    #[serde(default)]
    pub end_date: String,
    #[builder(default)]
    #[serde(default)]
    pub current: bool,
    #[builder(default)]
    #[serde(default)]
    pub description: String,
    #[builder(setter(each(name = "achievement", into)), default = "vec![String::new()]")]
    #[serde(default = "one_empty_achievement")]
    pub achievements: Vec<String>,
}

fn one_empty_achievement() -> Vec<String> {
    vec![String::new()]
}

impl Experience {
    /// A new, empty entry with a fresh id and a single empty bullet.
    pub fn blank() -> Experience {
        Experience {
            id: new_id(),
            company: String::new(),
            position: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: String::new(),
            achievements: one_empty_achievement(),
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

    pub fn add_achievement(&mut self) {
        self.achievements.push(String::new());
    }

    pub fn update_achievement<S: ToString>(&mut self, index: usize, text: S) -> bool {
        match self.achievements.get_mut(index) {
            Some(achievement) => {
                *achievement = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes a bullet, refusing to remove the last remaining one.
    pub fn remove_achievement(&mut self, index: usize) -> bool {
        if self.achievements.len() <= 1 || index >= self.achievements.len() {
            return false;
        }
        self.achievements.remove(index);
        true
    }

    /// Bullets with content, in order.
    pub fn visible_achievements(&self) -> impl Iterator<Item = &str> {
        self.achievements
            .iter()
            .map(String::as_str)
            .filter(|a| !a.trim().is_empty())
    }
}
