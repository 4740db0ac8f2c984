//! The `experience`, `education` and `skill` commands: editing the list sections of
//! the saved resume one entry at a time.
//!
//! Entries are addressed by id. Ids are long, so any unambiguous prefix will do;
//! `status` prints the first eight characters of each.

use crate::cli::{
    EducationAction, EducationFields, ExperienceAction, ExperienceFields, SkillAction,
};
use crate::document::{Education, Experience, SkillType};
use crate::session::Session;
use crate::store::KeyValueStore;
use anyhow::{anyhow, bail, Context, Result};
use console::style;

const SAVE_FAILED: &str = "Failed to save resume";

/// The leading part of an id that `status` shows.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Finds the id that is `given`, or else the only one that starts with it.
fn resolve_id<'a, I>(ids: I, given: &str, what: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let given = given.trim();
    if given.is_empty() {
        bail!("No {what} id given");
    }

    let mut matches = Vec::new();
    for id in ids {
        if id == given {
            return Ok(id.to_string());
        }
        if id.starts_with(given) {
            matches.push(id);
        }
    }

    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => Err(anyhow!("There is no {what} entry `{given}`")),
        _ => Err(anyhow!(
            "`{given}` matches {} {what} entries; give more of the id",
            matches.len()
        )),
    }
}

/// Bullets are numbered from 1 on the command line.
fn bullet_index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Bullets are numbered from 1"))
}

fn assign(target: &mut String, value: Option<&str>) {
    if let Some(value) = value {
        *target = value.trim().to_string();
    }
}

fn apply_experience(fields: &ExperienceFields, exp: &mut Experience) {
    assign(&mut exp.company, fields.company.as_deref());
    assign(&mut exp.position, fields.position.as_deref());
    assign(&mut exp.location, fields.location.as_deref());
    assign(&mut exp.start_date, fields.start.as_deref());
    assign(&mut exp.end_date, fields.end.as_deref());
    assign(&mut exp.description, fields.description.as_deref());
}

fn apply_education(fields: &EducationFields, edu: &mut Education) {
    assign(&mut edu.institution, fields.institution.as_deref());
    assign(&mut edu.degree, fields.degree.as_deref());
    assign(&mut edu.field, fields.field.as_deref());
    assign(&mut edu.location, fields.location.as_deref());
    assign(&mut edu.start_date, fields.start.as_deref());
    assign(&mut edu.end_date, fields.end.as_deref());
    assign(&mut edu.gpa, fields.gpa.as_deref());
    assign(&mut edu.highlights, fields.highlights.as_deref());
}

fn experience_id<S: KeyValueStore>(session: &Session<S>, given: &str) -> Result<String> {
    let ids = session.document().experience.iter().map(|e| e.id.as_str());
    resolve_id(ids, given, "experience")
}

fn education_id<S: KeyValueStore>(session: &Session<S>, given: &str) -> Result<String> {
    let ids = session.document().education.iter().map(|e| e.id.as_str());
    resolve_id(ids, given, "education")
}

/// Runs one `experience` subcommand against the saved resume.
pub fn experience<S: KeyValueStore>(
    session: &mut Session<S>,
    action: &ExperienceAction,
) -> Result<()> {
    match action {
        ExperienceAction::Add {
            fields,
            current,
            achievements,
        } => {
            let id = session
                .update(|doc| {
                    let exp = doc.add_experience();
                    apply_experience(fields, exp);
                    exp.set_current(*current);
                    if !achievements.is_empty() {
                        exp.achievements = achievements.clone();
                    }
                    exp.id.clone()
                })
                .with_context(|| SAVE_FAILED)?;
            println!("Added experience {}", style(short_id(&id)).cyan());
        }
        ExperienceAction::Edit { id, fields } => {
            let id = experience_id(session, id)?;
            session
                .update(|doc| doc.experience_mut(&id).map(|exp| apply_experience(fields, exp)))
                .with_context(|| SAVE_FAILED)?;
            println!("Updated experience {}", short_id(&id));
        }
        ExperienceAction::Remove { id } => {
            let id = experience_id(session, id)?;
            session
                .update(|doc| doc.remove_experience(&id))
                .with_context(|| SAVE_FAILED)?;
            println!("Removed experience {}", short_id(&id));
        }
        ExperienceAction::Current { id } => {
            let id = experience_id(session, id)?;
            let current = session
                .update(|doc| {
                    doc.experience_mut(&id).map(|exp| {
                        exp.toggle_current();
                        exp.current
                    })
                })
                .with_context(|| SAVE_FAILED)?;
            if current == Some(true) {
                println!("Experience {} is now current", short_id(&id));
            } else {
                println!("Experience {} is no longer current", short_id(&id));
            }
        }
        ExperienceAction::AddBullet { id, text } => {
            let id = experience_id(session, id)?;
            let count = session
                .update(|doc| {
                    doc.experience_mut(&id).map(|exp| {
                        exp.add_achievement();
                        let last = exp.achievements.len() - 1;
                        if let Some(text) = text {
                            exp.update_achievement(last, text.trim());
                        }
                        exp.achievements.len()
                    })
                })
                .with_context(|| SAVE_FAILED)?
                .unwrap_or_default();
            println!("Added bullet {count} to experience {}", short_id(&id));
        }
        ExperienceAction::SetBullet { id, number, text } => {
            let id = experience_id(session, id)?;
            let index = bullet_index(*number)?;
            let exists = session
                .document()
                .experience
                .iter()
                .any(|e| e.id == id && index < e.achievements.len());
            if !exists {
                bail!("Experience {} has no bullet {number}", short_id(&id));
            }
            session
                .update(|doc| {
                    doc.experience_mut(&id)
                        .map(|exp| exp.update_achievement(index, text.trim()))
                })
                .with_context(|| SAVE_FAILED)?;
            println!("Updated bullet {number} of experience {}", short_id(&id));
        }
        ExperienceAction::RemoveBullet { id, number } => {
            let id = experience_id(session, id)?;
            let index = bullet_index(*number)?;
            let removable = session.document().experience.iter().any(|e| {
                e.id == id && index < e.achievements.len() && e.achievements.len() > 1
            });
            if !removable {
                bail!(
                    "Can't remove bullet {number} of experience {}; an entry keeps at least one",
                    short_id(&id)
                );
            }
            session
                .update(|doc| doc.experience_mut(&id).map(|exp| exp.remove_achievement(index)))
                .with_context(|| SAVE_FAILED)?;
            println!("Removed bullet {number} of experience {}", short_id(&id));
        }
    }
    Ok(())
}

/// Runs one `education` subcommand against the saved resume.
pub fn education<S: KeyValueStore>(
    session: &mut Session<S>,
    action: &EducationAction,
) -> Result<()> {
    match action {
        EducationAction::Add { fields, current } => {
            let id = session
                .update(|doc| {
                    let edu = doc.add_education();
                    apply_education(fields, edu);
                    edu.set_current(*current);
                    edu.id.clone()
                })
                .with_context(|| SAVE_FAILED)?;
            println!("Added education {}", style(short_id(&id)).cyan());
        }
        EducationAction::Edit { id, fields } => {
            let id = education_id(session, id)?;
            session
                .update(|doc| doc.education_mut(&id).map(|edu| apply_education(fields, edu)))
                .with_context(|| SAVE_FAILED)?;
            println!("Updated education {}", short_id(&id));
        }
        EducationAction::Remove { id } => {
            let id = education_id(session, id)?;
            session
                .update(|doc| doc.remove_education(&id))
                .with_context(|| SAVE_FAILED)?;
            println!("Removed education {}", short_id(&id));
        }
        EducationAction::Current { id } => {
            let id = education_id(session, id)?;
            let current = session
                .update(|doc| {
                    doc.education_mut(&id).map(|edu| {
                        edu.toggle_current();
                        edu.current
                    })
                })
                .with_context(|| SAVE_FAILED)?;
            if current == Some(true) {
                println!("Education {} is now ongoing", short_id(&id));
            } else {
                println!("Education {} is no longer ongoing", short_id(&id));
            }
        }
    }
    Ok(())
}

/// Runs one `skill` subcommand against the saved resume.
pub fn skill<S: KeyValueStore>(session: &mut Session<S>, action: &SkillAction) -> Result<()> {
    match action {
        SkillAction::Add {
            kind,
            name,
            category,
            level,
        } => {
            let kind: SkillType = (*kind).into();
            let (id, level) = session
                .update(|doc| {
                    doc.add_skill(name, *level, category, kind)
                        .map(|skill| (skill.id.clone(), skill.level))
                })
                .with_context(|| SAVE_FAILED)??;
            println!(
                "Added {kind} skill {} ({}) at level {level}",
                name.trim(),
                style(short_id(&id)).cyan()
            );
        }
        SkillAction::Remove { id } => {
            let ids = session.document().skills.iter().map(|s| s.id.as_str());
            let id = resolve_id(ids, id, "skill")?;
            session
                .update(|doc| doc.remove_skill(&id))
                .with_context(|| SAVE_FAILED)?;
            println!("Removed skill {}", short_id(&id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SkillKind;
    use crate::document::DocumentError;
    use crate::store::MemoryStore;
    use crate::themes::ThemeRegistry;

    fn session() -> Session<MemoryStore> {
        Session::load(MemoryStore::default(), ThemeRegistry::builtin().clone())
    }

    fn add_experience(s: &mut Session<MemoryStore>, company: &str) -> String {
        experience(
            s,
            &ExperienceAction::Add {
                fields: ExperienceFields {
                    company: Some(company.to_string()),
                    end: Some("2022-03".to_string()),
                    ..ExperienceFields::default()
                },
                current: false,
                achievements: vec![],
            },
        )
        .expect("can add experience");
        s.document().experience.last().unwrap().id.clone()
    }

    #[test]
    fn ids_resolve_by_unique_prefix() {
        let ids = ["abc123", "abd456", "xyz"];
        assert_eq!(resolve_id(ids, "abc", "skill").unwrap(), "abc123");
        assert_eq!(resolve_id(ids, "xyz", "skill").unwrap(), "xyz");
        assert!(resolve_id(ids, "ab", "skill").is_err());
        assert!(resolve_id(ids, "q", "skill").is_err());
        assert!(resolve_id(ids, " ", "skill").is_err());
        // an exact match wins over a longer id sharing the prefix
        assert_eq!(resolve_id(["ab", "abc"], "ab", "skill").unwrap(), "ab");
    }

    #[test]
    fn can_add_edit_and_remove_experience() {
        let mut s = session();
        let id = add_experience(&mut s, "Initech");
        {
            let exp = &s.document().experience[0];
            assert_eq!(exp.company, "Initech");
            assert_eq!(exp.achievements, vec![String::new()]);
        }

        experience(
            &mut s,
            &ExperienceAction::Edit {
                id: short_id(&id).to_string(),
                fields: ExperienceFields {
                    position: Some(" Engineer ".to_string()),
                    ..ExperienceFields::default()
                },
            },
        )
        .unwrap();
        let exp = &s.document().experience[0];
        assert_eq!(exp.company, "Initech");
        assert_eq!(exp.position, "Engineer");

        experience(&mut s, &ExperienceAction::Remove { id: id.clone() }).unwrap();
        assert!(s.document().experience.is_empty());
        assert!(experience(&mut s, &ExperienceAction::Remove { id }).is_err());
    }

    #[test]
    fn toggling_current_clears_end_date() {
        let mut s = session();
        let id = add_experience(&mut s, "Initech");
        assert_eq!(s.document().experience[0].end_date, "2022-03");

        experience(&mut s, &ExperienceAction::Current { id: id.clone() }).unwrap();
        let exp = &s.document().experience[0];
        assert!(exp.current);
        assert!(exp.end_date.is_empty());

        experience(&mut s, &ExperienceAction::Current { id }).unwrap();
        assert!(!s.document().experience[0].current);
    }

    #[test]
    fn bullets_can_be_added_set_and_removed() {
        let mut s = session();
        let id = add_experience(&mut s, "Initech");

        experience(
            &mut s,
            &ExperienceAction::AddBullet {
                id: id.clone(),
                text: Some("Moved the stapler".to_string()),
            },
        )
        .unwrap();
        experience(
            &mut s,
            &ExperienceAction::SetBullet {
                id: id.clone(),
                number: 1,
                text: "Fixed the Y2K bug".to_string(),
            },
        )
        .unwrap();
        assert_eq!(
            s.document().experience[0].achievements,
            vec!["Fixed the Y2K bug".to_string(), "Moved the stapler".to_string()]
        );

        assert!(experience(
            &mut s,
            &ExperienceAction::SetBullet {
                id: id.clone(),
                number: 3,
                text: "nope".to_string(),
            },
        )
        .is_err());
        assert!(experience(&mut s, &ExperienceAction::RemoveBullet { id: id.clone(), number: 0 }).is_err());

        experience(&mut s, &ExperienceAction::RemoveBullet { id: id.clone(), number: 1 }).unwrap();
        assert_eq!(
            s.document().experience[0].achievements,
            vec!["Moved the stapler".to_string()]
        );
        // the last bullet stays
        assert!(experience(&mut s, &ExperienceAction::RemoveBullet { id, number: 1 }).is_err());
        assert_eq!(s.document().experience[0].achievements.len(), 1);
    }

    #[test]
    fn can_add_toggle_and_remove_education() {
        let mut s = session();
        education(
            &mut s,
            &EducationAction::Add {
                fields: EducationFields {
                    institution: Some("MIT".to_string()),
                    degree: Some("BSc".to_string()),
                    end: Some("2019-06".to_string()),
                    ..EducationFields::default()
                },
                current: true,
            },
        )
        .unwrap();
        let id = s.document().education[0].id.clone();
        assert!(s.document().education[0].current);
        assert!(s.document().education[0].end_date.is_empty());

        education(&mut s, &EducationAction::Current { id: id.clone() }).unwrap();
        assert!(!s.document().education[0].current);

        education(
            &mut s,
            &EducationAction::Edit {
                id: id.clone(),
                fields: EducationFields {
                    gpa: Some("3.9".to_string()),
                    ..EducationFields::default()
                },
            },
        )
        .unwrap();
        assert_eq!(s.document().education[0].gpa, "3.9");
        assert_eq!(s.document().education[0].institution, "MIT");

        education(&mut s, &EducationAction::Remove { id }).unwrap();
        assert!(s.document().education.is_empty());
    }

    #[test]
    fn skills_are_validated_and_removable() {
        let mut s = session();
        skill(
            &mut s,
            &SkillAction::Add {
                kind: SkillKind::Technical,
                name: "Rust".to_string(),
                category: "Programming Languages".to_string(),
                level: 7,
            },
        )
        .unwrap();
        assert_eq!(s.document().skills[0].level, 5);

        let err = skill(
            &mut s,
            &SkillAction::Add {
                kind: SkillKind::Soft,
                name: "Rust".to_string(),
                category: "Programming Languages".to_string(),
                level: 3,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DocumentError>(),
            Some(DocumentError::UnknownCategory { .. })
        ));

        let err = skill(
            &mut s,
            &SkillAction::Add {
                kind: SkillKind::Soft,
                name: " ".to_string(),
                category: "Leadership".to_string(),
                level: 3,
            },
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DocumentError>(),
            Some(&DocumentError::EmptySkillName)
        );
        assert_eq!(s.document().skills.len(), 1);

        let id = s.document().skills[0].id.clone();
        skill(&mut s, &SkillAction::Remove { id }).unwrap();
        assert!(s.document().skills.is_empty());
    }
}
